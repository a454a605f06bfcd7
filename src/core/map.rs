//! src/core/map.rs
//!
//! タイルマップと、その上を動くビューポートのスクロールを管理するよ。
//! 表示位置 (`display_x`, `display_y`) はビューポート左上のタイル座標。

use crate::core::direction::Direction;
use crate::core::host::MapScroll;

/// ビューポートに収まるタイル数のデフォルト (816x624 を 48px タイルで割った値)。
pub const DEFAULT_SCREEN_TILES_X: f32 = 17.0;
pub const DEFAULT_SCREEN_TILES_Y: f32 = 13.0;

/// マップ1辺のタイル数の上限。
pub const MAX_MAP_SIDE: i32 = 4096;

/// マップの1マス。
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
  Water,
  Sand,
  #[default]
  Grass,
  Forest,
  Rock,
}

impl Tile {
  pub const ALL: [Tile; 5] = [Tile::Water, Tile::Sand, Tile::Grass, Tile::Forest, Tile::Rock];

  /// プレイヤーが上を歩けるか。
  pub fn is_passable(self) -> bool {
    !matches!(self, Tile::Water | Tile::Rock)
  }
}

/// 速度から1フレームあたりのスクロール量 (タイル) を求める。
/// 速度4で 1/16 タイル、1増えるごとに倍になるよ。
pub fn scroll_distance(speed: f32) -> f32 {
  2f32.powf(speed) / 256.0
}

/// スクロール可能なタイルマップ。
#[derive(Debug, Clone)]
pub struct ScrollMap {
  width: i32,
  height: i32,
  tiles: Vec<Tile>,
  loop_horizontal: bool,
  loop_vertical: bool,
  screen_tiles_x: f32,
  screen_tiles_y: f32,
  display_x: f32,
  display_y: f32,
  scroll_direction: Direction,
  scroll_rest: f32,
  scroll_speed: f32,
}

impl ScrollMap {
  /// 全マス `fill` で埋めたマップを作る。各辺は 1..=`MAX_MAP_SIDE` に丸めるよ。
  pub fn new(width: i32, height: i32, fill: Tile) -> Self {
    let width = width.clamp(1, MAX_MAP_SIDE);
    let height = height.clamp(1, MAX_MAP_SIDE);
    Self {
      width,
      height,
      tiles: vec![fill; width as usize * height as usize],
      loop_horizontal: false,
      loop_vertical: false,
      screen_tiles_x: DEFAULT_SCREEN_TILES_X,
      screen_tiles_y: DEFAULT_SCREEN_TILES_Y,
      display_x: 0.0,
      display_y: 0.0,
      scroll_direction: Direction::None,
      scroll_rest: 0.0,
      scroll_speed: 4.0,
    }
  }

  pub fn with_loop(mut self, horizontal: bool, vertical: bool) -> Self {
    self.loop_horizontal = horizontal;
    self.loop_vertical = vertical;
    self
  }

  pub fn with_screen_tiles(mut self, x: f32, y: f32) -> Self {
    self.screen_tiles_x = x;
    self.screen_tiles_y = y;
    self
  }

  pub fn width(&self) -> i32 {
    self.width
  }

  pub fn height(&self) -> i32 {
    self.height
  }

  pub fn is_loop_horizontal(&self) -> bool {
    self.loop_horizontal
  }

  pub fn is_loop_vertical(&self) -> bool {
    self.loop_vertical
  }

  pub fn screen_tiles_x(&self) -> f32 {
    self.screen_tiles_x
  }

  pub fn screen_tiles_y(&self) -> f32 {
    self.screen_tiles_y
  }

  pub fn display_x(&self) -> f32 {
    self.display_x
  }

  pub fn display_y(&self) -> f32 {
    self.display_y
  }

  /// ループしている軸は座標を巻き戻す。
  pub fn round_x(&self, x: i32) -> i32 {
    if self.loop_horizontal { x.rem_euclid(self.width) } else { x }
  }

  pub fn round_y(&self, y: i32) -> i32 {
    if self.loop_vertical { y.rem_euclid(self.height) } else { y }
  }

  /// 指定座標のタイル。範囲外なら `None` だよ。
  pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
    let x = self.round_x(x);
    let y = self.round_y(y);
    if x < 0 || y < 0 || x >= self.width || y >= self.height {
      return None;
    }
    self.tiles.get((y * self.width + x) as usize).copied()
  }

  pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
    let x = self.round_x(x);
    let y = self.round_y(y);
    if x >= 0 && y >= 0 && x < self.width && y < self.height {
      self.tiles[(y * self.width + x) as usize] = tile;
    }
  }

  pub fn is_passable(&self, x: i32, y: i32) -> bool {
    self.tile(x, y).is_some_and(Tile::is_passable)
  }

  /// 画面中央のタイル位置 (ビューポート基準)。
  pub fn center_x(&self) -> f32 {
    (self.screen_tiles_x - 1.0) / 2.0
  }

  pub fn center_y(&self) -> f32 {
    (self.screen_tiles_y - 1.0) / 2.0
  }

  /// 表示位置を直接設定する。ループしない軸は端で止めて、
  /// ビューポートより小さいマップは真ん中に置くよ。
  pub fn set_display_pos(&mut self, x: f32, y: f32) {
    if self.loop_horizontal {
      self.display_x = x.rem_euclid(self.width as f32);
    } else {
      let end_x = self.width as f32 - self.screen_tiles_x;
      self.display_x = if end_x < 0.0 { end_x / 2.0 } else { x.clamp(0.0, end_x) };
    }
    if self.loop_vertical {
      self.display_y = y.rem_euclid(self.height as f32);
    } else {
      let end_y = self.height as f32 - self.screen_tiles_y;
      self.display_y = if end_y < 0.0 { end_y / 2.0 } else { y.clamp(0.0, end_y) };
    }
  }

  /// (x, y) が画面中央に来るように表示位置を合わせる。
  pub fn center_on(&mut self, x: f32, y: f32) {
    self.set_display_pos(x - self.center_x(), y - self.center_y());
  }

  /// マップ座標をビューポート基準の座標に変換する。
  pub fn adjust_x(&self, x: f32) -> f32 {
    let width = self.width as f32;
    if self.loop_horizontal && x < self.display_x - (width - self.screen_tiles_x) / 2.0 {
      x - self.display_x + width
    } else {
      x - self.display_x
    }
  }

  pub fn adjust_y(&self, y: f32) -> f32 {
    let height = self.height as f32;
    if self.loop_vertical && y < self.display_y - (height - self.screen_tiles_y) / 2.0 {
      y - self.display_y + height
    } else {
      y - self.display_y
    }
  }

  pub fn scroll_down(&mut self, distance: f32) {
    let height = self.height as f32;
    if self.loop_vertical {
      self.display_y = (self.display_y + distance).rem_euclid(height);
    } else if height >= self.screen_tiles_y {
      self.display_y = (self.display_y + distance).min(height - self.screen_tiles_y);
    }
  }

  pub fn scroll_up(&mut self, distance: f32) {
    let height = self.height as f32;
    if self.loop_vertical {
      self.display_y = (self.display_y - distance).rem_euclid(height);
    } else if height >= self.screen_tiles_y {
      self.display_y = (self.display_y - distance).max(0.0);
    }
  }

  pub fn scroll_right(&mut self, distance: f32) {
    let width = self.width as f32;
    if self.loop_horizontal {
      self.display_x = (self.display_x + distance).rem_euclid(width);
    } else if width >= self.screen_tiles_x {
      self.display_x = (self.display_x + distance).min(width - self.screen_tiles_x);
    }
  }

  pub fn scroll_left(&mut self, distance: f32) {
    let width = self.width as f32;
    if self.loop_horizontal {
      self.display_x = (self.display_x - distance).rem_euclid(width);
    } else if width >= self.screen_tiles_x {
      self.display_x = (self.display_x - distance).max(0.0);
    }
  }

  fn do_scroll(&mut self, direction: Direction, distance: f32) {
    match direction {
      Direction::Down => self.scroll_down(distance),
      Direction::Up => self.scroll_up(distance),
      Direction::Left => self.scroll_left(distance),
      Direction::Right => self.scroll_right(distance),
      Direction::None => {}
    }
  }

  /// スクロールアニメーションを1フレーム進める。
  pub fn update_scroll(&mut self) {
    if !self.is_scrolling() {
      return;
    }
    let last = (self.display_x, self.display_y);
    let step = scroll_distance(self.scroll_speed).min(self.scroll_rest);
    self.do_scroll(self.scroll_direction, step);
    if (self.display_x, self.display_y) == last {
      // 端にぶつかって動けなかった
      self.scroll_rest = 0.0;
    } else {
      self.scroll_rest -= step;
    }
  }

  /// プレイヤーの移動に合わせて画面を追従させる。
  ///
  /// `last` は移動前のビューポート基準座標、`real` は移動後のマップ座標。
  /// プレイヤーが画面中央を越えて進んだぶんだけスクロールする。
  pub fn follow(&mut self, last: (f32, f32), real: (f32, f32)) {
    let (x1, y1) = last;
    let x2 = self.adjust_x(real.0);
    let y2 = self.adjust_y(real.1);
    if y2 > y1 && y2 > self.center_y() {
      self.scroll_down(y2 - y1);
    }
    if x2 < x1 && x2 < self.center_x() {
      self.scroll_left(x1 - x2);
    }
    if x2 > x1 && x2 > self.center_x() {
      self.scroll_right(x2 - x1);
    }
    if y2 < y1 && y2 < self.center_y() {
      self.scroll_up(y1 - y2);
    }
  }
}

impl MapScroll for ScrollMap {
  fn is_scrolling(&self) -> bool {
    self.scroll_rest > 0.0
  }

  fn can_scroll_one_tile(&self, direction: Direction) -> bool {
    let width = self.width as f32;
    let height = self.height as f32;
    match direction {
      Direction::Down => {
        self.loop_vertical
          || (height >= self.screen_tiles_y && self.display_y < height - self.screen_tiles_y)
      }
      Direction::Up => self.loop_vertical || (height >= self.screen_tiles_y && self.display_y > 0.0),
      Direction::Left => self.loop_horizontal || (width >= self.screen_tiles_x && self.display_x > 0.0),
      Direction::Right => {
        self.loop_horizontal
          || (width >= self.screen_tiles_x && self.display_x < width - self.screen_tiles_x)
      }
      Direction::None => false,
    }
  }

  fn start_scroll(&mut self, direction: Direction, distance: u32, speed: f32) {
    self.scroll_direction = direction;
    self.scroll_rest = distance as f32;
    self.scroll_speed = speed;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(width: i32, height: i32) -> ScrollMap {
    ScrollMap::new(width, height, Tile::Grass).with_screen_tiles(17.0, 13.0)
  }

  #[test]
  fn oversized_map_is_clamped() {
    let m = ScrollMap::new(70_000, 70_000, Tile::Grass);
    assert_eq!((m.width(), m.height()), (MAX_MAP_SIDE, MAX_MAP_SIDE));
    assert_eq!(m.tile(MAX_MAP_SIDE - 1, MAX_MAP_SIDE - 1), Some(Tile::Grass));

    let m = ScrollMap::new(0, -5, Tile::Grass);
    assert_eq!((m.width(), m.height()), (1, 1));
  }

  fn run_scroll(map: &mut ScrollMap) -> usize {
    let mut frames = 0;
    while map.is_scrolling() {
      map.update_scroll();
      frames += 1;
      assert!(frames < 10_000, "scroll never settled");
    }
    frames
  }

  #[test]
  fn scroll_distance_doubles_per_speed_step() {
    assert_eq!(scroll_distance(4.0), 1.0 / 16.0);
    assert_eq!(scroll_distance(5.0), 1.0 / 8.0);
    assert_eq!(scroll_distance(8.0), 1.0);
  }

  #[test]
  fn feasibility_at_top_left_corner() {
    let m = map(40, 30);
    assert!(!m.can_scroll_one_tile(Direction::Up));
    assert!(!m.can_scroll_one_tile(Direction::Left));
    assert!(m.can_scroll_one_tile(Direction::Down));
    assert!(m.can_scroll_one_tile(Direction::Right));
    assert!(!m.can_scroll_one_tile(Direction::None));
  }

  #[test]
  fn feasibility_at_bottom_right_corner() {
    let mut m = map(40, 30);
    m.set_display_pos(100.0, 100.0);
    assert_eq!((m.display_x(), m.display_y()), (23.0, 17.0));
    assert!(!m.can_scroll_one_tile(Direction::Down));
    assert!(!m.can_scroll_one_tile(Direction::Right));
    assert!(m.can_scroll_one_tile(Direction::Up));
    assert!(m.can_scroll_one_tile(Direction::Left));
  }

  #[test]
  fn small_map_is_centered_and_cannot_scroll() {
    let mut m = map(10, 8);
    m.center_on(5.0, 4.0);
    assert_eq!(m.display_x(), -3.5);
    assert_eq!(m.display_y(), -2.5);
    for d in Direction::ALL {
      assert!(!m.can_scroll_one_tile(d), "{d:?}");
    }
  }

  #[test]
  fn looping_axes_always_scroll() {
    let m = map(10, 8).with_loop(true, false);
    assert!(m.can_scroll_one_tile(Direction::Left));
    assert!(m.can_scroll_one_tile(Direction::Right));
    assert!(!m.can_scroll_one_tile(Direction::Up));

    let m = map(10, 8).with_loop(false, true);
    assert!(m.can_scroll_one_tile(Direction::Up));
    assert!(m.can_scroll_one_tile(Direction::Down));
  }

  #[test]
  fn scroll_moves_exactly_one_tile() {
    let mut m = map(40, 30);
    m.set_display_pos(10.0, 10.0);
    m.start_scroll(Direction::Right, 1, 4.0);
    assert!(m.is_scrolling());
    assert_eq!(run_scroll(&mut m), 16);
    assert_eq!(m.display_x(), 11.0);

    m.start_scroll(Direction::Up, 1, 2.5);
    run_scroll(&mut m);
    assert!((m.display_y() - 9.0).abs() < 1e-4);
  }

  #[test]
  fn fast_scroll_does_not_overshoot() {
    let mut m = map(40, 30);
    m.set_display_pos(10.0, 10.0);
    m.start_scroll(Direction::Down, 1, 12.0);
    assert_eq!(run_scroll(&mut m), 1);
    assert_eq!(m.display_y(), 11.0);
  }

  #[test]
  fn scroll_into_edge_stops() {
    let mut m = map(40, 30);
    m.start_scroll(Direction::Left, 1, 4.0);
    assert_eq!(run_scroll(&mut m), 1);
    assert_eq!(m.display_x(), 0.0);
  }

  #[test]
  fn looping_scroll_wraps_display() {
    let mut m = map(20, 20).with_loop(true, true);
    m.start_scroll(Direction::Left, 1, 8.0);
    run_scroll(&mut m);
    assert_eq!(m.display_x(), 19.0);
    m.start_scroll(Direction::Up, 1, 8.0);
    run_scroll(&mut m);
    assert_eq!(m.display_y(), 19.0);
  }

  #[test]
  fn tiles_wrap_only_on_looping_axes() {
    let mut m = map(5, 5).with_loop(true, false);
    m.set_tile(0, 0, Tile::Water);
    assert_eq!(m.tile(5, 0), Some(Tile::Water));
    assert_eq!(m.tile(-5, 0), Some(Tile::Water));
    assert_eq!(m.tile(0, 5), None);
    assert!(!m.is_passable(0, 0));
    assert!(m.is_passable(1, 0));
  }

  #[test]
  fn follow_scrolls_once_past_center() {
    let mut m = map(40, 30);
    m.center_on(20.0, 15.0);
    assert_eq!((m.display_x(), m.display_y()), (12.0, 9.0));

    let last = (m.adjust_x(20.0), m.adjust_y(15.0));
    m.follow(last, (20.25, 15.0));
    assert_eq!(m.display_x(), 12.25);

    // 中央より手前ならスクロールしない
    m.set_display_pos(16.0, 9.0);
    let last = (m.adjust_x(20.0), m.adjust_y(15.0));
    m.follow(last, (20.25, 15.0));
    assert_eq!(m.display_x(), 16.0);
  }

  #[test]
  fn adjust_wraps_on_looping_map() {
    let mut m = map(20, 20).with_loop(true, false);
    m.set_display_pos(18.0, 0.0);
    assert_eq!(m.adjust_x(19.0), 1.0);
    assert_eq!(m.adjust_x(2.0), 4.0);
  }
}
