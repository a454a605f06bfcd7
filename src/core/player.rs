//! プレイヤーに関するすべてのロジックを管理するモジュールだよ！
//!
//! プレイヤーはタイル単位で歩く。`x`, `y` は目的地のタイル、
//! `real_x`, `real_y` は描画用の補間された位置。

use crate::core::direction::Direction;
use crate::core::host::PlayerState;
use crate::core::map::{scroll_distance, ScrollMap};

pub const DEFAULT_MOVE_SPEED: f32 = 4.0;
pub const MIN_MOVE_SPEED: f32 = 1.0;
pub const MAX_MOVE_SPEED: f32 = 6.0;

/// プレイヤーが実行可能なアクションを定義する enum だよ。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayerAction {
  MoveUp,
  MoveDown,
  MoveLeft,
  MoveRight,
  SpeedUp,
  SlowDown,
  None,
}

impl PlayerAction {
  /// 移動アクションなら、その方向。
  pub fn direction(self) -> Option<Direction> {
    match self {
      PlayerAction::MoveUp => Some(Direction::Up),
      PlayerAction::MoveDown => Some(Direction::Down),
      PlayerAction::MoveLeft => Some(Direction::Left),
      PlayerAction::MoveRight => Some(Direction::Right),
      _ => None,
    }
  }
}

/// プレイヤーの状態を保持する構造体。
#[derive(Debug, Clone)]
pub struct Player {
  pub x: i32,
  pub y: i32,
  pub real_x: f32,
  pub real_y: f32,
  pub direction: Direction,
  pub move_speed: f32,
}

impl Player {
  /// 新しいプレイヤーインスタンスを作成するよ。最初は下向き。
  pub fn new(x: i32, y: i32) -> Self {
    Player {
      x,
      y,
      real_x: x as f32,
      real_y: y as f32,
      direction: Direction::Down,
      move_speed: DEFAULT_MOVE_SPEED,
    }
  }

  pub fn real_pos(&self) -> (f32, f32) {
    (self.real_x, self.real_y)
  }

  /// 1フレームで進む距離 (タイル)。スクロールと同じ速度の物差しを使うよ。
  pub fn distance_per_frame(&self) -> f32 {
    scroll_distance(self.move_speed)
  }

  pub fn set_move_speed(&mut self, speed: f32) {
    self.move_speed = speed.clamp(MIN_MOVE_SPEED, MAX_MOVE_SPEED);
  }

  /// 目的地のタイルに向かって補間位置を進める。
  fn update_move(&mut self) {
    let step = self.distance_per_frame();
    let (x, y) = (self.x as f32, self.y as f32);
    if self.real_x < x {
      self.real_x = (self.real_x + step).min(x);
    } else if self.real_x > x {
      self.real_x = (self.real_x - step).max(x);
    }
    if self.real_y < y {
      self.real_y = (self.real_y + step).min(y);
    } else if self.real_y > y {
      self.real_y = (self.real_y - step).max(y);
    }
  }

  /// `direction` を向いて、通れるなら1タイル進み始める。
  fn move_straight(&mut self, map: &ScrollMap, direction: Direction) {
    self.direction = direction;
    let (dx, dy) = direction.delta();
    let nx = map.round_x(self.x + dx);
    let ny = map.round_y(self.y + dy);
    if map.is_passable(nx, ny) {
      self.x = nx;
      self.y = ny;
      // ループ境界をまたいでも1タイル手前から歩いてくるように見せる
      self.real_x = (nx - dx) as f32;
      self.real_y = (ny - dy) as f32;
    }
  }
}

impl PlayerState for Player {
  fn position(&self) -> (i32, i32) {
    (self.x, self.y)
  }

  fn facing(&self) -> Direction {
    self.direction
  }

  fn is_moving(&self) -> bool {
    self.real_x != self.x as f32 || self.real_y != self.y as f32
  }

  fn move_speed(&self) -> f32 {
    self.move_speed
  }
}

/// プレイヤーの状態を1フレーム分更新する関数。
///
/// 移動中は新しい入力を受け付けず、止まっているときだけ
/// 最初に見つかった移動アクションの方向へ歩き出すよ。
pub fn update(player: &mut Player, map: &ScrollMap, actions: &[PlayerAction]) {
  if actions.contains(&PlayerAction::SpeedUp) {
    player.set_move_speed(player.move_speed + 1.0);
  }
  if actions.contains(&PlayerAction::SlowDown) {
    player.set_move_speed(player.move_speed - 1.0);
  }

  if !player.is_moving() {
    if let Some(direction) = actions.iter().find_map(|action| action.direction()) {
      player.move_straight(map, direction);
    }
  }

  player.update_move();
}
