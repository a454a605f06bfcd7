//! src/core/direction.rs

use crate::core::host::MapScroll;

/// 4方向 + 「なし」を表す列挙型。
///
/// `None` は「オフセットしていない」「注目する向きがない」ことを意味するよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
  #[default]
  None,
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  /// `None` を除いた4方向。
  pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

  /// 逆方向を返す。`None` は `None` のまま。
  pub fn reverse(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
      Direction::None => Direction::None,
    }
  }

  /// タイル単位の移動量 (dx, dy)。y は下向きが正。
  pub fn delta(self) -> (i32, i32) {
    match self {
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
      Direction::None => (0, 0),
    }
  }

  pub fn is_none(self) -> bool {
    self == Direction::None
  }
}

/// `direction` にオフセットしてよいかを判定する。
///
/// その方向に1タイルずらせるだけでなく、逆方向にも1タイル戻せる必要があるよ。
/// 片側だけだと、端っこでずらしたカメラが元に戻れなくなっちゃうからね。
pub fn can_offset_toward(map: &impl MapScroll, direction: Direction) -> bool {
  if direction.is_none() {
    return false;
  }
  map.can_scroll_one_tile(direction) && map.can_scroll_one_tile(direction.reverse())
}
