//! カメラ制御が外の世界とやりとりするためのトレイトたち。
//!
//! コントローラはプレイヤーやマップの実装を知らなくていいように、
//! ここで定義した窓口だけを見て判断するよ。

use crate::core::direction::Direction;

/// プレイヤーの状態を教えてくれる側。
pub trait PlayerState {
  /// 現在のタイル座標。
  fn position(&self) -> (i32, i32);

  /// 向いている方向。
  fn facing(&self) -> Direction;

  /// 1タイル分の移動アニメーション中なら true。
  fn is_moving(&self) -> bool;

  /// 現在の移動速度。カメラ速度が 0 のときはこれを使ってスクロールする。
  fn move_speed(&self) -> f32;
}

/// マップのスクロールを担当する側。
///
/// スクロールは投げっぱなしで、終わったかどうかは毎フレーム
/// `is_scrolling` をポーリングして確認する約束だよ。
pub trait MapScroll {
  /// スクロールアニメーションの途中なら true。
  fn is_scrolling(&self) -> bool;

  /// `direction` 方向に1タイルぶんスクロールできるか。
  fn can_scroll_one_tile(&self, direction: Direction) -> bool;

  /// `direction` 方向へ `distance` タイル、`speed` の速さでスクロールを始める。
  fn start_scroll(&mut self, direction: Direction, distance: u32, speed: f32);
}
