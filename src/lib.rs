//! プレイヤーが立ち止まると、向いている方向の1タイル先まで画面を
//! ずらして見せる「先読みカメラ」。
//!
//! 中心になるのは [`crate::core::controller::LookAheadController`] で、
//! プレイヤーとマップは [`crate::core::host`] のトレイト越しに扱うよ。

pub mod config;
pub mod core;
pub mod render;
