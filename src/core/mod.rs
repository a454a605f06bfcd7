//! ゲームロジックまわり。描画やウィンドウには依存しないよ。

pub mod command;
pub mod controller;
pub mod direction;
pub mod generation;
pub mod host;
pub mod map;
pub mod player;
pub mod session;
