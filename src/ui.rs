// src/ui.rs

use std::sync::Arc;
use winit::window::Window;

use lookahead::core::controller::ControllerState;

/// タイトルバーに出す文字列を作る。
///
/// # Arguments
/// * `seed` - マップ生成に使ったシード値。
/// * `camera` - 先読みカメラの状態。
/// * `player_speed` - プレイヤーの移動速度。速度 0 のときはこっちが使われるよ。
pub fn window_title(seed: u64, camera: &ControllerState, player_speed: f32) -> String {
  let mode = if camera.restoring {
    "restoring"
  } else if camera.enabled {
    "on"
  } else {
    "off"
  };
  let speed = if camera.speed == 0.0 || camera.speed.is_nan() {
    format!("player ({player_speed})")
  } else {
    camera.speed.to_string()
  };
  format!(
    "lookahead | Seed: {} | camera {} | offset {:?} | speed {}",
    seed, mode, camera.camera_offset, speed
  )
}

/// タイトルが変わったときだけウィンドウに反映する。
pub fn update_window_title(window: &Arc<Window>, current: &mut String, title: String) {
  if *current != title {
    window.set_title(&title);
    *current = title;
  }
}
