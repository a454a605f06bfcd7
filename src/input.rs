//! src/input.rs

use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

use lookahead::core::command::Command;
use lookahead::core::player::PlayerAction;

/// 現在押されているキーから、プレイヤーのアクションリストを生成する。
///
/// 移動キーは押しっぱなしで歩き続け、速度変更は押した瞬間だけ反応するよ。
pub fn get_player_actions(input: &WinitInputHelper) -> Vec<PlayerAction> {
  let mut actions = Vec::new();
  if input.key_held(KeyCode::KeyW) || input.key_held(KeyCode::ArrowUp) { actions.push(PlayerAction::MoveUp); }
  if input.key_held(KeyCode::KeyS) || input.key_held(KeyCode::ArrowDown) { actions.push(PlayerAction::MoveDown); }
  if input.key_held(KeyCode::KeyA) || input.key_held(KeyCode::ArrowLeft) { actions.push(PlayerAction::MoveLeft); }
  if input.key_held(KeyCode::KeyD) || input.key_held(KeyCode::ArrowRight) { actions.push(PlayerAction::MoveRight); }
  if input.key_pressed(KeyCode::Equal) { actions.push(PlayerAction::SpeedUp); }
  if input.key_pressed(KeyCode::Minus) { actions.push(PlayerAction::SlowDown); }
  actions
}

const SPEED_KEYS: [KeyCode; 9] = [
  KeyCode::Digit0,
  KeyCode::Digit1,
  KeyCode::Digit2,
  KeyCode::Digit3,
  KeyCode::Digit4,
  KeyCode::Digit5,
  KeyCode::Digit6,
  KeyCode::Digit7,
  KeyCode::Digit8,
];

/// カメラ命令に割り当てたキーが押されたら、その命令を返す。
///
/// E: 有効 / Q: 無効 / R: カメラを戻す / 0-8: 速度
pub fn get_camera_command(input: &WinitInputHelper) -> Option<Command> {
  if input.key_pressed(KeyCode::KeyE) {
    return Some(Command::EnableLookAhead);
  }
  if input.key_pressed(KeyCode::KeyQ) {
    return Some(Command::DisableLookAhead);
  }
  if input.key_pressed(KeyCode::KeyR) {
    return Some(Command::RestoreCamera);
  }
  SPEED_KEYS
    .iter()
    .position(|&key| input.key_pressed(key))
    .map(|speed| Command::SetLookAheadSpeed(speed as f32))
}
