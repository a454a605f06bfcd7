//! src/core/session.rs
//!
//! プレイヤー・マップ・先読みカメラをまとめて、1フレームの順番を決めるよ。
//!
//! 1フレームの流れ:
//! 1. たまっているカメラ命令を全部反映
//! 2. マップのスクロールアニメーションを進める
//! 3. プレイヤーを動かして、画面を追従させる
//! 4. 先読みカメラを更新

use tracing::trace;

use crate::config::{ConfigError, LookAheadConfig};
use crate::core::command::{command_channel, CommandReceiver, CommandSender};
use crate::core::controller::{ControllerState, LookAheadController};
use crate::core::map::ScrollMap;
use crate::core::player::{self, Player, PlayerAction};

pub struct Session {
  pub player: Player,
  pub map: ScrollMap,
  controller: LookAheadController,
  sender: CommandSender,
  commands: CommandReceiver,
  frame: u64,
}

impl Session {
  /// 設定を検証してからセッションを作る。プレイヤーが画面中央に来るようにしておくよ。
  pub fn new(config: LookAheadConfig, mut map: ScrollMap, player: Player) -> Result<Self, ConfigError> {
    // 命令チャンネルより先に設定を検証する
    let controller = LookAheadController::new(config)?;
    let (sender, commands) = command_channel();
    map.center_on(player.real_x, player.real_y);
    Ok(Self {
      player,
      map,
      controller,
      sender,
      commands,
      frame: 0,
    })
  }

  /// 命令の送信口。クローンして好きなところから送ってね。
  pub fn command_sender(&self) -> CommandSender {
    self.sender.clone()
  }

  pub fn camera(&self) -> &ControllerState {
    self.controller.state()
  }

  pub fn frame(&self) -> u64 {
    self.frame
  }

  /// 1フレーム進める。
  pub fn update(&mut self, actions: &[PlayerAction]) {
    for command in self.commands.drain() {
      self.controller.apply(command);
    }

    self.map.update_scroll();

    let last = (self.map.adjust_x(self.player.real_x), self.map.adjust_y(self.player.real_y));
    player::update(&mut self.player, &self.map, actions);
    self.map.follow(last, self.player.real_pos());

    self.controller.update(&self.player, &mut self.map);

    self.frame += 1;
    trace!(frame = self.frame, offset = ?self.controller.state().camera_offset, "frame done");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::command::Command;
  use crate::core::direction::Direction;
  use crate::core::map::Tile;

  fn session() -> Session {
    let map = ScrollMap::new(40, 30, Tile::Grass).with_screen_tiles(17.0, 13.0);
    Session::new(LookAheadConfig::default(), map, Player::new(20, 15)).unwrap()
  }

  #[test]
  fn starts_centered_on_player() {
    let s = session();
    assert_eq!((s.map.display_x(), s.map.display_y()), (12.0, 9.0));
    assert_eq!(s.camera().camera_offset, Direction::None);
  }

  #[test]
  fn rejects_negative_speed_before_any_frame() {
    let map = ScrollMap::new(40, 30, Tile::Grass);
    let result = Session::new(
      LookAheadConfig { enabled_by_default: true, speed: -1.0 },
      map,
      Player::new(1, 1),
    );
    assert!(matches!(result, Err(ConfigError::NegativeSpeed(_))));
  }

  #[test]
  fn commands_apply_at_start_of_next_frame() {
    let mut s = session();
    let tx = s.command_sender();
    tx.send(Command::DisableLookAhead).unwrap();
    assert!(s.camera().enabled);
    s.update(&[]);
    assert!(!s.camera().enabled);
    // 無効になっているので保留フラグも立たない
    assert!(!s.camera().pending_offset_check);
  }

  #[test]
  fn idle_player_gets_look_ahead() {
    let mut s = session();
    for _ in 0..40 {
      s.update(&[]);
    }
    // 初期向きは下なので1タイル下にずれる
    assert_eq!(s.camera().camera_offset, Direction::Down);
    assert_eq!(s.map.display_y(), 10.0);
    assert_eq!(s.frame(), 40);
  }
}
