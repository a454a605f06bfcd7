//! src/core/controller.rs
//!
//! 先読みカメラの本体。プレイヤーが立ち止まったら、向いている方向へ
//! 画面を1タイルぶんずらして、歩き出したら元に戻すよ。

use tracing::{debug, info};

use crate::config::{ConfigError, LookAheadConfig};
use crate::core::command::Command;
use crate::core::direction::{can_offset_toward, Direction};
use crate::core::host::{MapScroll, PlayerState};

/// 1回のオフセットでずらすタイル数。
pub const OFFSET_DISTANCE: u32 = 1;

/// コントローラの状態。セッション中ずっと生きていて、保存はされない。
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
  pub enabled: bool,
  /// 0 (または NaN) ならプレイヤーの移動速度を使う。
  pub speed: f32,
  /// 画面がプレイヤー中心からどっちにずれているか。
  pub camera_offset: Direction,
  /// 「止まったかも」を次のフレームで確かめるためのフラグ。
  pub pending_offset_check: bool,
  /// `RestoreCamera` を受けて、まだ戻しきれていない間は true。
  pub restoring: bool,
}

impl ControllerState {
  pub fn new(config: &LookAheadConfig) -> Self {
    Self {
      enabled: config.enabled_by_default,
      speed: config.speed,
      camera_offset: Direction::None,
      pending_offset_check: false,
      restoring: false,
    }
  }

  /// 実際にスクロールに使う速度。使う瞬間に決めるので保存はしない。
  pub fn resolve_speed(&self, player_speed: f32) -> f32 {
    if self.speed == 0.0 || self.speed.is_nan() {
      player_speed
    } else {
      self.speed
    }
  }
}

/// 毎フレーム呼ばれる先読みカメラのコントローラ。
#[derive(Debug)]
pub struct LookAheadController {
  state: ControllerState,
}

impl LookAheadController {
  /// 設定を検証してからコントローラを作る。負の速度はここで弾かれるよ。
  pub fn new(config: LookAheadConfig) -> Result<Self, ConfigError> {
    let config = config.validate()?;
    Ok(Self {
      state: ControllerState::new(&config),
    })
  }

  pub fn state(&self) -> &ControllerState {
    &self.state
  }

  /// 外部命令を反映する。フレーム更新の途中で呼ばないこと。
  pub fn apply(&mut self, command: Command) {
    info!(%command, "camera command");
    match command {
      Command::EnableLookAhead => self.state.enabled = true,
      // 無効にしてもカメラは戻さない。戻したいなら RestoreCamera を送ってね
      Command::DisableLookAhead => self.state.enabled = false,
      Command::RestoreCamera => self.state.restoring = true,
      Command::SetLookAheadSpeed(speed) => self.state.speed = speed,
    }
  }

  /// 1フレーム分の更新。プレイヤー自身の更新が終わったあとに呼ぶ。
  pub fn update(&mut self, player: &impl PlayerState, map: &mut impl MapScroll) {
    // 1. 復帰処理中は通常のロジックを止める
    if self.state.restoring {
      // もともと中心にいてスクロールも止まっていれば、それで完了
      let done = self.restore(player, map)
        || (self.state.camera_offset.is_none() && !map.is_scrolling());
      if done {
        debug!("camera restore finished");
        self.state.restoring = false;
      }
      return;
    }

    // 2. 無効なら何もしない
    if !self.state.enabled {
      return;
    }

    // 3. 前のフレームで止まっていたら、ここで本当にずらすか決める
    if self.state.pending_offset_check {
      if map.is_scrolling() {
        return;
      }
      let facing = player.facing();
      if !player.is_moving() && can_offset_toward(map, facing) {
        let speed = self.state.resolve_speed(player.move_speed());
        debug!(?facing, speed, "offsetting camera");
        map.start_scroll(facing, OFFSET_DISTANCE, speed);
        self.state.camera_offset = facing;
      }
      self.state.pending_offset_check = false;
    }

    // 4. 止まったばかりなら判断を次のフレームに回す
    if !player.is_moving() && self.state.camera_offset.is_none() {
      self.state.pending_offset_check = true;
    } else if player.is_moving() {
      // 5. 歩き出したらその場で戻す
      self.restore(player, map);
    }
  }

  /// カメラをプレイヤー中心に戻す。戻したら true。
  ///
  /// ずれていない、またはスクロール中なら何もせず false を返す。
  /// ずれている方向へそのまま歩いているときはスクロールを出さずに
  /// 状態だけ戻す。プレイヤーの移動で画面が追いつくからね。
  pub fn restore(&mut self, player: &impl PlayerState, map: &mut impl MapScroll) -> bool {
    let offset = self.state.camera_offset;
    if offset.is_none() || map.is_scrolling() {
      return false;
    }
    if offset != player.facing() || !player.is_moving() {
      let speed = self.state.resolve_speed(player.move_speed());
      debug!(?offset, speed, "restoring camera");
      map.start_scroll(offset.reverse(), OFFSET_DISTANCE, speed);
    } else {
      debug!(?offset, "camera catches up with movement");
    }
    self.state.camera_offset = Direction::None;
    true
  }
}
