use lookahead::config::LookAheadConfig;
use lookahead::core::command::Command;
use lookahead::core::direction::Direction;
use lookahead::core::host::{MapScroll, PlayerState};
use lookahead::core::map::{ScrollMap, Tile};
use lookahead::core::player::{Player, PlayerAction};
use lookahead::core::session::Session;

fn open_field(config: LookAheadConfig) -> Session {
  let map = ScrollMap::new(40, 30, Tile::Grass).with_screen_tiles(17.0, 13.0);
  Session::new(config, map, Player::new(20, 15)).unwrap()
}

fn idle(session: &mut Session, frames: usize) {
  for _ in 0..frames {
    session.update(&[]);
  }
}

fn walk_one_tile(session: &mut Session, action: PlayerAction) {
  session.update(&[action]);
  while session.player.is_moving() {
    session.update(&[]);
  }
}

#[test]
fn walking_away_recenters_then_looks_ahead_again() {
  let mut s = open_field(LookAheadConfig::default());
  idle(&mut s, 30);
  assert_eq!(s.camera().camera_offset, Direction::Down);
  assert_eq!(s.map.display_y(), 10.0);

  // 上へ歩くと、追従と復帰の両方で画面が戻る
  walk_one_tile(&mut s, PlayerAction::MoveUp);
  assert_eq!(s.camera().camera_offset, Direction::None);
  assert!(s.camera().pending_offset_check);
  assert_eq!(s.player.position(), (20, 14));

  // 復帰スクロールが終わったその同じフレームで、今度は上に先読みし始める
  idle(&mut s, 1);
  assert_eq!(s.map.display_y(), 8.0);
  assert_eq!(s.camera().camera_offset, Direction::Up);
  assert!(s.map.is_scrolling());

  idle(&mut s, 30);
  assert!(!s.map.is_scrolling());
  assert_eq!(s.map.display_y(), 7.0);
}

#[test]
fn disabled_camera_keeps_its_offset_while_walking() {
  let mut s = open_field(LookAheadConfig::default());
  idle(&mut s, 30);
  assert_eq!(s.map.display_y(), 10.0);

  // 無効にしても戻さない。画面は追従の分だけ動く
  s.command_sender().send(Command::DisableLookAhead).unwrap();
  walk_one_tile(&mut s, PlayerAction::MoveUp);
  idle(&mut s, 30);
  assert_eq!(s.camera().camera_offset, Direction::Down);
  assert!(!s.map.is_scrolling());
  assert_eq!(s.map.display_y(), 9.0);
}

#[test]
fn walking_into_the_offset_needs_no_extra_scroll() {
  let mut s = open_field(LookAheadConfig::default());
  idle(&mut s, 30);
  assert_eq!(s.map.display_y(), 10.0);

  walk_one_tile(&mut s, PlayerAction::MoveDown);
  assert_eq!(s.camera().camera_offset, Direction::None);
  assert_eq!(s.player.position(), (20, 16));
  // プレイヤーが画面中央に追いついた
  assert_eq!(s.map.display_y(), 10.0);
  assert!(!s.map.is_scrolling());
}

#[test]
fn turning_in_place_keeps_the_current_offset() {
  let mut map = ScrollMap::new(40, 30, Tile::Grass).with_screen_tiles(17.0, 13.0);
  map.set_tile(21, 15, Tile::Rock);
  let mut s = Session::new(LookAheadConfig::default(), map, Player::new(20, 15)).unwrap();
  idle(&mut s, 30);
  assert_eq!(s.map.display_y(), 10.0);

  // 岩に向かって向きだけ変えても、今のオフセットはそのまま
  s.update(&[PlayerAction::MoveRight]);
  assert_eq!(s.player.facing(), Direction::Right);
  assert!(!s.player.is_moving());
  idle(&mut s, 30);
  assert_eq!(s.camera().camera_offset, Direction::Down);
  assert_eq!(s.map.display_x(), 12.0);
}

#[test]
fn map_edge_blocks_look_ahead() {
  let map = ScrollMap::new(40, 30, Tile::Grass).with_screen_tiles(17.0, 13.0);
  // 上端近くで上を向く
  let mut s = Session::new(LookAheadConfig::default(), map, Player::new(20, 3)).unwrap();
  assert_eq!(s.map.display_y(), 0.0);
  s.update(&[PlayerAction::MoveUp]);
  while s.player.is_moving() {
    s.update(&[]);
  }
  // 画面が上端に張りついているので上には先読みしない
  idle(&mut s, 30);
  assert_eq!(s.player.facing(), Direction::Up);
  assert_eq!(s.camera().camera_offset, Direction::None);
  assert_eq!(s.map.display_y(), 0.0);
}

#[test]
fn disable_and_restore_from_another_thread() {
  let mut s = open_field(LookAheadConfig { enabled_by_default: true, speed: 6.0 });
  idle(&mut s, 10);
  assert_eq!(s.camera().camera_offset, Direction::Down);
  assert_eq!(s.map.display_y(), 10.0);

  let tx = s.command_sender();
  std::thread::spawn(move || {
    tx.send_text("DisableLookAhead").unwrap();
    tx.send_text("RestoreCamera").unwrap();
  })
  .join()
  .unwrap();

  idle(&mut s, 10);
  assert!(!s.camera().enabled);
  assert!(!s.camera().restoring);
  assert_eq!(s.camera().camera_offset, Direction::None);
  assert_eq!(s.map.display_y(), 9.0);

  // 無効なので止まっていてもずれない
  idle(&mut s, 20);
  assert_eq!(s.map.display_y(), 9.0);
}

#[test]
fn speed_zero_uses_the_player_speed() {
  let mut s = open_field(LookAheadConfig { enabled_by_default: true, speed: 8.0 });
  s.command_sender().send(Command::SetLookAheadSpeed(0.0)).unwrap();
  s.player.move_speed = 5.0;
  // 速度5なら 1/8 タイルずつ、8フレームで1タイル
  idle(&mut s, 2);
  assert!(s.map.is_scrolling());
  idle(&mut s, 7);
  assert!(s.map.is_scrolling());
  idle(&mut s, 1);
  assert!(!s.map.is_scrolling());
  assert_eq!(s.map.display_y(), 10.0);
}
