//! src/app.rs
//!
//! 先読みカメラを実際に動かして眺めるためのビューア。

use std::error::Error;
use std::io::BufRead;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use lookahead::config::LookAheadConfig;
use lookahead::core::command::{CommandError, CommandSender};
use lookahead::core::generation::{find_spawn, generate_map, MapOptions};
use lookahead::core::player::{Player, PlayerAction};
use lookahead::core::session::Session;
use lookahead::render::{self, TilePalette};

use crate::input;
use crate::ui;

/// ゲームは 60fps 固定で進める。
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);
/// 処理が遅れても1回の描画で進めるフレームはここまで。
const MAX_STEPS_PER_REDRAW: u32 = 5;
/// ウィンドウはビューポートの何倍で開くか。
const WINDOW_SCALE: f64 = 3.0;

/// ビューアの起動オプション。
#[derive(Debug, Clone)]
pub struct RunOptions {
  pub config: LookAheadConfig,
  pub map: MapOptions,
  pub seed: u64,
}

/// 標準入力から1行ずつカメラ命令を読むスレッドを立てる。
///
/// 例: `SetLookAheadSpeed 3`
fn spawn_console(sender: CommandSender) {
  std::thread::spawn(move || {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
      let Ok(line) = line else { break };
      match sender.send_text(&line) {
        Ok(()) => {}
        Err(CommandError::Disconnected) => break,
        // パースできなかった命令はもう警告済み
        Err(_) => {}
      }
    }
  });
}

/// ウィンドウを開いてメインループを回す。
pub fn run(options: RunOptions) -> Result<(), Box<dyn Error>> {
  let mut rng = StdRng::seed_from_u64(options.seed);
  let map = generate_map(&options.map, &mut rng);
  let (spawn_x, spawn_y) = find_spawn(&map, map.width() / 2, map.height() / 2);
  let mut session = Session::new(options.config, map, Player::new(spawn_x, spawn_y))?;
  info!(
    seed = options.seed,
    width = session.map.width(),
    height = session.map.height(),
    loop_horizontal = session.map.is_loop_horizontal(),
    loop_vertical = session.map.is_loop_vertical(),
    "map generated"
  );

  spawn_console(session.command_sender());
  let sender = session.command_sender();

  let event_loop = EventLoop::new()?;
  let mut input = WinitInputHelper::new();

  let (view_width, view_height) = render::viewport_size(&session.map);
  let window = {
    let size = LogicalSize::new(view_width as f64 * WINDOW_SCALE, view_height as f64 * WINDOW_SCALE);
    Arc::new(
      WindowBuilder::new()
        .with_title("lookahead")
        .with_inner_size(size)
        .with_min_inner_size(LogicalSize::new(view_width as f64, view_height as f64))
        .build(&event_loop)?,
    )
  };

  let mut pixels = {
    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window.clone());
    Pixels::new(view_width, view_height, surface_texture)?
  };

  let palette = TilePalette::new();
  let mut title = String::new();
  let mut last_time = Instant::now();
  let mut lag = Duration::ZERO;
  let mut queued: Vec<PlayerAction> = Vec::new();

  event_loop.run(move |event, elwt| {
    if let Event::WindowEvent { event: WindowEvent::RedrawRequested, .. } = event {
      render::draw_frame(&session.map, &session.player, &palette, pixels.frame_mut(), view_width as usize);
      if let Err(err) = pixels.render() {
        error!(%err, "pixels.render failed");
        elwt.exit();
        return;
      }
    }

    if input.update(&event) {
      if input.key_pressed(KeyCode::Escape) || input.close_requested() {
        elwt.exit();
        return;
      }

      if let Some(size) = input.window_resized() {
        if let Err(err) = pixels.resize_surface(size.width, size.height) {
          error!(%err, "pixels.resize_surface failed");
          elwt.exit();
          return;
        }
      }

      if let Some(command) = input::get_camera_command(&input) {
        if let Err(err) = sender.send(command) {
          warn!(%err, "camera command dropped");
        }
      }

      // 移動は押している間ずっと、速度変更は次に進むフレームで1回だけ効かせる
      let (moves, others): (Vec<PlayerAction>, Vec<PlayerAction>) = input::get_player_actions(&input)
        .into_iter()
        .partition(|action| action.direction().is_some());
      queued.extend(others);

      let now = Instant::now();
      lag += now.duration_since(last_time);
      last_time = now;

      let mut steps = 0;
      while lag >= FRAME && steps < MAX_STEPS_PER_REDRAW {
        if queued.is_empty() {
          session.update(&moves);
        } else {
          let mut actions = std::mem::take(&mut queued);
          actions.extend_from_slice(&moves);
          session.update(&actions);
        }
        lag -= FRAME;
        steps += 1;
      }
      if steps == MAX_STEPS_PER_REDRAW {
        lag = Duration::ZERO;
      }

      let next = ui::window_title(options.seed, session.camera(), session.player.move_speed);
      ui::update_window_title(&window, &mut title, next);
      window.request_redraw();
    }
  })?;

  Ok(())
}
