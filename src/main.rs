//! lookahead ビューア
//!
//! 生成したマップの上をプレイヤーで歩き回って、先読みカメラの動きを確かめるよ。
//!
//! 操作:
//! - WASD / 矢印キー: 移動
//! - `+` / `-`: プレイヤーの移動速度
//! - E / Q: 先読みの有効・無効
//! - R: カメラをプレイヤー中心に戻す
//! - 0-8: カメラのスクロール速度 (0 はプレイヤーと同じ)
//!
//! 標準入力からも `SetLookAheadSpeed 3` のような命令を送れる。

mod app;
mod input;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use lookahead::config::LookAheadConfig;
use lookahead::core::generation::MapOptions;
use lookahead::core::map::MAX_MAP_SIDE;

#[derive(Parser, Debug)]
#[command(name = "lookahead-viewer")]
#[command(author, version, about, long_about = None)]
struct Args {
  /// 設定ファイル (JSON)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// マップ生成のシード。省略するとランダム
  #[arg(long)]
  seed: Option<u64>,

  /// マップの幅 (タイル)
  #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(i32).range(1..=MAX_MAP_SIDE as i64))]
  map_width: i32,

  /// マップの高さ (タイル)
  #[arg(long, default_value_t = 48, value_parser = clap::value_parser!(i32).range(1..=MAX_MAP_SIDE as i64))]
  map_height: i32,

  /// 横方向にループするマップにする
  #[arg(long)]
  loop_horizontal: bool,

  /// 縦方向にループするマップにする
  #[arg(long)]
  loop_vertical: bool,

  /// カメラのスクロール速度 (設定ファイルより優先)
  #[arg(long)]
  speed: Option<f32>,

  /// 先読みを無効の状態で始める
  #[arg(long)]
  disabled: bool,
}

impl Args {
  fn look_ahead_config(&self) -> Result<LookAheadConfig, lookahead::config::ConfigError> {
    let mut config = match &self.config {
      Some(path) => LookAheadConfig::load(path)?,
      None => LookAheadConfig::default(),
    };
    if let Some(speed) = self.speed {
      config.speed = speed;
    }
    if self.disabled {
      config.enabled_by_default = false;
    }
    config.validate()
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();
  let config = args.look_ahead_config()?;

  let options = app::RunOptions {
    config,
    map: MapOptions {
      width: args.map_width,
      height: args.map_height,
      loop_horizontal: args.loop_horizontal,
      loop_vertical: args.loop_vertical,
    },
    seed: args.seed.unwrap_or_else(|| rand::rng().random()),
  };

  app::run(options)
}
