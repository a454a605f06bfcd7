//! src/config.rs
//!
//! 先読みカメラの起動時設定。JSON ファイルか、プラグインパラメータ形式の
//! 文字列マップから読み込めるよ。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// スクロール速度の上限。これ以上はほぼ一瞬で、カメラが飛びすぎちゃう。
pub const MAX_SPEED: f32 = 8.0;

const PARAM_ENABLED: &str = "Enable by default";
const PARAM_SPEED: &str = "Speed";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("camera scroll speed cannot be negative (got {0})")]
  NegativeSpeed(f32),

  #[error("failed to read config {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config: {0}")]
  Json(#[from] serde_json::Error),
}

/// 起動時に渡される設定。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookAheadConfig {
  /// ゲーム開始時に先読みを有効にするか。
  pub enabled_by_default: bool,
  /// スクロール速度。0 ならプレイヤーの移動速度に合わせる。
  pub speed: f32,
}

impl Default for LookAheadConfig {
  fn default() -> Self {
    Self {
      enabled_by_default: true,
      speed: 0.0,
    }
  }
}

impl LookAheadConfig {
  /// JSON ファイルから読み込んで検証する。
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&text)
  }

  pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
    let config: LookAheadConfig = serde_json::from_str(text)?;
    config.validate()
  }

  /// `"Enable by default"` / `"Speed"` をキーに持つパラメータマップから作る。
  ///
  /// `"Enable by default"` はちょうど `"true"` のときだけ有効。
  /// `"Speed"` が無いか空文字なら 0、数値として読めなければ NaN になるよ。
  /// NaN は使うときにプレイヤーの移動速度として扱われる。
  pub fn from_parameters(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
    let enabled_by_default = params.get(PARAM_ENABLED).map(String::as_str) == Some("true");

    let speed = match params.get(PARAM_SPEED).map(|s| s.trim()) {
      None | Some("") => 0.0,
      Some(raw) => raw.parse::<f32>().unwrap_or(f32::NAN),
    };

    Self { enabled_by_default, speed }.validate()
  }

  /// 負の速度はエラー、上限を超えた速度は黙って丸める。
  pub fn validate(self) -> Result<Self, ConfigError> {
    if self.speed < 0.0 {
      return Err(ConfigError::NegativeSpeed(self.speed));
    }
    if self.speed > MAX_SPEED {
      warn!(speed = self.speed, max = MAX_SPEED, "camera speed clamped");
      return Ok(Self { speed: MAX_SPEED, ..self });
    }
    Ok(self)
  }
}
