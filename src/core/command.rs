//! 外部から届くカメラ命令と、それを運ぶチャンネル。

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;

use thiserror::Error;
use tracing::warn;

/// 先読みカメラへの命令。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
  EnableLookAhead,
  DisableLookAhead,
  RestoreCamera,
  /// 速度を設定する。ここでは範囲チェックしないよ。
  SetLookAheadSpeed(f32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
  #[error("empty command")]
  Empty,

  #[error("unknown command: {0}")]
  Unknown(String),

  #[error("command channel is closed")]
  Disconnected,
}

impl FromStr for Command {
  type Err = CommandError;

  /// `"Name [arg]"` 形式をパースする。
  ///
  /// `SetLookAheadSpeed` の引数が無い、または数値でないときは NaN になる。
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.split_whitespace();
    let name = parts.next().ok_or(CommandError::Empty)?;
    match name {
      "EnableLookAhead" => Ok(Command::EnableLookAhead),
      "DisableLookAhead" => Ok(Command::DisableLookAhead),
      "RestoreCamera" => Ok(Command::RestoreCamera),
      "SetLookAheadSpeed" => {
        let speed = parts
          .next()
          .and_then(|arg| arg.parse::<f32>().ok())
          .unwrap_or(f32::NAN);
        Ok(Command::SetLookAheadSpeed(speed))
      }
      other => Err(CommandError::Unknown(other.to_string())),
    }
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Command::EnableLookAhead => write!(f, "EnableLookAhead"),
      Command::DisableLookAhead => write!(f, "DisableLookAhead"),
      Command::RestoreCamera => write!(f, "RestoreCamera"),
      Command::SetLookAheadSpeed(speed) => write!(f, "SetLookAheadSpeed {speed}"),
    }
  }
}

/// 命令の送信側。クローンして別スレッドに渡してもいいよ。
#[derive(Debug, Clone)]
pub struct CommandSender {
  tx: mpsc::Sender<Command>,
}

/// 命令の受信側。フレームの頭でまとめて取り出す。
#[derive(Debug)]
pub struct CommandReceiver {
  rx: mpsc::Receiver<Command>,
}

/// 新しい命令チャンネルを作る。
pub fn command_channel() -> (CommandSender, CommandReceiver) {
  let (tx, rx) = mpsc::channel();
  (CommandSender { tx }, CommandReceiver { rx })
}

impl CommandSender {
  pub fn send(&self, command: Command) -> Result<(), CommandError> {
    self.tx.send(command).map_err(|_| CommandError::Disconnected)
  }

  /// テキスト形式の命令を送る。パースできない命令は警告だけ出して捨てる。
  pub fn send_text(&self, line: &str) -> Result<(), CommandError> {
    match line.parse::<Command>() {
      Ok(command) => self.send(command),
      Err(CommandError::Empty) => Ok(()),
      Err(err) => {
        warn!(line, %err, "ignoring camera command");
        Err(err)
      }
    }
  }
}

impl CommandReceiver {
  /// 今たまっている命令を全部取り出す。ブロックはしない。
  pub fn drain(&self) -> impl Iterator<Item = Command> + '_ {
    self.rx.try_iter()
  }
}
