// src/render.rs

use palette::{FromColor, Hsl, RgbHue, Srgb};
use rayon::prelude::*;

use crate::core::direction::Direction;
use crate::core::map::{ScrollMap, Tile};
use crate::core::player::Player;

/// 1タイルの大きさ (ピクセル)。
pub const TILE_PX: usize = 16;

/// マップの外側を塗る色。
const BACKGROUND: [u8; 4] = [20, 20, 30, 255];
// プレイヤーの色（目立つようにピンク！）
const PLAYER_COLOR: [u8; 4] = [255, 0, 255, 255];
const NOSE_COLOR: [u8; 4] = [255, 255, 255, 255];

/// タイルの色をまとめて持っておく。ピクセルごとに色変換するのは重いからね。
#[derive(Debug, Clone)]
pub struct TilePalette {
  // [タイル][市松模様の明暗]
  colors: [[[u8; 4]; 2]; Tile::ALL.len()],
}

impl Default for TilePalette {
  fn default() -> Self {
    Self::new()
  }
}

impl TilePalette {
  pub fn new() -> Self {
    let mut colors = [[[0; 4]; 2]; Tile::ALL.len()];
    for (i, tile) in Tile::ALL.iter().enumerate() {
      let (hue, saturation, lightness) = match tile {
        Tile::Water => (215.0, 0.65, 0.45),
        Tile::Sand => (45.0, 0.55, 0.70),
        Tile::Grass => (110.0, 0.45, 0.45),
        Tile::Forest => (135.0, 0.50, 0.25),
        Tile::Rock => (30.0, 0.08, 0.45),
      };
      // スクロールが見えるように、隣り合うタイルの明るさを少し変える
      colors[i][0] = hsl_to_rgba(hue, saturation, lightness);
      colors[i][1] = hsl_to_rgba(hue, saturation, lightness - 0.04);
    }
    Self { colors }
  }

  pub fn color(&self, tile: Tile, odd: bool) -> [u8; 4] {
    self.colors[tile as usize][odd as usize]
  }
}

fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> [u8; 4] {
  let hsl = Hsl::new(RgbHue::from_degrees(hue), saturation, lightness);
  let rgb: Srgb<u8> = Srgb::from_color(hsl).into_format();
  [rgb.red, rgb.green, rgb.blue, 255]
}

/// ビューポートのピクセルサイズ。
pub fn viewport_size(map: &ScrollMap) -> (u32, u32) {
  let width = (map.screen_tiles_x() * TILE_PX as f32).round() as u32;
  let height = (map.screen_tiles_y() * TILE_PX as f32).round() as u32;
  (width.max(1), height.max(1))
}

/// 表示位置から見えるマップとプレイヤーを `frame` (RGBA) に描く。
pub fn draw_frame(map: &ScrollMap, player: &Player, palette: &TilePalette, frame: &mut [u8], width: usize) {
  let tile_px = TILE_PX as f32;
  let display_x = map.display_x();
  let display_y = map.display_y();

  // 行ごとに並列で塗る
  frame.par_chunks_exact_mut(width * 4).enumerate().for_each(|(screen_y, row)| {
    let ty = (display_y + screen_y as f32 / tile_px).floor() as i32;
    for screen_x in 0..width {
      let tx = (display_x + screen_x as f32 / tile_px).floor() as i32;
      let color = match map.tile(tx, ty) {
        Some(tile) => palette.color(tile, (map.round_x(tx) + map.round_y(ty)) & 1 == 1),
        None => BACKGROUND,
      };
      row[screen_x * 4..screen_x * 4 + 4].copy_from_slice(&color);
    }
  });

  // --- プレイヤーの描画 ---
  let height = frame.len() / (width * 4);
  let left = (map.adjust_x(player.real_x) * tile_px).round() as isize;
  let top = (map.adjust_y(player.real_y) * tile_px).round() as isize;
  let inset = 2;
  let size = TILE_PX as isize;
  fill_rect(frame, width, height, left + inset, top + inset, size - inset * 2, size - inset * 2, PLAYER_COLOR);

  // 向いている方向に小さな印をつける
  let nose = 4;
  let mid = (size - nose) / 2;
  let (nx, ny) = match player.direction {
    Direction::Up => (left + mid, top + inset),
    Direction::Down => (left + mid, top + size - inset - nose),
    Direction::Left => (left + inset, top + mid),
    Direction::Right => (left + size - inset - nose, top + mid),
    Direction::None => return,
  };
  fill_rect(frame, width, height, nx, ny, nose, nose, NOSE_COLOR);
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(
  frame: &mut [u8],
  width: usize,
  height: usize,
  x: isize,
  y: isize,
  w: isize,
  h: isize,
  color: [u8; 4],
) {
  for py in y..y + h {
    for px in x..x + w {
      // 画面外ははみ出さないようにスキップ
      if px >= 0 && px < width as isize && py >= 0 && py < height as isize {
        let i = (py as usize * width + px as usize) * 4;
        frame[i..i + 4].copy_from_slice(&color);
      }
    }
  }
}
