// src/core/generation.rs

use noise::{NoiseFn, OpenSimplex};
use rand::Rng;

use crate::core::map::{ScrollMap, Tile};

/// 地形を生成するときのパラメータ。
#[derive(Debug, Clone, Copy)]
pub struct MapOptions {
  pub width: i32,
  pub height: i32,
  pub loop_horizontal: bool,
  pub loop_vertical: bool,
}

impl Default for MapOptions {
  fn default() -> Self {
    Self {
      width: 64,
      height: 48,
      loop_horizontal: false,
      loop_vertical: false,
    }
  }
}

/// ノイズで島っぽいマップを作る。
///
/// # Arguments
/// * `options` - マップの大きさとループ設定。
/// * `rng` - シード済みの乱数生成器。ノイズのシードはここから引くよ。
pub fn generate_map(options: &MapOptions, rng: &mut impl Rng) -> ScrollMap {
  let mut map = ScrollMap::new(options.width, options.height, Tile::Grass)
    .with_loop(options.loop_horizontal, options.loop_vertical);

  // 標高で水・砂・草・岩を決めて、湿度で森を散らす
  let elevation = OpenSimplex::new(rng.random::<u32>());
  let moisture = OpenSimplex::new(rng.random::<u32>());
  let elevation_scale = 0.08;
  let moisture_scale = 0.15;

  for y in 0..map.height() {
    for x in 0..map.width() {
      let e = elevation.get([x as f64 * elevation_scale, y as f64 * elevation_scale]);
      let m = moisture.get([x as f64 * moisture_scale, y as f64 * moisture_scale]);
      let tile = if e < -0.35 {
        Tile::Water
      } else if e < -0.25 {
        Tile::Sand
      } else if e > 0.55 {
        Tile::Rock
      } else if m > 0.3 {
        Tile::Forest
      } else {
        Tile::Grass
      };
      map.set_tile(x, y, tile);
    }
  }
  map
}

/// (x, y) から近い順に、歩けるタイルを探す。見つからなければ (x, y) をそのまま返す。
pub fn find_spawn(map: &ScrollMap, x: i32, y: i32) -> (i32, i32) {
  let max_radius = map.width().max(map.height());
  for radius in 0..=max_radius {
    for dy in -radius..=radius {
      for dx in -radius..=radius {
        if dx.abs() != radius && dy.abs() != radius {
          continue; // 外周だけ調べる
        }
        let (cx, cy) = (x + dx, y + dy);
        if cx < 0 || cy < 0 || cx >= map.width() || cy >= map.height() {
          continue;
        }
        if map.is_passable(cx, cy) {
          return (cx, cy);
        }
      }
    }
  }
  (x, y)
}
