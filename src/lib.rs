//! Hexagonal Map Generator
//!
//! Procedural hex-map generation for the microgrid settlement game:
//!
//! - Arena-based tile storage (no Rc<RefCell<T>>), indexed by integer axial
//!   coordinates
//! - Random-cosine-series noise fields drive terrain and resource rolls
//! - Majority smoothing, forced Ocean borders, and lake/ocean continuity
//!   enforcement produce the final map

pub mod config;
pub mod coords;
pub mod geometry;
pub mod layout;
pub mod map;
pub mod noise_field;
pub mod terrain;
pub mod tile;
pub mod visualizer;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

use map::HexMap;
use tile::{ResourceQuality, TerrainType};

// Re-export the unified config
pub use config::GenerationConfig;

/// Errors that abort a generation run.
///
/// Classification never hands back a partially built map: the first contract
/// violation unwinds the whole call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// A threshold mapping received a value outside the unit interval.
    /// Clamping here would mask bugs in noise normalization, so it is a
    /// hard failure instead.
    #[error("noise-derived value {value} outside [0, 1]")]
    NoiseOutOfRange { value: f64 },
}

/// Generate a complete map using the unified configuration.
pub fn generate_map_with_config(config: &GenerationConfig) -> Result<HexMap, GenerationError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);

    // Step 1: Lay out the lattice
    let mut map = layout::build_lattice(config);

    // Step 2: Classification passes (seed, smooth, borders, continuity,
    // resources)
    terrain::classify(&mut map, config, &mut rng)?;

    Ok(map)
}

/// Deterministic successor seed for rerolls (LCG step).
fn advance_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
}

impl HexMap {
    /// Tear the map down and rebuild it with the same shape parameters and
    /// the next seed in the reroll sequence.
    pub fn reroll(&mut self) -> Result<(), GenerationError> {
        let mut config = self.config.clone();
        config.seed = advance_seed(config.seed);
        *self = generate_map_with_config(&config)?;
        Ok(())
    }
}

/// Statistics report for a generated map.
#[derive(Debug, Clone)]
pub struct MapStats {
    pub total_tiles: usize,
    pub border_tiles: usize,
    pub water_tiles: usize,
    pub land_tiles: usize,
    pub land_percentage: f64,
    pub terrain_counts: std::collections::HashMap<TerrainType, usize>,
    pub resource_counts: std::collections::HashMap<ResourceQuality, usize>,
}

/// Generate a statistics report for a map.
pub fn generate_map_stats(map: &HexMap) -> MapStats {
    use std::collections::HashMap;

    let total_tiles = map.len();
    let water_tiles = map
        .tiles
        .iter()
        .filter(|t| matches!(t.terrain, TerrainType::Ocean | TerrainType::Lake))
        .count();
    let land_tiles = total_tiles - water_tiles;
    let land_percentage = if total_tiles > 0 {
        (land_tiles as f64 / total_tiles as f64) * 100.0
    } else {
        0.0
    };

    let mut terrain_counts: HashMap<TerrainType, usize> = HashMap::new();
    let mut resource_counts: HashMap<ResourceQuality, usize> = HashMap::new();
    for t in &map.tiles {
        *terrain_counts.entry(t.terrain).or_insert(0) += 1;
        *resource_counts.entry(t.resource).or_insert(0) += 1;
    }

    MapStats {
        total_tiles,
        border_tiles: map.border_tiles.len(),
        water_tiles,
        land_tiles,
        land_percentage,
        terrain_counts,
        resource_counts,
    }
}

/// Print map statistics report.
pub fn print_map_report(stats: &MapStats) {
    println!("\n=== Map Generation Report ===");
    println!("Tiles: {} total ({} on the border)", stats.total_tiles, stats.border_tiles);
    println!("  - Land: {} ({:.1}%)", stats.land_tiles, stats.land_percentage);
    println!("  - Water: {}", stats.water_tiles);

    println!("\nTerrain Distribution:");
    let mut terrains: Vec<_> = stats.terrain_counts.iter().collect();
    terrains.sort_by(|a, b| b.1.cmp(a.1));
    for (terrain, count) in terrains {
        let pct = (*count as f64 / stats.total_tiles as f64) * 100.0;
        println!("  - {}: {} ({:.1}%)", tile::terrain_name(*terrain), count, pct);
    }

    println!("\nResource Distribution (hidden until assessed):");
    for quality in ResourceQuality::ALL {
        let count = stats.resource_counts.get(&quality).copied().unwrap_or(0);
        let pct = (count as f64 / stats.total_tiles as f64) * 100.0;
        println!("  - {}: {} ({:.1}%)", tile::resource_name(quality), count, pct);
    }
    println!("=============================\n");
}
