//! Unified configuration for map generation.
//!
//! All tunable parameters are centralized here so callers and tests adjust
//! generation in one place.

use crate::geometry::Point;
use crate::noise_field::DEFAULT_COMPONENTS;

/// Complete configuration for one map generation.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    // ===== Lattice Settings =====
    /// Number of concentric rings around the center tile.
    /// Negative values are clamped to 0 (a single-tile grid).
    pub n_layers: i32,
    /// Cartesian center of the middle tile.
    pub origin: Point,
    /// Hexagon circumradius shared by every tile.
    pub tile_radius: f64,

    // ===== Randomness =====
    /// Seed for the generation run; the same seed reproduces the same map.
    pub seed: u64,

    // ===== Classification Settings =====
    /// Number of cosine components per noise field.
    pub noise_components: usize,
    /// Probability that a tile's seed draw ignores the noise field and uses
    /// an independent uniform roll instead (clamped into [0, 1] at use).
    pub salt_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            // Reference deployment: 6 rings = 127 tiles.
            n_layers: 6,
            origin: Point::ZERO,
            tile_radius: 32.0,
            seed: 12345,
            noise_components: DEFAULT_COMPONENTS,
            salt_probability: 0.5,
        }
    }
}

impl GenerationConfig {
    /// Create config with custom seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Default::default() }
    }

    /// Create a smaller config for faster tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            n_layers: 2,
            tile_radius: 24.0,
            seed,
            noise_components: 16,
            ..Default::default()
        }
    }
}

/// Presets for common map scales.
pub mod presets {
    use super::GenerationConfig;

    /// Compact map for short sessions (3 rings, 37 tiles).
    pub fn outpost(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            n_layers: 3,
            ..Default::default()
        }
    }

    /// The standard settlement map (6 rings, 127 tiles).
    pub fn settlement(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            ..Default::default()
        }
    }

    /// Large map for long campaigns (10 rings, 331 tiles).
    pub fn frontier(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            n_layers: 10,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_deployment() {
        let config = GenerationConfig::default();
        assert_eq!(config.n_layers, 6);
        assert!(config.tile_radius > 0.0);
        assert!((0.0..=1.0).contains(&config.salt_probability));
    }

    #[test]
    fn test_with_seed() {
        let config = GenerationConfig::with_seed(777);
        assert_eq!(config.seed, 777);
        assert_eq!(config.n_layers, GenerationConfig::default().n_layers);
    }

    #[test]
    fn test_presets_scale() {
        assert!(presets::outpost(1).n_layers < presets::settlement(1).n_layers);
        assert!(presets::settlement(1).n_layers < presets::frontier(1).n_layers);
    }
}
