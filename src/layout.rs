//! Lattice construction.
//!
//! Walks the axial-coordinate range of the requested radius row by row,
//! appending tiles to the arena. Rows shrink by one tile per step away from
//! the middle row, which yields the centered-hexagonal count
//! `3L^2 + 3L + 1`. Tiles on the outermost ring are recorded as the border.

use crate::config::GenerationConfig;
use crate::map::HexMap;
use crate::coords::HexCoord;

/// Lay out the full hex lattice described by `config`.
///
/// Terrain and resources are left unclassified; the classification stages
/// run afterwards over the finished arena.
pub fn build_lattice(config: &GenerationConfig) -> HexMap {
    let mut map = HexMap::with_shape(config);
    let layers = map.n_layers;

    for r in -layers..=layers {
        let q_min = (-layers).max(-r - layers);
        let q_max = layers.min(-r + layers);
        for q in q_min..=q_max {
            let coord = HexCoord::new(q, r);
            let idx = map.push_tile(coord);
            if coord.ring() == layers {
                map.border_tiles.push(idx);
            }
        }
    }

    map.rebuild_draw_order();

    debug_assert!(map.validate().is_ok());
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n_layers: i32) -> HexMap {
        let config = GenerationConfig {
            n_layers,
            ..GenerationConfig::for_testing(11)
        };
        build_lattice(&config)
    }

    #[test]
    fn test_centered_hexagonal_count() {
        for layers in [0_i64, 1, 2, 6] {
            let map = lattice(layers as i32);
            let expected = (3 * layers * layers + 3 * layers + 1) as usize;
            assert_eq!(map.len(), expected, "{} layers", layers);
        }
    }

    #[test]
    fn test_negative_layers_clamps_to_single_tile() {
        let map = lattice(-3);
        assert_eq!(map.len(), 1);
        assert_eq!(map.n_layers, 0);
        assert_eq!(map.tiles[0].position, map.origin);
    }

    #[test]
    fn test_border_ring() {
        for layers in [1, 2, 6] {
            let map = lattice(layers);
            assert_eq!(map.border_tiles.len(), 6 * layers as usize, "{} layers", layers);
            for &i in &map.border_tiles {
                assert_eq!(map.tiles[i].coord.ring(), layers);
            }
        }
    }

    #[test]
    fn test_draw_order_is_ascending_y() {
        let map = lattice(4);
        let ys: Vec<f64> = map.draw_order.iter().map(|&i| map.tiles[i].position.y).collect();
        for pair in ys.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        // Permutation check: every tile appears exactly once.
        let mut seen = vec![false; map.len()];
        for &i in &map.draw_order {
            assert!(!seen[i]);
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_middle_row_width() {
        let map = lattice(3);
        // The row through the origin holds 2L + 1 tiles.
        let middle = map.tiles.iter().filter(|t| t.coord.r == 0).count();
        assert_eq!(middle, 7);
        // The narrowest rows hold L + 1 tiles.
        let top = map.tiles.iter().filter(|t| t.coord.r == 3).count();
        assert_eq!(top, 4);
    }
}
