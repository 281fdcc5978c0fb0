//! The map arena.
//!
//! All tiles live in one contiguous vector; everything else refers to them by
//! `usize` index. A hash index keyed on axial coordinates resolves lookups,
//! so there are no floating-point position keys and neighbor queries are a
//! constant-size table walk.

use std::collections::HashMap;

use crate::config::GenerationConfig;
use crate::coords::HexCoord;
use crate::geometry::{inradius, Point};
use crate::tile::Tile;

/// A complete hexagonal map of `n_layers` concentric rings around an origin.
#[derive(Debug, Clone)]
pub struct HexMap {
    /// All tiles, in layout order (row-major by `r`, then `q`).
    pub tiles: Vec<Tile>,
    /// Axial coordinate -> arena index.
    index: HashMap<HexCoord, usize>,
    /// Indices of the outermost-ring tiles, in layout order.
    pub border_tiles: Vec<usize>,
    /// Indices sorted by ascending y for back-to-front iteration.
    pub draw_order: Vec<usize>,
    /// Number of rings around the center tile.
    pub n_layers: i32,
    /// Cartesian center of the middle tile.
    pub origin: Point,
    /// Hexagon circumradius, identical for every tile.
    pub major_radius: f64,
    /// Configuration the map was generated from (kept for reroll).
    pub config: GenerationConfig,
}

impl HexMap {
    /// Empty map shell with the shape parameters resolved from `config`.
    /// Negative layer counts are clamped to a single-tile grid.
    pub fn with_shape(config: &GenerationConfig) -> Self {
        let n_layers = config.n_layers.max(0);
        Self {
            tiles: Vec::new(),
            index: HashMap::new(),
            border_tiles: Vec::new(),
            draw_order: Vec::new(),
            n_layers,
            origin: config.origin,
            major_radius: config.tile_radius,
            config: config.clone(),
        }
    }

    /// Hexagon inradius; adjacent tile centers are twice this apart.
    #[inline]
    pub fn minor_radius(&self) -> f64 {
        inradius(self.major_radius)
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    // === Accessors ===

    /// Get a tile by arena index.
    #[inline]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Get a mutable tile by arena index.
    #[inline]
    pub fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Arena index of the tile at an axial coordinate.
    #[inline]
    pub fn index_of(&self, coord: HexCoord) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    #[inline]
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// The tile whose hexagon contains the given Cartesian position.
    pub fn tile_at(&self, position: Point) -> Option<&Tile> {
        self.index_at(position).map(|i| &self.tiles[i])
    }

    /// Mutable variant of [`tile_at`](Self::tile_at), for survey actions.
    pub fn tile_at_mut(&mut self, position: Point) -> Option<&mut Tile> {
        self.index_at(position).map(move |i| &mut self.tiles[i])
    }

    /// Arena index of the tile containing a Cartesian position.
    pub fn index_at(&self, position: Point) -> Option<usize> {
        let coord = HexCoord::from_world(position, self.major_radius, self.origin);
        self.index_of(coord)
    }

    // === Adjacency ===

    /// Arena indices of the up-to-6 neighbors of a coordinate, ordered by
    /// direction angle (0, 60, ... 300 degrees). Missing neighbors at the
    /// map edge are omitted, so the result holds 3 to 6 entries.
    pub fn neighbors(&self, coord: HexCoord) -> Vec<usize> {
        coord
            .neighbors()
            .iter()
            .filter_map(|&n| self.index_of(n))
            .collect()
    }

    /// Neighbor tiles of the tile containing the given position.
    /// Empty if the position is outside the map.
    pub fn neighbors_of(&self, position: Point) -> Vec<&Tile> {
        match self.index_at(position) {
            Some(i) => self
                .neighbors(self.tiles[i].coord)
                .into_iter()
                .map(|n| &self.tiles[n])
                .collect(),
            None => Vec::new(),
        }
    }

    // === Construction (used by the layout stage) ===

    /// Append a tile at the given coordinate and index it.
    pub(crate) fn push_tile(&mut self, coord: HexCoord) -> usize {
        let position = coord.to_world(self.major_radius, self.origin);
        let idx = self.tiles.len();
        self.tiles.push(Tile::new(coord, position));
        let previous = self.index.insert(coord, idx);
        debug_assert!(previous.is_none(), "duplicate tile at {:?}", coord);
        idx
    }

    /// Recompute the back-to-front iteration order (stable sort by y, so
    /// within a row the layout order is preserved).
    pub(crate) fn rebuild_draw_order(&mut self) {
        let mut order: Vec<usize> = (0..self.tiles.len()).collect();
        order.sort_by(|&a, &b| {
            self.tiles[a]
                .position
                .y
                .partial_cmp(&self.tiles[b].position.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.draw_order = order;
    }

    // === Debug validation ===

    /// Validate structural invariants (debug builds only).
    #[cfg(debug_assertions)]
    pub fn validate(&self) -> Result<(), String> {
        let layers = self.n_layers as i64;
        let expected = (3 * layers * layers + 3 * layers + 1) as usize;
        if self.tiles.len() != expected {
            return Err(format!(
                "tile count {} does not match {} for {} layers",
                self.tiles.len(),
                expected,
                self.n_layers
            ));
        }
        if self.index.len() != self.tiles.len() {
            return Err("coordinate index out of sync with arena".to_string());
        }
        if self.draw_order.len() != self.tiles.len() {
            return Err("draw order out of sync with arena".to_string());
        }

        for window in self.draw_order.windows(2) {
            if self.tiles[window[0]].position.y > self.tiles[window[1]].position.y {
                return Err("draw order not sorted by ascending y".to_string());
            }
        }

        for (i, tile) in self.tiles.iter().enumerate() {
            if self.index_of(tile.coord) != Some(i) {
                return Err(format!("tile {} not indexed at {:?}", i, tile.coord));
            }
            let on_rim = tile.coord.ring() == self.n_layers;
            if on_rim != self.border_tiles.contains(&i) {
                return Err(format!("tile {} border marking inconsistent", i));
            }
            let spacing = 2.0 * self.minor_radius();
            for &n in &self.neighbors(tile.coord) {
                let d = tile.position.distance(&self.tiles[n].position);
                if (d - spacing).abs() > 1e-6 {
                    return Err(format!(
                        "tiles {} and {} spaced {} apart, expected {}",
                        i, n, d, spacing
                    ));
                }
            }
        }

        Ok(())
    }

    #[cfg(not(debug_assertions))]
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_lattice;

    fn map_with_layers(n_layers: i32) -> HexMap {
        let config = GenerationConfig {
            n_layers,
            ..GenerationConfig::for_testing(7)
        };
        build_lattice(&config)
    }

    #[test]
    fn test_tile_at_hits_every_center() {
        let map = map_with_layers(3);
        for tile in &map.tiles {
            let found = map.tile_at(tile.position).expect("center lookup");
            assert_eq!(found.coord, tile.coord);
        }
    }

    #[test]
    fn test_tile_at_outside_map() {
        let map = map_with_layers(2);
        let far = Point::new(1e6, -1e6);
        assert!(map.tile_at(far).is_none());
        assert!(map.neighbors_of(far).is_empty());
    }

    #[test]
    fn test_neighbor_counts() {
        let map = map_with_layers(2);
        for tile in &map.tiles {
            let n = map.neighbors(tile.coord).len();
            if tile.coord.ring() < map.n_layers {
                assert_eq!(n, 6, "interior tile {:?}", tile.coord);
            } else {
                assert!((3..=4).contains(&n), "rim tile {:?} had {} neighbors", tile.coord, n);
            }
        }
    }

    #[test]
    fn test_neighbors_of_center() {
        let map = map_with_layers(1);
        let around = map.neighbors_of(map.origin);
        assert_eq!(around.len(), 6);
        let spacing = 2.0 * map.minor_radius();
        for tile in around {
            assert!((tile.position.distance(&map.origin) - spacing).abs() < 1e-9);
        }
    }

    #[test]
    fn test_validate_passes() {
        for layers in [0, 1, 2, 6] {
            let map = map_with_layers(layers);
            map.validate().expect("structurally valid map");
        }
    }
}
