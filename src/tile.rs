//! Tile entity and its classification domains.
//!
//! A `Tile` is the leaf data record of the map arena: one hex cell with a
//! terrain type and a resource quality. Resource quality is rolled during
//! generation but stays hidden until the tile is surveyed via [`Tile::assess`].

use crate::coords::HexCoord;
use crate::geometry::Point;
use crate::GenerationError;

/// Terrain classification of a tile.
///
/// `Ocean` is never produced by the threshold mapping; it is only assigned
/// explicitly (border forcing and lake continuity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerrainType {
    /// Not yet classified.
    #[default]
    None,
    Forest,
    Lake,
    Mountains,
    Ocean,
    Plains,
}

impl TerrainType {
    /// All variants, in discriminant order. Used for majority counting.
    pub const ALL: [TerrainType; 6] = [
        TerrainType::None,
        TerrainType::Forest,
        TerrainType::Lake,
        TerrainType::Mountains,
        TerrainType::Ocean,
        TerrainType::Plains,
    ];

    /// Map a unit-interval value through the terrain cumulative thresholds.
    ///
    /// Values outside [0, 1] are a contract violation and abort generation
    /// rather than being clamped; a clamp here would mask noise bugs.
    pub fn from_unit(value: f64) -> Result<TerrainType, GenerationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(GenerationError::NoiseOutOfRange { value });
        }
        Ok(if value <= 0.25 {
            TerrainType::Lake
        } else if value <= 0.50 {
            TerrainType::Plains
        } else if value <= 0.75 {
            TerrainType::Forest
        } else {
            TerrainType::Mountains
        })
    }
}

/// Resource quality of a tile, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ResourceQuality {
    Poor,
    BelowAverage,
    #[default]
    Average,
    AboveAverage,
    Good,
}

impl ResourceQuality {
    pub const ALL: [ResourceQuality; 5] = [
        ResourceQuality::Poor,
        ResourceQuality::BelowAverage,
        ResourceQuality::Average,
        ResourceQuality::AboveAverage,
        ResourceQuality::Good,
    ];

    /// Map a unit-interval value through the resource cumulative thresholds.
    pub fn from_unit(value: f64) -> Result<ResourceQuality, GenerationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(GenerationError::NoiseOutOfRange { value });
        }
        Ok(if value <= 0.10 {
            ResourceQuality::Poor
        } else if value <= 0.30 {
            ResourceQuality::BelowAverage
        } else if value <= 0.70 {
            ResourceQuality::Average
        } else if value <= 0.90 {
            ResourceQuality::AboveAverage
        } else {
            ResourceQuality::Good
        })
    }
}

/// One hexagonal cell of the map.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Axial coordinate (identity key within the arena).
    pub coord: HexCoord,
    /// Cartesian center.
    pub position: Point,
    /// Terrain classification.
    pub terrain: TerrainType,
    /// Resource quality, hidden until assessed.
    pub resource: ResourceQuality,
    /// Whether the resource quality has been surveyed.
    pub assessed: bool,
}

impl Tile {
    pub fn new(coord: HexCoord, position: Point) -> Self {
        Self {
            coord,
            position,
            terrain: TerrainType::default(),
            resource: ResourceQuality::default(),
            assessed: false,
        }
    }

    /// Survey the tile, revealing its resource quality.
    pub fn assess(&mut self) -> ResourceQuality {
        self.assessed = true;
        self.resource
    }
}

/// Display color for a terrain type (RGB).
pub fn terrain_color(terrain: TerrainType) -> (u8, u8, u8) {
    match terrain {
        TerrainType::None => (40, 40, 40),
        TerrainType::Forest => (68, 136, 85),
        TerrainType::Lake => (51, 102, 153),
        TerrainType::Mountains => (136, 136, 136),
        TerrainType::Ocean => (68, 68, 122),
        TerrainType::Plains => (136, 170, 85),
    }
}

/// Display name for a terrain type.
pub fn terrain_name(terrain: TerrainType) -> &'static str {
    match terrain {
        TerrainType::None => "Unclassified",
        TerrainType::Forest => "Forest",
        TerrainType::Lake => "Lake",
        TerrainType::Mountains => "Mountains",
        TerrainType::Ocean => "Ocean",
        TerrainType::Plains => "Plains",
    }
}

/// Display color for a resource quality (RGB).
pub fn resource_color(resource: ResourceQuality) -> (u8, u8, u8) {
    match resource {
        ResourceQuality::Poor => (120, 70, 70),
        ResourceQuality::BelowAverage => (160, 120, 80),
        ResourceQuality::Average => (180, 180, 100),
        ResourceQuality::AboveAverage => (130, 190, 110),
        ResourceQuality::Good => (80, 200, 120),
    }
}

/// Display name for a resource quality.
pub fn resource_name(resource: ResourceQuality) -> &'static str {
    match resource {
        ResourceQuality::Poor => "Poor",
        ResourceQuality::BelowAverage => "Below Average",
        ResourceQuality::Average => "Average",
        ResourceQuality::AboveAverage => "Above Average",
        ResourceQuality::Good => "Good",
    }
}
