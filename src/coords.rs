//! Integer axial coordinates for the pointy-top hex lattice.
//!
//! Tiles are addressed by `(q, r)` axial coordinates; Cartesian centers are
//! derived from them, never the other way around. This keeps tile identity
//! exact and makes neighbor lookup a table walk instead of a position search.

use crate::geometry::Point;

/// The six neighbor offsets, ordered by the angle of the neighbor's center:
/// 0, 60, 120, 180, 240, 300 degrees (counterclockwise from east).
pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Axial coordinate of one hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    #[inline]
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cartesian center of this cell for the given circumradius, relative to
    /// the lattice origin. Adjacent centers end up exactly one hexagon
    /// diameter (twice the inradius) apart.
    pub fn to_world(self, circumradius: f64, origin: Point) -> Point {
        let sqrt3 = 3.0_f64.sqrt();
        Point::new(
            origin.x + circumradius * sqrt3 * (self.q as f64 + self.r as f64 / 2.0),
            origin.y + circumradius * 1.5 * self.r as f64,
        )
    }

    /// Nearest cell to a Cartesian position (fractional axial + cube round).
    pub fn from_world(p: Point, circumradius: f64, origin: Point) -> Self {
        let x = p.x - origin.x;
        let y = p.y - origin.y;
        let q = (3.0_f64.sqrt() / 3.0 * x - y / 3.0) / circumradius;
        let r = (2.0 / 3.0 * y) / circumradius;
        Self::round(q, r)
    }

    /// Round fractional axial coordinates to the containing cell.
    fn round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// The six neighboring coordinates, in `DIRECTIONS` order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        let mut out = [HexCoord::ORIGIN; 6];
        for (i, (dq, dr)) in DIRECTIONS.iter().enumerate() {
            out[i] = HexCoord::new(self.q + dq, self.r + dr);
        }
        out
    }

    /// Hex (cube) distance to another coordinate.
    pub fn distance(self, other: HexCoord) -> i32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// Which concentric layer this cell sits on; 0 is the center tile.
    #[inline]
    pub fn ring(self) -> i32 {
        self.distance(HexCoord::ORIGIN)
    }
}
