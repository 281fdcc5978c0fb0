//! Random-cosine-series noise field.
//!
//! Spatially smooth pseudo-random scalar values are produced by summing a
//! series of randomly drawn plane waves with amplitudes falling off as 1/j.
//! Each field instance draws its parameters once from the supplied generator,
//! so two fields built back to back are uncorrelated, and the same seed
//! always reproduces the same field.

use std::f64::consts::TAU;

use rand::Rng;

use crate::geometry::Point;

/// Number of wave components used when the caller has no preference.
pub const DEFAULT_COMPONENTS: usize = 64;

/// One plane wave of the series.
#[derive(Debug, Clone)]
struct WaveComponent {
    amplitude: f64,
    wave_number: f64,
    frequency: f64,
    direction: f64,
    phase: f64,
}

/// A frozen noise field: sample it at any set of points, then normalize.
#[derive(Debug, Clone)]
pub struct NoiseField {
    origin: Point,
    components: Vec<WaveComponent>,
    /// Evaluation time in seconds, fixed for the lifetime of the field.
    /// Drawn from the generator rather than the wall clock so that a seed
    /// fully determines the output.
    time: f64,
}

impl NoiseField {
    /// Draw a fresh field with `n_components` waves.
    pub fn new(origin: Point, n_components: usize, rng: &mut impl Rng) -> Self {
        let components = (0..n_components)
            .map(|_| WaveComponent {
                amplitude: rng.gen_range(0.0..10.0),
                wave_number: rng.gen_range(0.0..TAU),
                frequency: rng.gen_range(0.0..1.0),
                direction: rng.gen_range(0.0..TAU),
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
        Self {
            origin,
            components,
            time: rng.gen_range(0.0..3600.0),
        }
    }

    /// Raw (unnormalized) series value at a point.
    pub fn sample(&self, p: Point) -> f64 {
        let x = p.x - self.origin.x;
        let y = p.y - self.origin.y;
        let mut sum = 0.0;
        for (i, wave) in self.components.iter().enumerate() {
            let j = (i + 1) as f64;
            let along = x * wave.direction.sin() + y * wave.direction.cos();
            sum += (wave.amplitude / j)
                * (wave.wave_number * j * along + TAU * j * wave.frequency * self.time + wave.phase)
                    .cos();
        }
        sum
    }

    /// Sample every point and rescale the results into [0, 1].
    ///
    /// If every sample comes out equal (a single point, or coincident
    /// points), the spread is zero and every value maps to 0.5 instead of
    /// dividing by zero.
    pub fn generate(&self, points: &[Point]) -> Vec<f64> {
        let mut values: Vec<f64> = points.iter().map(|&p| self.sample(p)).collect();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &values {
            min = min.min(v);
            max = max.max(v);
        }

        let spread = max - min;
        if !spread.is_finite() || spread < 1e-12 {
            values.iter_mut().for_each(|v| *v = 0.5);
            return values;
        }

        for v in values.iter_mut() {
            *v = ((*v - min) / spread).clamp(0.0, 1.0);
        }
        values
    }
}
