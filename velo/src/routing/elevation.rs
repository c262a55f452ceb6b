//! Elevation profiles along routes.

use std::sync::Arc;

use crate::error::{Result, VeloError};
use crate::functions::Function;
use crate::math;
use crate::routing::route::Route;

/// Largest number of samples a computed profile may hold.
pub const MAX_SAMPLE_COUNT: usize = 1 << 22;

/// Elevation samples spaced evenly along a route, with summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    length: f64,
    samples: Arc<[f32]>,
    function: Function,
    min_elevation: f64,
    max_elevation: f64,
    total_ascent: f64,
    total_descent: f64,
}

impl ElevationProfile {
    /// Profile of a route of `length` metres from samples spread evenly over
    /// `[0, length]`.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if `length` is not positive or
    /// there are fewer than two samples.
    pub fn new(length: f64, samples: Vec<f32>) -> Result<Self> {
        if length.is_nan() || length <= 0.0 || samples.len() < 2 {
            return Err(VeloError::InvalidArgument(format!(
                "a profile needs a positive length and two samples (length {length}, {} samples)",
                samples.len()
            )));
        }

        let mut min_elevation = f64::INFINITY;
        let mut max_elevation = f64::NEG_INFINITY;
        for &sample in &samples {
            min_elevation = min_elevation.min(sample as f64);
            max_elevation = max_elevation.max(sample as f64);
        }
        let (mut total_ascent, mut total_descent) = (0.0, 0.0);
        for pair in samples.windows(2) {
            let difference = (pair[1] - pair[0]) as f64;
            if difference > 0.0 {
                total_ascent += difference;
            } else {
                total_descent -= difference;
            }
        }

        let function = Function::sampled(samples.clone(), length)?;
        Ok(Self {
            length,
            samples: samples.into(),
            function,
            min_elevation,
            max_elevation,
            total_ascent,
            total_descent,
        })
    }

    /// Length in metres.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// Sum of all rises between consecutive samples, in metres.
    pub fn total_ascent(&self) -> f64 {
        self.total_ascent
    }

    /// Sum of all drops between consecutive samples, as a non-negative number of metres.
    pub fn total_descent(&self) -> f64 {
        self.total_descent
    }

    /// Elevation at `position`, interpolated between samples; the first or
    /// last sample outside the profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.function.apply(position)
    }
}

/// Sample the elevation of `route` at most `max_step` metres apart.
///
/// Stretches without elevation data are filled in: with the nearest known
/// sample at either end of the route, by linear interpolation between known
/// samples elsewhere. A route with no elevation data at all gets a flat
/// profile at 0 m.
///
/// # Errors
///
/// Returns [`VeloError::InvalidArgument`] if `max_step` is not positive or
/// would need more than [`MAX_SAMPLE_COUNT`] samples, or if the route has
/// zero length.
pub fn elevation_profile(route: &Route, max_step: f64) -> Result<ElevationProfile> {
    if max_step.is_nan() || max_step <= 0.0 {
        return Err(VeloError::InvalidArgument(format!(
            "maximum step must be positive, got {max_step}"
        )));
    }

    let length = route.length();
    let steps = (length / max_step).ceil();
    if steps.is_nan() || steps >= MAX_SAMPLE_COUNT as f64 {
        return Err(VeloError::InvalidArgument(format!(
            "maximum step {max_step} is too small for a {length} m route"
        )));
    }
    let count = steps as usize + 1;
    let step = if count > 1 {
        length / (count - 1) as f64
    } else {
        0.0
    };
    let mut samples: Vec<f32> = (0..count)
        .map(|i| route.elevation_at(i as f64 * step) as f32)
        .collect();
    fill_gaps(&mut samples);

    ElevationProfile::new(length, samples)
}

fn fill_gaps(samples: &mut [f32]) {
    let Some(first) = samples.iter().position(|s| !s.is_nan()) else {
        samples.fill(0.0);
        return;
    };
    let last = samples.iter().rposition(|s| !s.is_nan()).unwrap_or(first);

    let head = samples[first];
    samples[..first].fill(head);
    let tail = samples[last];
    samples[last + 1..].fill(tail);

    let mut previous = first;
    for i in first + 1..=last {
        if samples[i].is_nan() {
            continue;
        }
        let span = (i - previous) as f64;
        for gap in previous + 1..i {
            let t = (gap - previous) as f64 / span;
            samples[gap] = math::interpolate(samples[previous] as f64, samples[i] as f64, t) as f32;
        }
        previous = i;
    }
}
