//! Scalar functions of one variable used for elevation profiles.

use std::sync::Arc;

use crate::error::{Result, VeloError};
use crate::math;

/// A function `f64 -> f64`, either constant or defined by equally spaced samples.
///
/// Cloning is cheap: sampled functions share their samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    /// Always returns the same value.
    Constant(f64),
    /// Linear interpolation between samples spread evenly over `[0, x_max]`.
    Sampled { samples: Arc<[f32]>, x_max: f64 },
}

impl Function {
    /// A function returning `y` everywhere.
    pub fn constant(y: f64) -> Self {
        Function::Constant(y)
    }

    /// A function interpolating `samples`, the first at `x = 0` and the last
    /// at `x = x_max`. Outside that range the nearest end sample is returned.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if there are fewer than two
    /// samples or `x_max` is not strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use velo::functions::Function;
    ///
    /// let f = Function::sampled(vec![0.0, 10.0], 1.0).unwrap();
    /// assert_eq!(f.apply(0.5), 5.0);
    /// assert_eq!(f.apply(2.0), 10.0);
    /// ```
    pub fn sampled(samples: Vec<f32>, x_max: f64) -> Result<Self> {
        if samples.len() < 2 || x_max.is_nan() || x_max <= 0.0 {
            return Err(VeloError::InvalidArgument(format!(
                "sampled function needs 2 samples over a positive range, got {} over {x_max}",
                samples.len()
            )));
        }
        Ok(Function::Sampled {
            samples: samples.into(),
            x_max,
        })
    }

    /// Evaluate the function at `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Constant(y) => *y,
            Function::Sampled { samples, x_max } => {
                let last = samples.len() - 1;
                if x <= 0.0 {
                    return samples[0] as f64;
                }
                if x >= *x_max {
                    return samples[last] as f64;
                }
                let scaled = x * last as f64 / x_max;
                let index = (scaled as usize).min(last - 1);
                math::interpolate(
                    samples[index] as f64,
                    samples[index + 1] as f64,
                    scaled - index as f64,
                )
            }
        }
    }
}
