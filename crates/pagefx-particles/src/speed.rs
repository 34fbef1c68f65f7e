//! Direction-biased velocity draws.

use rand::Rng;

use crate::config::{Bias, Direction};

/// Draw a velocity component for one axis.
///
/// Forward directions draw from `[min, max)`, backward ones from `[-max, -min)`.
/// `Center` draws from `[-max/2, max/2)` and then pushes the value away from zero
/// by `min`, so no particle ends up nearly stationary.
pub fn calculate_speed(direction: Direction, min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    match direction.bias() {
        Bias::Forward => uniform(rng, min, max),
        Bias::Backward => uniform(rng, -max, -min),
        Bias::Both => {
            let half = max / 2.0;
            let value = uniform(rng, -half, half);
            if value < 0.0 { value - min } else { value + min }
        }
    }
}

/// Uniform draw from `[low, high)`, or `low` when the range is empty.
fn uniform(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
