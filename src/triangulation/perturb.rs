use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::{Point2, Vector2};

use super::Perturbation;

/// Applies `perturbation` to `points`, returning the shifted copies.
///
/// Offsets are uniform over the disc of the given radius and depend only on
/// the seed and the position in the sequence.
#[must_use]
pub fn perturb(points: &[Point2], perturbation: Perturbation) -> Vec<Point2> {
    match perturbation {
        Perturbation::None => points.to_vec(),
        Perturbation::RandomShift { radius, seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            points
                .iter()
                .map(|p| {
                    let angle: f64 = rng.gen_range(0.0..TAU);
                    let length = radius * rng.gen::<f64>().sqrt();
                    p + Vector2::new(angle.cos(), angle.sin()) * length
                })
                .collect()
        }
    }
}
