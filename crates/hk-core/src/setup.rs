//! Initial Profiles
//!
//! Generators for the starting opinions of a run.

use hk_types::Point2;
use rand::Rng;

/// Evenly spaced opinions `i / (n + 1)` for `i = 1..=n`, the expected
/// positions of `n` uniform draws on the unit interval.
pub fn equidistant(n: usize) -> Vec<f64> {
    let spacing = 1.0 / (n + 1) as f64;
    (1..=n).map(|i| i as f64 * spacing).collect()
}

/// Independent uniform draws on `[0, 1)`.
pub fn uniform<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Independent uniform draws on the unit square.
pub fn uniform_2d<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Point2> {
    (0..n)
        .map(|_| {
            let x = rng.gen::<f64>();
            let y = rng.gen::<f64>();
            Point2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_equidistant() {
        let profile = equidistant(3);
        assert_eq!(profile, vec![0.25, 0.5, 0.75]);
        assert!(equidistant(0).is_empty());
    }

    #[test]
    fn test_equidistant_is_symmetric() {
        let profile = equidistant(50);
        for i in 0..25 {
            assert!((profile[i] + profile[49 - i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(42);
        let profile = uniform(200, &mut rng);
        assert_eq!(profile.len(), 200);
        assert!(profile.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_uniform_2d_in_unit_square() {
        let mut rng = SmallRng::seed_from_u64(42);
        let profile = uniform_2d(100, &mut rng);
        assert!(profile
            .iter()
            .all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));
    }
}
