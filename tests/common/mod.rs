#![allow(dead_code)]

//! Point clouds and checks shared across integration tests.

use miniball::{Miniball, PointSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn random_cloud(n: usize, dim: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..n * dim).map(|_| rng.gen_range(-10.0..10.0)).collect();
    PointSet::new(data, dim).unwrap()
}

/// Points on a small integer grid, so duplicates and cospherical ties are common.
pub fn grid_cloud(n: usize, dim: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..n * dim).map(|_| rng.gen_range(-2..=2) as f64).collect();
    PointSet::new(data, dim).unwrap()
}

pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

pub fn assert_encloses(ball: &Miniball, points: &PointSet) {
    let slack = 1e-9 * ball.radius().max(1.0);
    for (i, p) in points.iter().enumerate() {
        let d = distance(ball.center(), p);
        assert!(
            d <= ball.radius() + slack,
            "point {} at distance {} outside radius {}",
            i,
            d,
            ball.radius()
        );
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
