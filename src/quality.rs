use std::fmt;

use ordered_float::OrderedFloat;

use crate::miniball::Miniball;
use crate::point_set::squared_distance;

/// Error metrics recomputed from a finished solve, independent of the
/// bookkeeping the solver did along the way. Over- and underlengths are
/// relative to the radius (absolute when the radius is zero).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quality {
    pub qr_inconsistency: f64,
    pub min_convex_coefficient: f64,
    pub max_overlength: f64,
    pub max_underlength: f64,
    pub iterations: usize,
    pub support_size: usize,
}

impl Quality {
    pub fn of(miniball: &Miniball) -> Self {
        let support = match miniball.support_ref() {
            Some(support) => support,
            None => {
                return Quality {
                    qr_inconsistency: 0.0,
                    min_convex_coefficient: 0.0,
                    max_overlength: 0.0,
                    max_underlength: 0.0,
                    iterations: miniball.iterations(),
                    support_size: 0,
                }
            }
        };

        let points = miniball.points();
        let center = miniball.center();
        let radius = miniball.radius();
        let scale = if radius > 0.0 { radius } else { 1.0 };

        let mut lambdas = vec![0.0; support.size()];
        support.find_affine_coefficients(center, &mut lambdas);
        let min_convex_coefficient = lambdas
            .iter()
            .copied()
            .map(OrderedFloat)
            .min()
            .map_or(0.0, OrderedFloat::into_inner);

        let max_overlength = points
            .iter()
            .map(|p| {
                let dist = squared_distance(p, center).sqrt();
                OrderedFloat(((dist - radius) / scale).max(0.0))
            })
            .max()
            .map_or(0.0, OrderedFloat::into_inner);

        let max_underlength = support
            .members()
            .iter()
            .map(|&m| {
                let dist = squared_distance(points.point(m), center).sqrt();
                OrderedFloat(((radius - dist) / scale).abs())
            })
            .max()
            .map_or(0.0, OrderedFloat::into_inner);

        Quality {
            qr_inconsistency: support.representation_error(),
            min_convex_coefficient,
            max_overlength,
            max_underlength,
            iterations: miniball.iterations(),
            support_size: support.size(),
        }
    }

    pub fn is_valid(&self, tolerance: f64) -> bool {
        self.qr_inconsistency <= tolerance
            && self.max_overlength <= tolerance
            && self.max_underlength <= tolerance
            && self.min_convex_coefficient >= -tolerance
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qr inconsistency {:e}, min convex coefficient {:e}, \
             max overlength {:e}, max underlength {:e}, \
             {} iterations, support size {}",
            self.qr_inconsistency,
            self.min_convex_coefficient,
            self.max_overlength,
            self.max_underlength,
            self.iterations,
            self.support_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_set::PointSet;

    #[test]
    fn test_quality_of_right_triangle() {
        let points = PointSet::from_points(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]]).unwrap();
        let miniball = Miniball::new(&points);
        let quality = miniball.verify();
        assert!(quality.is_valid(1e-10), "{}", quality);
        assert_eq!(quality.support_size, 2);
        assert_eq!(quality.iterations, miniball.iterations());
        assert!(quality.min_convex_coefficient > 0.0);
    }

    #[test]
    fn test_quality_of_empty_set() {
        let points = PointSet::new(vec![], 3).unwrap();
        let quality = Miniball::new(&points).verify();
        assert_eq!(quality.support_size, 0);
        assert!(quality.is_valid(0.0));
    }

    #[test]
    fn test_display_mentions_support_size() {
        let points = PointSet::from_points(&[[0.0], [4.0]]).unwrap();
        let quality = Miniball::new(&points).verify();
        assert!(quality.to_string().ends_with("support size 2"));
    }
}
