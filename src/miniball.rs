//! Smallest enclosing ball of a point set.
//!
//! The solver keeps a ball whose boundary passes through every point of the
//! support and which encloses every other point. Each round it walks the
//! center towards the affine hull of the support, stopping early when some
//! outside point would reach the boundary (that point then joins the
//! support), and drops a member whenever the center sits on the hull but
//! outside the convex hull. Once the center lies inside the convex hull of
//! the support the ball is optimal.

use crate::point_set::{dot, squared_distance, PointSet};
use crate::quality::Quality;
use crate::support::Support;

/// Relative tolerance for "on the affine hull" and stop-fraction tests.
const EPS: f64 = 1e-14;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Settings {
    /// Zero derives a ceiling from the input size.
    pub max_iterations: usize,
}

impl Settings {
    fn iteration_limit(&self, size: usize, dim: usize) -> usize {
        if self.max_iterations > 0 {
            self.max_iterations
        } else {
            (100 * (size + dim + 1)).max(1000)
        }
    }
}

pub struct Miniball<'a> {
    points: &'a PointSet,
    settings: Settings,
    center: Vec<f64>,
    squared_radius: f64,
    radius: f64,
    support: Option<Support<'a>>,
    iteration: usize,
    converged: bool,
    center_to_aff: Vec<f64>,
    center_to_point: Vec<f64>,
    lambdas: Vec<f64>,
    dist_to_aff: f64,
    dist_to_aff_square: f64,
}

impl<'a> Miniball<'a> {
    pub fn new(points: &'a PointSet) -> Self {
        Self::with_settings(points, Settings::default())
    }

    pub fn with_settings(points: &'a PointSet, settings: Settings) -> Self {
        let dim = points.dimension();
        let mut miniball = Self {
            points,
            settings,
            center: vec![0.0; dim],
            squared_radius: 0.0,
            radius: 0.0,
            support: None,
            iteration: 0,
            converged: true,
            center_to_aff: vec![0.0; dim],
            center_to_point: vec![0.0; dim],
            lambdas: vec![0.0; dim + 1],
            dist_to_aff: 0.0,
            dist_to_aff_square: 0.0,
        };
        if !points.is_empty() {
            miniball.compute();
        }
        miniball
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn size(&self) -> usize {
        self.points.size()
    }

    pub fn dimension(&self) -> usize {
        self.points.dimension()
    }

    pub fn center(&self) -> &[f64] {
        assert!(!self.is_empty(), "an empty point set has no enclosing ball");
        &self.center
    }

    pub fn radius(&self) -> f64 {
        assert!(!self.is_empty(), "an empty point set has no enclosing ball");
        self.radius
    }

    pub fn squared_radius(&self) -> f64 {
        assert!(!self.is_empty(), "an empty point set has no enclosing ball");
        self.squared_radius
    }

    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// False only when the iteration ceiling stopped the solve.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Global indices of the support points, origin last.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.support
            .iter()
            .flat_map(|support| support.members().iter().copied())
    }

    pub fn support_size(&self) -> usize {
        self.support.as_ref().map_or(0, |support| support.size())
    }

    pub fn points(&self) -> &'a PointSet {
        self.points
    }

    pub fn verify(&self) -> Quality {
        Quality::of(self)
    }

    pub(crate) fn support_ref(&self) -> Option<&Support<'a>> {
        self.support.as_ref()
    }

    fn compute(&mut self) {
        log::debug!(
            "computing miniball of {} points in {} dimensions",
            self.points.size(),
            self.points.dimension()
        );
        let mut support = self.init_ball();
        let limit = self
            .settings
            .iteration_limit(self.points.size(), self.points.dimension());

        loop {
            if self.iteration >= limit {
                log::warn!(
                    "miniball stopped after {} iterations without converging (support size {})",
                    limit,
                    support.size()
                );
                self.converged = false;
                break;
            }
            self.iteration += 1;

            self.update_dist_to_aff(&support);

            let mut done = false;
            while self.dist_to_aff <= EPS * self.radius || support.is_full() {
                if !self.successful_drop(&mut support) {
                    done = true;
                    break;
                }
                self.update_dist_to_aff(&support);
            }
            if done {
                break;
            }

            let (scale, stopper) = self.find_stop_fraction(&support);
            match stopper {
                Some(stopper) if !support.is_full() => {
                    log::trace!(
                        "walked {:.6} of the way, point {} joins the support",
                        scale,
                        stopper
                    );
                    self.move_center(scale, &support);
                    support.add(stopper);
                }
                _ => {
                    log::trace!("walked onto the affine hull of {} points", support.size());
                    self.move_center(1.0, &support);
                    if !self.successful_drop(&mut support) {
                        break;
                    }
                }
            }
        }

        log::debug!(
            "miniball radius {} after {} iterations, {} support points",
            self.radius,
            self.iteration,
            support.size()
        );
        self.support = Some(support);
    }

    /// Centers the ball on point 0 and seeds the support with the farthest point.
    fn init_ball(&mut self) -> Support<'a> {
        self.center.copy_from_slice(self.points.point(0));

        let mut farthest = 0;
        self.squared_radius = 0.0;
        for j in 1..self.points.size() {
            let dist = squared_distance(self.points.point(j), &self.center);
            if dist >= self.squared_radius {
                self.squared_radius = dist;
                farthest = j;
            }
        }
        self.radius = self.squared_radius.sqrt();
        Support::new(self.points, farthest)
    }

    fn update_dist_to_aff(&mut self, support: &Support) {
        self.dist_to_aff_square =
            support.shortest_vector_to_span(&self.center, &mut self.center_to_aff);
        self.dist_to_aff = self.dist_to_aff_square.sqrt();
    }

    fn move_center(&mut self, scale: f64, support: &Support) {
        for (c, step) in self.center.iter_mut().zip(&self.center_to_aff) {
            *c += scale * step;
        }
        let member = self.points.point(support.any_member());
        self.squared_radius = squared_distance(member, &self.center);
        self.radius = self.squared_radius.sqrt();
    }

    /// Drops the member with the smallest non-positive affine coefficient of
    /// the center. Returns false when every coefficient is positive, i.e. the
    /// center lies in the convex hull of the support.
    fn successful_drop(&mut self, support: &mut Support) -> bool {
        support.find_affine_coefficients(&self.center, &mut self.lambdas);

        let mut smallest = 0;
        let mut minimum = 1.0;
        for (i, &lambda) in self.lambdas[..support.size()].iter().enumerate() {
            if lambda < minimum {
                minimum = lambda;
                smallest = i;
            }
        }

        if minimum <= 0.0 {
            log::trace!(
                "dropping point {} with coefficient {}",
                support.global_index(smallest),
                minimum
            );
            support.remove(smallest);
            return true;
        }
        false
    }

    /// Largest fraction of `center_to_aff` the center can move before a point
    /// outside the support reaches the boundary, and that point.
    fn find_stop_fraction(&mut self, support: &Support) -> (f64, Option<usize>) {
        let mut scale = 1.0;
        let mut stopper = None;
        let tie_eps = EPS.sqrt();

        for j in 0..self.points.size() {
            if support.is_member(j) {
                continue;
            }
            let point = self.points.point(j);
            let offsets = point.iter().zip(&self.center);
            for (d, (p, c)) in self.center_to_point.iter_mut().zip(offsets) {
                *d = p - c;
            }
            let dir_point_prod = dot(&self.center_to_aff, &self.center_to_point);
            let hull_offset = self.dist_to_aff_square - dir_point_prod;
            let hull_scale = self.radius * self.dist_to_aff;

            // points beyond the hull stay enclosed anyway
            if hull_offset < EPS * hull_scale {
                continue;
            }

            let point_square = dot(&self.center_to_point, &self.center_to_point);
            let mut bound = (self.squared_radius - point_square) / (2.0 * hull_offset);
            if bound <= 0.0 {
                // a point already on the boundary stops the walk where it is,
                // unless it sits on the affine hull and would make it singular
                if hull_offset < tie_eps * hull_scale {
                    continue;
                }
                bound = 0.0;
            }
            if bound < scale {
                scale = bound;
                stopper = Some(j);
            }
        }
        (scale, stopper)
    }
}
