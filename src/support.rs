//! The active set of the solver and the affine subspace it spans.
//!
//! Members are kept as global point indices; the last occupied slot is the
//! origin. The vectors from the origin to the other members form the columns
//! of a `dim x r` matrix `A = QR`, and the factorization is updated with
//! Givens rotations on every insertion or removal instead of recomputed.
//!
//! `Q` and `R` are flat `dim * dim` buffers addressed column-major: column
//! `j` of `Q` is `q[j * dim..(j + 1) * dim]`, and the same for `R`.

use crate::givens::Givens;
use crate::membership::Membership;
use crate::point_set::{dot, PointSet};

pub struct Support<'a> {
    points: &'a PointSet,
    dim: usize,
    members: Vec<usize>,
    membership: Membership,
    r: usize,
    q: Vec<f64>,
    rr: Vec<f64>,
    // scratch for the rank-1 and column updates
    u: Vec<f64>,
    w: Vec<f64>,
}

impl<'a> Support<'a> {
    pub fn new(points: &'a PointSet, seed: usize) -> Self {
        let dim = points.dimension();
        assert!(seed < points.size(), "seed {} out of range for {} points", seed, points.size());

        let mut q = vec![0.0; dim * dim];
        for i in 0..dim {
            q[i * dim + i] = 1.0;
        }
        let mut members = vec![0; dim + 1];
        members[0] = seed;
        let mut membership = Membership::with_capacity(points.size());
        membership.set(seed, true);

        Self {
            points,
            dim,
            members,
            membership,
            r: 0,
            q,
            rr: vec![0.0; dim * dim],
            u: vec![0.0; dim],
            w: vec![0.0; dim],
        }
    }

    pub fn size(&self) -> usize {
        self.r + 1
    }

    pub fn is_full(&self) -> bool {
        self.r == self.dim
    }

    pub fn is_member(&self, global: usize) -> bool {
        self.membership.get(global)
    }

    pub fn global_index(&self, local: usize) -> usize {
        assert!(
            local <= self.r,
            "local index {} out of range for support of size {}",
            local,
            self.size()
        );
        self.members[local]
    }

    pub fn any_member(&self) -> usize {
        self.members[self.r]
    }

    pub fn origin(&self) -> usize {
        self.members[self.r]
    }

    pub fn members(&self) -> &[usize] {
        &self.members[..=self.r]
    }

    #[inline]
    fn q_col(&self, j: usize) -> &[f64] {
        &self.q[j * self.dim..(j + 1) * self.dim]
    }

    #[inline]
    fn r_at(&self, col: usize, row: usize) -> f64 {
        self.rr[col * self.dim + row]
    }

    pub fn add(&mut self, global: usize) {
        assert!(!self.is_member(global), "point {} is already in the support", global);
        assert!(self.r < self.dim, "support already spans {} dimensions", self.dim);

        let point = self.points.point(global);
        let origin = self.points.point(self.origin());
        for i in 0..self.dim {
            self.u[i] = point[i] - origin[i];
        }
        self.append_column();

        self.membership.set(global, true);
        self.members[self.r + 1] = self.members[self.r];
        self.members[self.r] = global;
        self.r += 1;
    }

    /// Appends `u` as column `r` of `R` and restores the triangular shape.
    fn append_column(&mut self) {
        let dim = self.dim;
        let r = self.r;

        for i in 0..dim {
            self.rr[r * dim + i] = dot(self.q_col(i), &self.u);
        }

        for j in (r + 1..dim).rev() {
            let g = Givens::zeroing(self.rr[r * dim + j - 1], self.rr[r * dim + j]);
            // the rotated lower entry is an implicit zero
            self.rr[r * dim + j - 1] = g.fold(self.rr[r * dim + j - 1], self.rr[r * dim + j]);
            self.rotate_q(&g, j - 1, j);
        }
    }

    pub fn remove(&mut self, local: usize) {
        assert!(
            local <= self.r,
            "local index {} out of range for support of size {}",
            local,
            self.size()
        );
        assert!(self.r > 0, "cannot remove the last member of the support");

        self.membership.set(self.members[local], false);

        if local == self.r {
            // the member before the origin becomes the new origin; every column
            // shifts by the vector from it to the old origin
            let old_origin = self.points.point(self.members[self.r]);
            let new_origin = self.points.point(self.members[self.r - 1]);
            for i in 0..self.dim {
                self.u[i] = old_origin[i] - new_origin[i];
            }
            self.r -= 1;
            self.special_rank_1_update();
        } else {
            let dim = self.dim;
            self.rr.copy_within((local + 1) * dim..self.r * dim, local * dim);
            self.members.copy_within(local + 1..=self.r, local);
            self.r -= 1;
            self.hessenberg_clear(local);
        }
    }

    /// Folds `u * (1, ..., 1)` into `A = QR` after the origin moved.
    fn special_rank_1_update(&mut self) {
        let dim = self.dim;
        let r = self.r;

        for i in 0..dim {
            self.w[i] = dot(self.q_col(i), &self.u);
        }

        // rotate w down to a multiple of the first unit vector, recording
        // every rotation in R and Q
        for k in (1..dim).rev() {
            let g = Givens::zeroing(self.w[k - 1], self.w[k]);
            self.w[k - 1] = g.fold(self.w[k - 1], self.w[k]);

            // column k-1 has an implicit zero in row k
            self.rr[(k - 1) * dim + k] = -g.s * self.rr[(k - 1) * dim + k - 1];
            self.rr[(k - 1) * dim + k - 1] *= g.c;
            for j in k..r {
                let (lo, hi) = (j * dim + k - 1, j * dim + k);
                let (mut a, mut b) = (self.rr[lo], self.rr[hi]);
                g.apply(&mut a, &mut b);
                self.rr[lo] = a;
                self.rr[hi] = b;
            }
            self.rotate_q(&g, k - 1, k);
        }

        for j in 0..r {
            self.rr[j * dim] += self.w[0];
        }

        self.hessenberg_clear(0);
    }

    /// Clears the subdiagonal of `R` from column `pos` on.
    fn hessenberg_clear(&mut self, mut pos: usize) {
        let dim = self.dim;
        while pos < self.r {
            let g = Givens::zeroing(self.r_at(pos, pos), self.r_at(pos, pos + 1));
            self.rr[pos * dim + pos] = g.fold(self.r_at(pos, pos), self.r_at(pos, pos + 1));
            for j in pos + 1..self.r {
                let (lo, hi) = (j * dim + pos, j * dim + pos + 1);
                let (mut a, mut b) = (self.rr[lo], self.rr[hi]);
                g.apply(&mut a, &mut b);
                self.rr[lo] = a;
                self.rr[hi] = b;
            }
            self.rotate_q(&g, pos, pos + 1);
            pos += 1;
        }
    }

    fn rotate_q(&mut self, g: &Givens, lo: usize, hi: usize) {
        let dim = self.dim;
        for i in 0..dim {
            let (mut a, mut b) = (self.q[lo * dim + i], self.q[hi * dim + i]);
            g.apply(&mut a, &mut b);
            self.q[lo * dim + i] = a;
            self.q[hi * dim + i] = b;
        }
    }

    /// Writes the vector from `point` to its projection onto the affine hull
    /// into `out` and returns its squared length.
    pub fn shortest_vector_to_span(&self, point: &[f64], out: &mut [f64]) -> f64 {
        let origin = self.points.point(self.origin());
        for i in 0..self.dim {
            out[i] = origin[i] - point[i];
        }
        for j in 0..self.r {
            let q = self.q_col(j);
            let scale = dot(out, q);
            for i in 0..self.dim {
                out[i] -= scale * q[i];
            }
        }
        dot(out, out)
    }

    /// Coefficients of `point` as an affine combination of the members, in
    /// member order. Only meaningful for points on the affine hull.
    pub fn find_affine_coefficients(&self, point: &[f64], lambdas: &mut [f64]) {
        let origin = self.points.point(self.origin());
        let mut origin_lambda = 1.0;
        for j in (0..self.r).rev() {
            let q = self.q_col(j);
            let mut w: f64 = (0..self.dim).map(|k| q[k] * (point[k] - origin[k])).sum();
            for k in j + 1..self.r {
                w -= lambdas[k] * self.r_at(k, j);
            }
            lambdas[j] = w / self.r_at(j, j);
            origin_lambda -= lambdas[j];
        }
        lambdas[self.r] = origin_lambda;
    }

    /// Largest deviation of the members' own affine coordinates from the
    /// unit vectors they should be.
    pub fn representation_error(&self) -> f64 {
        let mut lambdas = vec![0.0; self.size()];
        let mut max: f64 = 0.0;
        for j in 0..self.size() {
            self.find_affine_coefficients(self.points.point(self.members[j]), &mut lambdas);
            for (i, lambda) in lambdas.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                max = max.max((lambda - expected).abs());
            }
        }
        max
    }
}
