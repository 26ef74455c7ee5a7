/// A plane rotation `(c, s)` chosen for a pair `(a, b)` such that
/// ```text
/// c * a + s * b = ±sqrt(a² + b²)
/// c * b - s * a = 0
/// ```
/// The sign of the result is not fixed, so nothing may depend on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Givens {
    pub c: f64,
    pub s: f64,
}

impl Givens {
    pub fn zeroing(a: f64, b: f64) -> Self {
        if b == 0.0 {
            Givens { c: 1.0, s: 0.0 }
        } else if b.abs() > a.abs() {
            let t = a / b;
            let s = 1.0 / (1.0 + t * t).sqrt();
            Givens { c: s * t, s }
        } else {
            let t = b / a;
            let c = 1.0 / (1.0 + t * t).sqrt();
            Givens { c, s: c * t }
        }
    }

    /// Rotated value of the entry that survives.
    #[inline]
    pub fn fold(&self, a: f64, b: f64) -> f64 {
        self.c * a + self.s * b
    }

    #[inline]
    pub fn apply(&self, a: &mut f64, b: &mut f64) {
        let (ta, tb) = (*a, *b);
        *a = self.c * ta + self.s * tb;
        *b = self.c * tb - self.s * ta;
    }
}
