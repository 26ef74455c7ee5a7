use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// `tolerance` is relative to the radius, with an absolute floor for tiny spheres.
    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        let slack = tolerance * self.radius.max(1.0);
        self.center.distance(point) <= self.radius + slack
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}
