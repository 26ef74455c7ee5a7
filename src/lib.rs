//! Smallest enclosing balls of point sets in any dimension, and bounding
//! spheres of meshes built on top of them.
//!
//! ```
//! use miniball::{Miniball, PointSet};
//!
//! let points = PointSet::from_points(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]]).unwrap();
//! let ball = Miniball::new(&points);
//! assert!((ball.radius() - 2f64.sqrt()).abs() < 1e-12);
//! ```

pub mod bounding;
mod givens;
pub mod membership;
pub mod miniball;
pub mod model;
pub mod point_set;
pub mod quality;
mod support;

pub use crate::miniball::{Miniball, Settings};
pub use crate::point_set::PointSet;
pub use crate::quality::Quality;
pub use physics::BoundingSphere;
