//! Bounding spheres for meshes, computed with the miniball solver.

use glam::Vec3;
use physics::BoundingSphere;

use crate::miniball::Miniball;
use crate::model::{Model, SimpleVertex};
use crate::point_set::PointSet;

/// Smallest sphere enclosing `points`, or `None` when there are none.
pub fn sphere_from_points(points: &[Vec3]) -> Option<BoundingSphere> {
    let coords: Vec<f32> = points.iter().flat_map(|p| p.to_array()).collect();
    sphere_from_coords(&coords)
}

pub fn sphere_from_vertices(vertices: &[SimpleVertex]) -> Option<BoundingSphere> {
    sphere_from_coords(bytemuck::cast_slice(vertices))
}

pub fn sphere_from_model(model: &Model) -> Option<BoundingSphere> {
    let coords: Vec<f32> = model.positions().flat_map(|p| [p.x, p.y, p.z]).collect();
    sphere_from_coords(&coords)
}

fn sphere_from_coords(coords: &[f32]) -> Option<BoundingSphere> {
    // a multiple of three by construction
    let points = PointSet::from_f32(coords, 3).ok()?;
    let miniball = Miniball::new(&points);
    if miniball.is_empty() {
        return None;
    }
    let c = miniball.center();
    Some(BoundingSphere::new(
        Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32),
        miniball.radius() as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mesh, ModelVertex};
    use cgmath::Vector3;

    fn cube_corners() -> Vec<Vec3> {
        let mut corners = vec![];
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    corners.push(Vec3::new(x + 5.0, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn test_cube_sphere() {
        let sphere = sphere_from_points(&cube_corners()).unwrap();
        assert!(sphere.center.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-5);
        assert!((sphere.radius - 3f32.sqrt()).abs() < 1e-5);
        for corner in cube_corners() {
            assert!(sphere.contains(corner, 1e-5));
        }
    }

    #[test]
    fn test_no_points_no_sphere() {
        assert_eq!(sphere_from_points(&[]), None);
        assert_eq!(sphere_from_vertices(&[]), None);
    }

    #[test]
    fn test_vertices_match_points() {
        let vertices: Vec<SimpleVertex> = cube_corners()
            .iter()
            .map(|p| SimpleVertex { position: p.to_array() })
            .collect();
        assert_eq!(sphere_from_vertices(&vertices), sphere_from_points(&cube_corners()));
    }

    #[test]
    fn test_sphere_of_offset_segment() {
        let model = Model {
            label: String::from("offset"),
            meshes: vec![Mesh {
                vertices: vec![
                    ModelVertex { position: Vector3::new(4.0, 0.0, 0.0) },
                    ModelVertex { position: Vector3::new(6.0, 0.0, 0.0) },
                ],
            }],
        };
        let sphere = sphere_from_model(&model).unwrap();
        assert!(sphere.center.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-6);
        assert!((sphere.radius - 1.0).abs() < 1e-6);
    }
}
