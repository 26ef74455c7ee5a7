use std::path::Path;
use anyhow::*;
use cgmath::Vector3;
use tobj::LoadOptions;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimpleVertex {
    pub position: [f32; 3],
}

unsafe impl bytemuck::Pod for SimpleVertex {}

unsafe impl bytemuck::Zeroable for SimpleVertex {}

pub struct Model {
    pub label: String,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertices.len()).sum()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.vertices.iter().map(|vertex| vertex.position))
    }
}

pub struct Mesh {
    pub vertices: Vec<ModelVertex>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct ModelVertex {
    pub position: Vector3<f32>,
}

pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Model> {
        let path = path.as_ref();
        let (obj_models, _) = tobj::load_obj(
            path,
            &LoadOptions {
                single_index: true,
                triangulate: true,
                ignore_points: false,
                ignore_lines: false,
            },
        )
        .with_context(|| format!("failed to load model {}", path.display()))?;

        let meshes = obj_models
            .into_iter()
            .map(|m| Mesh {
                vertices: m
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| ModelVertex {
                        position: Vector3::new(p[0], p[1], p[2]),
                    })
                    .collect(),
            })
            .collect();

        let label = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Ok(Model {
            label,
            meshes,
        })
    }
}
