use crate::bounds::Aabb;
use crate::error::LoadError;
use crate::raw::{MeshOptions, RawMesh};
use crate::transform::Placement;
use crate::weld::{weld, WeldedMesh};
use nalgebra::Matrix4;
use std::path::Path;

/// An obj loaded all the way to upload-ready buffers.
///
/// The geometry and bounds are fixed once loaded; to change the mesh, load
/// a new one. Only the placement is meant to be changed afterwards.
#[derive(Clone, Debug)]
pub struct RenderableMesh {
    geometry: WeldedMesh,
    bounds: Aabb,
    pub placement: Placement,
}

impl RenderableMesh {
    pub fn load(path: impl AsRef<Path>, options: &MeshOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let obj = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("read {} bytes from {}", obj.len(), path.display());
        Self::from_obj_str(&obj, options)
    }

    pub fn from_obj_str(obj: &str, options: &MeshOptions) -> Result<Self, LoadError> {
        Self::from_raw(&RawMesh::parse(obj, options)?)
    }

    /// Fails with [`LoadError::NoFaces`] for a mesh without triangles, on
    /// top of whatever welding rejects.
    pub fn from_raw(raw: &RawMesh) -> Result<Self, LoadError> {
        if raw.face_count() == 0 {
            return Err(LoadError::NoFaces);
        }
        let geometry = weld(raw)?;
        let bounds = Aabb::from_points(geometry.vertices.iter().map(|v| &v.position))
            .ok_or(LoadError::NoFaces)?;
        log::info!(
            "loaded {} triangles as {} vertices ({} coordinates in the obj)",
            geometry.face_count(),
            geometry.vertices.len(),
            raw.positions.len() / 3,
        );
        Ok(Self {
            geometry,
            bounds,
            placement: Placement::default(),
        })
    }

    pub fn geometry(&self) -> &WeldedMesh {
        &self.geometry
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// How many indices a draw call covers.
    pub fn index_count(&self) -> u32 {
        self.geometry.indices.len() as u32
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.placement.model_matrix(self.bounds.center())
    }
}
