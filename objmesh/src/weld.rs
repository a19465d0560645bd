// gpus want one index buffer shared by every attribute, obj gives a separate
// index per attribute per corner; so every distinct combo of
// (position, normal, texcoord) index becomes its own vertex and the corners
// get re-indexed against those. two corners only share a vertex if all
// three indices match exactly, a hard edge reusing a position with a
// different normal still needs its own vertex

use crate::error::{Attribute, LoadError, OutOfRange};
use crate::raw::RawMesh;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// The identity of a face corner: its index into each coordinate array.
/// `texcoord` is `None` for every corner of a mesh without UVs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerKey {
    pub position: u32,
    pub normal: u32,
    pub texcoord: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: Option<[f32; 2]>,
}

/// Deduplicated vertices plus the triangle list indexing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeldedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Parallel flat attribute arrays, all indexed by the same vertex index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexStreams {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Option<Vec<f32>>,
}

impl WeldedMesh {
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_texcoords(&self) -> bool {
        self.vertices.first().map_or(false, |v| v.texcoord.is_some())
    }

    /// Splits the vertices into one flat array per attribute, the layout
    /// the vertex buffers take.
    pub fn streams(&self) -> VertexStreams {
        let positions = self.vertices.iter().flat_map(|v| v.position).collect();
        let normals = self.vertices.iter().flat_map(|v| v.normal).collect();
        let texcoords = if self.has_texcoords() {
            self.vertices
                .iter()
                .map(|v| v.texcoord)
                .collect::<Option<Vec<_>>>()
                .map(|t| t.into_iter().flatten().collect())
        } else {
            None
        };
        VertexStreams {
            positions,
            normals,
            texcoords,
        }
    }
}

/// Welds a raw mesh into a single-indexed one.
///
/// Vertices come out in the order their corners are first seen and the
/// indices keep the input's face order and winding, so the same mesh always
/// welds to the same output. Any index past the end of its coordinate array
/// fails the whole weld.
pub fn weld(mesh: &RawMesh) -> Result<WeldedMesh, LoadError> {
    mesh.validate()?;

    let corners = mesh.corner_count();
    let mut defined = HashMap::<CornerKey, u32>::with_capacity(corners);
    let mut vertices = vec![];
    let mut indices = Vec::with_capacity(corners);
    for corner in 0..corners {
        let key = mesh.corner(corner);
        match defined.entry(key) {
            Entry::Occupied(slot) => indices.push(*slot.get()),
            Entry::Vacant(slot) => {
                let index = vertices.len() as u32;
                vertices.push(resolve(mesh, corner, key)?);
                slot.insert(index);
                indices.push(index);
            }
        }
    }

    log::debug!(
        "welded {} corners into {} vertices",
        indices.len(),
        vertices.len()
    );
    Ok(WeldedMesh { vertices, indices })
}

fn resolve(mesh: &RawMesh, corner: usize, key: CornerKey) -> Result<Vertex, LoadError> {
    Ok(Vertex {
        position: fetch(&mesh.positions, key.position, Attribute::Position, corner)?,
        normal: fetch(&mesh.normals, key.normal, Attribute::Normal, corner)?,
        texcoord: key
            .texcoord
            .map(|t| fetch(&mesh.texcoords, t, Attribute::TexCoord, corner))
            .transpose()?,
    })
}

fn fetch<const N: usize>(
    data: &[f32],
    index: u32,
    attribute: Attribute,
    corner: usize,
) -> Result<[f32; N], LoadError> {
    let start = index as usize * N;
    data.get(start..start + N)
        .and_then(|s| <[f32; N]>::try_from(s).ok())
        .ok_or(LoadError::IndexOutOfRange {
            attribute,
            detail: Some(OutOfRange {
                corner,
                index,
                count: data.len() / N,
            }),
        })
}
