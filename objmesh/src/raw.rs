// obj gives every face corner up to three separate indices, one each into the
// position, normal, and texcoord lists; this is that data more or less as the
// parser hands it over, before anything gets welded together

use crate::error::{Attribute, LoadError};
use crate::weld::CornerKey;
use nalgebra::Vector3;

/// How an obj should be turned into a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshOptions {
    /// Keep texture coordinates. When off they are dropped before welding,
    /// so corners differing only in UV collapse into one vertex.
    pub texcoords: bool,
    /// Make up smooth normals for objs that don't have any instead of
    /// failing with [`LoadError::MissingNormals`].
    pub generate_normals: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            texcoords: true,
            generate_normals: true,
        }
    }
}

/// A triangle mesh with independent index streams per attribute.
///
/// `positions` and `normals` hold 3 floats per entry, `texcoords` 2.
/// The index streams hold one entry per face corner, 3 corners per triangle
/// in winding order. `texcoord_indices` is empty for meshes without UVs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub position_indices: Vec<u32>,
    pub normal_indices: Vec<u32>,
    pub texcoord_indices: Vec<u32>,
}

impl RawMesh {
    /// Parses obj text. Every object and group in the file ends up in the
    /// one mesh; polygons are fan-triangulated and materials are ignored.
    pub fn parse(obj: &str, options: &MeshOptions) -> Result<Self, LoadError> {
        let load_options = tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _) = tobj::load_obj_buf(&mut obj.as_bytes(), &load_options, |_| {
            Ok((Vec::new(), Default::default()))
        })
        .map_err(LoadError::from_tobj)?;
        log::debug!("obj has {} model(s)", models.len());

        let mut parts = Vec::with_capacity(models.len());
        for model in models {
            let mut part = RawMesh::from(&model.mesh);
            let corners = part.corner_count();
            // tobj only records an attribute index for the corners that have
            // one, so a model mixing `f 1/1/1` and `f 1//1` comes out short
            if part.has_texcoords() && part.texcoord_indices.len() != corners {
                log::warn!("model {:?} has uvs on only some faces", model.name);
                part.strip_texcoords();
            }
            if corners > 0 && part.normal_indices.len() != corners {
                if !options.generate_normals {
                    return Err(LoadError::MissingNormals);
                }
                log::warn!(
                    "model {:?} has no normals on some faces, generating them",
                    model.name
                );
                part.generate_normals();
            }
            parts.push(part);
        }

        let keep_texcoords = options.texcoords && parts.iter().all(RawMesh::has_texcoords);
        if options.texcoords && !keep_texcoords && parts.iter().any(RawMesh::has_texcoords) {
            log::warn!("some models have no texcoords, dropping texcoords for the whole mesh");
        }

        let mut mesh = RawMesh::default();
        for mut part in parts {
            if !keep_texcoords {
                part.strip_texcoords();
            }
            mesh.append(part);
        }
        Ok(mesh)
    }

    pub fn corner_count(&self) -> usize {
        self.position_indices.len()
    }

    pub fn face_count(&self) -> usize {
        self.position_indices.len() / 3
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoord_indices.is_empty()
    }

    /// The dedup key of face corner `corner`.
    ///
    /// Panics if `corner` is past the end of the position or normal index
    /// streams; [`RawMesh::validate`] rules that out.
    pub fn corner(&self, corner: usize) -> CornerKey {
        CornerKey {
            position: self.position_indices[corner],
            normal: self.normal_indices[corner],
            texcoord: self.texcoord_indices.get(corner).copied(),
        }
    }

    /// Checks the index streams line up with each other. Doesn't look at
    /// whether the indices are in range, that happens while welding.
    pub fn validate(&self) -> Result<(), LoadError> {
        let corners = self.corner_count();
        if corners % 3 != 0 {
            return Err(LoadError::NotTriangulated { corners });
        }
        if corners > 0 && self.normal_indices.is_empty() {
            return Err(LoadError::MissingNormals);
        }
        if self.normal_indices.len() != corners {
            return Err(LoadError::MismatchedIndices {
                attribute: Attribute::Normal,
                len: self.normal_indices.len(),
                expected: corners,
            });
        }
        if self.has_texcoords() && self.texcoord_indices.len() != corners {
            return Err(LoadError::MismatchedIndices {
                attribute: Attribute::TexCoord,
                len: self.texcoord_indices.len(),
                expected: corners,
            });
        }
        Ok(())
    }

    /// Appends another mesh's triangles after this one's, shifting its
    /// indices past the coordinates already here.
    pub fn append(&mut self, other: RawMesh) {
        let shift = |indices: &mut Vec<u32>, others: Vec<u32>, base: usize| {
            indices.extend(others.into_iter().map(|i| i + base as u32));
        };
        shift(
            &mut self.position_indices,
            other.position_indices,
            self.positions.len() / 3,
        );
        shift(
            &mut self.normal_indices,
            other.normal_indices,
            self.normals.len() / 3,
        );
        shift(
            &mut self.texcoord_indices,
            other.texcoord_indices,
            self.texcoords.len() / 2,
        );
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.texcoords.extend(other.texcoords);
    }

    pub fn strip_texcoords(&mut self) {
        self.texcoords.clear();
        self.texcoord_indices.clear();
    }

    /// Replaces the normals with smooth per-position ones: each position
    /// gets the normalized sum of the (area weighted) face normals of every
    /// triangle touching it. Triangles with an out of range corner are
    /// skipped here and left for welding to report.
    pub fn generate_normals(&mut self) {
        let count = self.positions.len() / 3;
        let position = |i: u32| -> Option<Vector3<f32>> {
            let i = i as usize;
            (i < count).then(|| {
                Vector3::new(
                    self.positions[i * 3],
                    self.positions[i * 3 + 1],
                    self.positions[i * 3 + 2],
                )
            })
        };

        let mut sums = vec![Vector3::<f32>::zeros(); count];
        for triangle in self.position_indices.chunks_exact(3) {
            let (Some(v1), Some(v2), Some(v3)) =
                (position(triangle[0]), position(triangle[1]), position(triangle[2]))
            else {
                continue;
            };
            let n = (v2 - v1).cross(&(v3 - v1));
            for &i in triangle {
                sums[i as usize] += n;
            }
        }

        self.normals = sums
            .iter()
            .flat_map(|n| {
                let n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
                [n.x, n.y, n.z]
            })
            .collect();
        self.normal_indices = self.position_indices.clone();
    }
}

impl From<&tobj::Mesh> for RawMesh {
    fn from(mesh: &tobj::Mesh) -> Self {
        Self {
            positions: mesh.positions.clone(),
            normals: mesh.normals.clone(),
            texcoords: mesh.texcoords.clone(),
            position_indices: mesh.indices.clone(),
            normal_indices: mesh.normal_indices.clone(),
            texcoord_indices: mesh.texcoord_indices.clone(),
        }
    }
}
