use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which coordinate array an index points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    TexCoord,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::TexCoord => "texcoord",
        })
    }
}

/// Everything that can stop a mesh from loading.
///
/// None of these leave anything half-built behind; a load either hands back
/// a complete mesh or one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse obj: {0}")]
    Parse(#[from] tobj::LoadError),
    #[error("obj contains no triangles")]
    NoFaces,
    #[error("mesh has no normals")]
    MissingNormals,
    #[error("{corners} face corners is not a whole number of triangles")]
    NotTriangulated { corners: usize },
    #[error("{attribute} index stream has {len} entries, expected {expected}")]
    MismatchedIndices {
        attribute: Attribute,
        len: usize,
        expected: usize,
    },
    #[error("{attribute} index out of range{}", describe(detail))]
    IndexOutOfRange {
        attribute: Attribute,
        /// Missing when the parser rejected the face before any corner was
        /// numbered.
        detail: Option<OutOfRange>,
    },
}

/// Where an out of range index was found while welding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub corner: usize,
    pub index: u32,
    pub count: usize,
}

fn describe(detail: &Option<OutOfRange>) -> String {
    match detail {
        Some(d) => format!(
            ": face corner {} references {} but there are only {}",
            d.corner, d.index, d.count
        ),
        None => String::new(),
    }
}

impl LoadError {
    /// Sorts tobj's out of bounds face errors into [`LoadError::IndexOutOfRange`],
    /// everything else is a plain parse failure.
    pub(crate) fn from_tobj(e: tobj::LoadError) -> Self {
        let attribute = match e {
            tobj::LoadError::FaceVertexOutOfBounds => Attribute::Position,
            tobj::LoadError::FaceNormalOutOfBounds => Attribute::Normal,
            tobj::LoadError::FaceTexCoordOutOfBounds => Attribute::TexCoord,
            e => return LoadError::Parse(e),
        };
        LoadError::IndexOutOfRange {
            attribute,
            detail: None,
        }
    }
}
