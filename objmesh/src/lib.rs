//! Wavefront obj loading for rendering.
//!
//! tobj does the parsing; this crate turns its output (a separate index per
//! attribute per face corner) into the one-index-per-vertex form vertex and
//! element buffers need, and keeps the bounds and placement that go with a
//! loaded mesh. Nothing here touches a graphics api.

mod error;

pub mod bounds;
pub mod camera;
pub mod raw;
pub mod renderable;
pub mod transform;
pub mod weld;

pub use bounds::Aabb;
pub use camera::OrbitCamera;
pub use error::{Attribute, LoadError, OutOfRange};
pub use raw::{MeshOptions, RawMesh};
pub use renderable::RenderableMesh;
pub use transform::{normal_matrix, Placement};
pub use weld::{weld, CornerKey, Vertex, VertexStreams, WeldedMesh};
