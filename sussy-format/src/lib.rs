//! Sussy: compact binary container for indexed triangle meshes
//!
//! Raw host meshes carry one attribute set per triangle corner (position,
//! normal, UV). A `.sussy` file stores two independently deduplicated tables
//! instead - (position, normal) pairs and UV coordinates - and every triangle
//! corner references both tables by 16-bit index.
//!
//! # Layout
//! ```text
//! u16                 pos_normal_count (N)
//! N * f32 * 6         position xyz, normal xyz
//! u16                 uv_count (M)
//! M * f32 * 2         u, v
//! u16                 triangle_count (T)
//! T * 3 * (u16, u16)  (pos_normal index, uv index) per corner
//! ```
//!
//! All values are little-endian. No magic bytes, version tag or checksum;
//! the total size is always `6 + 24N + 8M + 12T`.
//!
//! # Usage
//!
//! ```
//! use sussy_format::{decode, encode, LoopAttributes, TriangleList};
//!
//! let corner = |x: f32| LoopAttributes {
//!     position: [x, 0.0, 0.0],
//!     normal: [0.0, 0.0, 1.0],
//!     uv: Some([x, 0.0]),
//! };
//! let source = TriangleList::new(vec![[corner(0.0), corner(1.0), corner(2.0)]]);
//!
//! let bytes = encode(&source).unwrap();
//! assert_eq!(bytes.len(), 114);
//!
//! let mesh = decode(&bytes).unwrap();
//! assert_eq!(mesh.triangles.len(), 1);
//! ```

mod cursor;
mod decode;
mod dedup;
mod encode;
mod error;
mod host;
mod mesh;

pub use decode::{decode, import_file, read_mesh};
pub use dedup::{DedupKey, DedupTable};
pub use encode::{
    build_mesh, encode, encode_mesh, export_file, write_mesh, LoopAttributes, MeshSource,
    TriangleList,
};
pub use error::{Section, SussyError, SussyResult, TableKind};
pub use host::{reconstruct, MeshSink, WeldedMesh};
pub use mesh::{Corner, PositionNormal, SussyMesh, Triangle, Vec2, Vec3};

/// File extension used for Sussy meshes
pub const SUSSY_EXT: &str = "sussy";

/// Maximum number of entries in either attribute table, and maximum triangle count
pub const MAX_ENTRIES: usize = u16::MAX as usize;

/// Size of the three u16 section counts
pub const HEADER_BYTES: usize = 6;
/// Size of one (position, normal) entry
pub const POS_NORMAL_BYTES: usize = 24;
/// Size of one UV entry
pub const UV_BYTES: usize = 8;
/// Size of one triangle (3 corners of two u16 indices)
pub const TRIANGLE_BYTES: usize = 12;

/// Encoded size in bytes of a mesh with the given table and triangle counts
#[inline]
pub const fn encoded_size(pos_normals: usize, uvs: usize, triangles: usize) -> usize {
    HEADER_BYTES + POS_NORMAL_BYTES * pos_normals + UV_BYTES * uvs + TRIANGLE_BYTES * triangles
}
