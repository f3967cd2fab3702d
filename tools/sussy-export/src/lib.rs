//! sussy-export library
//!
//! Host glue around the `sussy-format` codec: OBJ/glTF attribute sources,
//! an OBJ mesh sink, the debug dump formatter, format registration and the
//! batch build manifest.

pub mod dump;
pub mod manifest;
pub mod mesh;
pub mod obj_sink;
pub mod registry;

// Re-export the codec for callers that only depend on the tool crate
pub use sussy_format::{decode, encode, import_file, SussyError, SussyMesh, SUSSY_EXT};

pub use dump::{format_dump, MeshDump};
pub use mesh::{convert_mesh, load_gltf, load_obj, LoadedMesh};
pub use obj_sink::{write_obj_file, ObjSink};
pub use registry::{register, FormatRegistry, Registry};
