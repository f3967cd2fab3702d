//! Mesh sources (OBJ/glTF -> per-corner attributes -> .sussy)

mod gltf;
mod obj;
mod types;

use anyhow::{Context, Result};
use std::path::Path;

use crate::registry::Registry;

pub use self::gltf::load_gltf;
pub use self::obj::load_obj;
pub use types::LoadedMesh;

/// Convert any registered source format to a `.sussy` file
pub fn convert_mesh(registry: &Registry, input: &Path, output: &Path) -> Result<()> {
    let loader = registry.exporter_for(input)?;
    let source = loader(input)?;

    let mesh = sussy_format::export_file(output, &source)
        .with_context(|| format!("Failed to export mesh: {:?}", output))?;

    tracing::info!(
        "Converted mesh: {} triangles -> {} pos/normals, {} uvs, {} bytes",
        source.triangles.len(),
        mesh.pos_normals.len(),
        mesh.uvs.len(),
        mesh.encoded_size()
    );

    Ok(())
}
