//! glTF/GLB mesh source

use anyhow::{bail, Context, Result};
use std::path::Path;

use sussy_format::{LoopAttributes, Vec2, Vec3};

use super::types::{face_normal, LoadedMesh};

/// Load every triangle primitive of every mesh in a glTF/GLB file
///
/// Node transforms are not applied. Primitives without `NORMAL` get flat
/// face normals; UVs (`TEXCOORD_0`) are kept only if every primitive has them.
pub fn load_gltf(input: &Path) -> Result<LoadedMesh> {
    let (document, buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let mut triangles: Vec<[LoopAttributes; 3]> = Vec::new();
    let mut has_uvs = true;

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                tracing::warn!(
                    "Skipping mesh {} primitive {}: mode {:?} is not triangles",
                    mesh.index(),
                    primitive.index(),
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            // Positions (required)
            let positions: Vec<Vec3> = reader
                .read_positions()
                .context("No positions in primitive")?
                .collect();

            // Normals (optional)
            let normals = per_vertex(
                "normal",
                reader.read_normals().map(|iter| iter.collect::<Vec<Vec3>>()),
                positions.len(),
            );
            if normals.is_none() {
                tracing::warn!(
                    "Mesh {} primitive {} has no normals, using face normals",
                    mesh.index(),
                    primitive.index()
                );
            }

            // UVs (optional)
            let uvs = per_vertex(
                "TEXCOORD_0",
                reader
                    .read_tex_coords(0)
                    .map(|iter| iter.into_f32().collect::<Vec<Vec2>>()),
                positions.len(),
            );
            if uvs.is_none() {
                has_uvs = false;
            }

            // Indices (optional) - non-indexed primitives use vertex order
            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                bail!(
                    "Index {} in mesh {} primitive {} exceeds vertex count {}",
                    bad,
                    mesh.index(),
                    primitive.index(),
                    positions.len()
                );
            }
            if indices.len() % 3 != 0 {
                tracing::warn!(
                    "Index count {} is not a multiple of 3, dropping trailing indices",
                    indices.len()
                );
            }

            for tri in indices.chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
                let flat = face_normal(positions[a], positions[b], positions[c]);
                triangles.push([a, b, c].map(|i| LoopAttributes {
                    position: positions[i],
                    normal: normals.as_ref().map_or(flat, |n| n[i]),
                    uv: uvs.as_ref().map(|uv| uv[i]),
                }));
            }
        }
    }

    if triangles.is_empty() {
        bail!("No triangles found in glTF file");
    }

    if !has_uvs {
        if triangles.iter().flatten().any(|c| c.uv.is_some()) {
            tracing::warn!("Not every primitive has TEXCOORD_0, ignoring UVs");
        }
        for corner in triangles.iter_mut().flatten() {
            corner.uv = None;
        }
    }

    Ok(LoadedMesh { triangles, has_uvs })
}

/// Keep a vertex attribute only if it has one value per position
fn per_vertex<T>(name: &str, values: Option<Vec<T>>, vertex_count: usize) -> Option<Vec<T>> {
    values.filter(|v| {
        let ok = v.len() == vertex_count;
        if !ok {
            tracing::warn!(
                "Mismatched {} count ({} vs {} positions), ignoring attribute",
                name,
                v.len(),
                vertex_count
            );
        }
        ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_vertex_count_check() {
        let uvs: Vec<Vec2> = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        assert_eq!(per_vertex("TEXCOORD_0", Some(uvs.clone()), 3), Some(uvs.clone()));
        assert_eq!(per_vertex("TEXCOORD_0", Some(uvs), 4), None);
        assert_eq!(per_vertex::<Vec3>("normal", None, 4), None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_gltf(Path::new("does/not/exist.glb")).unwrap_err();
        assert!(err.to_string().contains("Failed to load glTF"));
    }
}
