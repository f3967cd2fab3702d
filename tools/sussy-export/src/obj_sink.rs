//! OBJ mesh sink (.sussy -> OBJ)

use anyhow::{Context, Result};
use std::path::Path;

use sussy_format::{reconstruct, MeshSink, SussyMesh, Vec2, Vec3};

/// Builds Wavefront OBJ text from reconstructed mesh data
///
/// UVs and normals are written per face corner, so corner `k` of face `t`
/// references `vt`/`vn` number `3t + k + 1`.
#[derive(Debug, Default)]
pub struct ObjSink {
    out: String,
    faces: Vec<[u32; 3]>,
    has_uvs: bool,
    has_normals: bool,
}

impl ObjSink {
    pub fn new(name: &str) -> Self {
        Self {
            out: format!("# Imported from .sussy\no {}\n", name),
            ..Default::default()
        }
    }

    /// Append the face list and return the OBJ text
    pub fn finish(mut self) -> String {
        for (t, face) in self.faces.iter().enumerate() {
            self.out.push('f');
            for (k, v) in face.iter().enumerate() {
                let corner = 3 * t + k + 1;
                let vertex = v + 1;
                let entry = match (self.has_uvs, self.has_normals) {
                    (true, true) => format!(" {}/{}/{}", vertex, corner, corner),
                    (true, false) => format!(" {}/{}", vertex, corner),
                    (false, true) => format!(" {}//{}", vertex, corner),
                    (false, false) => format!(" {}", vertex),
                };
                self.out.push_str(&entry);
            }
            self.out.push('\n');
        }
        self.out
    }
}

impl MeshSink for ObjSink {
    fn set_geometry(&mut self, vertices: &[Vec3], faces: &[[u32; 3]]) {
        for [x, y, z] in vertices {
            self.out.push_str(&format!("v {} {} {}\n", x, y, z));
        }
        self.faces = faces.to_vec();
    }

    fn set_corner_uvs(&mut self, uvs: &[Vec2]) {
        for [u, v] in uvs {
            self.out.push_str(&format!("vt {} {}\n", u, v));
        }
        self.has_uvs = true;
    }

    fn set_corner_normals(&mut self, normals: &[Vec3]) {
        for [x, y, z] in normals {
            self.out.push_str(&format!("vn {} {} {}\n", x, y, z));
        }
        self.has_normals = true;
    }
}

/// Reconstruct a decoded mesh and write it as an OBJ file
pub fn write_obj_file(mesh: &SussyMesh, output: &Path) -> Result<()> {
    let name = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ImportedMesh");

    let mut sink = ObjSink::new(name);
    reconstruct(mesh, &mut sink).context("Mesh data is inconsistent")?;
    let text = sink.finish();

    std::fs::write(output, text).with_context(|| format!("Failed to write OBJ: {:?}", output))?;
    Ok(())
}
