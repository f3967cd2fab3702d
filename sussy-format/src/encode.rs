//! Mesh encoder: per-corner attributes -> deduplicated tables -> bytes

use std::io::Write;
use std::path::Path;

use crate::cursor::{write_f32, write_u16};
use crate::dedup::DedupTable;
use crate::error::{Section, SussyError, SussyResult, TableKind};
use crate::mesh::{Corner, PositionNormal, SussyMesh, Triangle, Vec2, Vec3};
use crate::MAX_ENTRIES;

/// UV used for corners when the mesh has no UV layer
const NO_UV: Vec2 = [0.0, 0.0];

/// Attributes of one triangle corner (a host mesh "loop")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopAttributes {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Option<Vec2>,
}

/// Host mesh attribute source consumed by the encoder
pub trait MeshSource {
    /// Whether the mesh carries a UV layer. When false, every corner uses
    /// the `(0, 0)` sentinel regardless of its own `uv`.
    fn has_uvs(&self) -> bool;

    /// Triangles in traversal order; this order fixes the table layout
    fn triangles(&self) -> impl Iterator<Item = [LoopAttributes; 3]> + '_;
}

/// Plain in-memory triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleList {
    pub triangles: Vec<[LoopAttributes; 3]>,
}

impl TriangleList {
    pub fn new(triangles: Vec<[LoopAttributes; 3]>) -> Self {
        Self { triangles }
    }
}

impl MeshSource for TriangleList {
    fn has_uvs(&self) -> bool {
        self.triangles.iter().flatten().any(|c| c.uv.is_some())
    }

    fn triangles(&self) -> impl Iterator<Item = [LoopAttributes; 3]> + '_ {
        self.triangles.iter().copied()
    }
}

/// Deduplicate a source's corners into a [`SussyMesh`]
///
/// Corners are visited triangle by triangle, so table entries appear in
/// first-seen order. Fails with `CapacityExceeded` as soon as either table
/// or the triangle list would need a 65536th entry.
pub fn build_mesh<S: MeshSource + ?Sized>(source: &S) -> SussyResult<SussyMesh> {
    let use_uvs = source.has_uvs();

    let mut pos_normals = DedupTable::new(TableKind::PosNormal);
    let mut uvs = DedupTable::new(TableKind::Uv);
    let mut triangles = Vec::new();

    for tri in source.triangles() {
        if triangles.len() >= MAX_ENTRIES {
            return Err(SussyError::CapacityExceeded {
                table: TableKind::Triangles,
            });
        }

        let mut corners = [Corner::default(); 3];
        for (corner, attrs) in corners.iter_mut().zip(&tri) {
            let pos_normal =
                pos_normals.insert_or_get(PositionNormal::new(attrs.position, attrs.normal))?;
            let uv = match attrs.uv {
                Some(uv) if use_uvs => uv,
                _ => NO_UV,
            };
            let uv = uvs.insert_or_get(uv)?;
            *corner = Corner::new(pos_normal, uv);
        }
        triangles.push(Triangle::new(corners));
    }

    Ok(SussyMesh {
        pos_normals: pos_normals.into_entries(),
        uvs: uvs.into_entries(),
        triangles,
    })
}

/// Write a complete Sussy file
///
/// The mesh is validated first, so a failing mesh writes nothing. IO errors
/// part way through can still leave partial output in `w`; use [`encode`]
/// or [`export_file`] when the output must be all-or-nothing.
pub fn write_mesh<W: Write>(w: &mut W, mesh: &SussyMesh) -> SussyResult<()> {
    mesh.validate()?;

    write_u16(w, mesh.pos_normals.len(), Section::PosNormalCount)?;
    for entry in &mesh.pos_normals {
        for &f in entry.position.iter().chain(&entry.normal) {
            write_f32(w, f)?;
        }
    }

    write_u16(w, mesh.uvs.len(), Section::UvCount)?;
    for uv in &mesh.uvs {
        write_f32(w, uv[0])?;
        write_f32(w, uv[1])?;
    }

    write_u16(w, mesh.triangles.len(), Section::TriangleCount)?;
    for tri in &mesh.triangles {
        for corner in &tri.corners {
            write_u16(w, corner.pos_normal as usize, Section::Triangles)?;
            write_u16(w, corner.uv as usize, Section::Triangles)?;
        }
    }

    Ok(())
}

/// Encode an already-built mesh into a byte buffer
pub fn encode_mesh(mesh: &SussyMesh) -> SussyResult<Vec<u8>> {
    let mut out = Vec::with_capacity(mesh.encoded_size());
    write_mesh(&mut out, mesh)?;
    tracing::debug!(
        "Encoded Sussy mesh: {} pos/normals, {} uvs, {} triangles, {} bytes",
        mesh.pos_normals.len(),
        mesh.uvs.len(),
        mesh.triangles.len(),
        out.len()
    );
    Ok(out)
}

/// Deduplicate and encode a source into a byte buffer
pub fn encode<S: MeshSource + ?Sized>(source: &S) -> SussyResult<Vec<u8>> {
    encode_mesh(&build_mesh(source)?)
}

/// Encode a source and commit it to `path`
///
/// The file is encoded in memory, written to a temporary file next to
/// `path` and renamed over it. On any error the destination is untouched.
/// Returns the encoded mesh.
pub fn export_file<S: MeshSource + ?Sized>(path: &Path, source: &S) -> SussyResult<SussyMesh> {
    let mesh = build_mesh(source)?;
    let bytes = encode_mesh(&mesh)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(mesh)
}
