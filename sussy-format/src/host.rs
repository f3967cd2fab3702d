//! Host mesh reconstruction
//!
//! Host meshes share vertices by position only and keep normals and UVs per
//! face corner. [`reconstruct`] welds the position/normal table down to
//! unique positions and replays the triangles as faces over those vertices.

use crate::dedup::DedupTable;
use crate::error::{SussyResult, TableKind};
use crate::mesh::{SussyMesh, Vec2, Vec3};

/// Host-side mesh builder fed by [`reconstruct`]
pub trait MeshSink {
    /// Welded vertex positions and triangles as vertex index triples
    fn set_geometry(&mut self, vertices: &[Vec3], faces: &[[u32; 3]]);

    /// One UV per face corner, in face order. Not called when the file has no UVs.
    fn set_corner_uvs(&mut self, uvs: &[Vec2]);

    /// One normal per face corner, in face order
    fn set_corner_normals(&mut self, normals: &[Vec3]);
}

/// Feed a decoded mesh into a host sink
pub fn reconstruct<S: MeshSink + ?Sized>(mesh: &SussyMesh, sink: &mut S) -> SussyResult<()> {
    mesh.validate()?;

    let mut positions = DedupTable::new(TableKind::Positions);
    let vertex_of = mesh
        .pos_normals
        .iter()
        .map(|entry| positions.insert_or_get(entry.position).map(u32::from))
        .collect::<SussyResult<Vec<u32>>>()?;

    let faces: Vec<[u32; 3]> = mesh
        .triangles
        .iter()
        .map(|tri| tri.corners.map(|c| vertex_of[c.pos_normal as usize]))
        .collect();

    sink.set_geometry(positions.entries(), &faces);

    let corners = mesh.triangles.iter().flat_map(|tri| tri.corners);
    if !mesh.uvs.is_empty() {
        let uvs: Vec<Vec2> = corners.clone().map(|c| mesh.uvs[c.uv as usize]).collect();
        sink.set_corner_uvs(&uvs);
    }
    if !mesh.pos_normals.is_empty() {
        let normals: Vec<Vec3> = corners
            .map(|c| mesh.pos_normals[c.pos_normal as usize].normal)
            .collect();
        sink.set_corner_normals(&normals);
    }

    Ok(())
}

/// Plain in-memory result of [`reconstruct`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeldedMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub corner_uvs: Option<Vec<Vec2>>,
    pub corner_normals: Option<Vec<Vec3>>,
}

impl WeldedMesh {
    pub fn from_mesh(mesh: &SussyMesh) -> SussyResult<Self> {
        let mut welded = Self::default();
        reconstruct(mesh, &mut welded)?;
        Ok(welded)
    }
}

impl MeshSink for WeldedMesh {
    fn set_geometry(&mut self, vertices: &[Vec3], faces: &[[u32; 3]]) {
        self.vertices = vertices.to_vec();
        self.faces = faces.to_vec();
    }

    fn set_corner_uvs(&mut self, uvs: &[Vec2]) {
        self.corner_uvs = Some(uvs.to_vec());
    }

    fn set_corner_normals(&mut self, normals: &[Vec3]) {
        self.corner_normals = Some(normals.to_vec());
    }
}
