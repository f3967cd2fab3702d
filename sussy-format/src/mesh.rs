//! In-memory mesh model shared by the encoder and decoder

use crate::dedup::DedupKey;
use crate::error::{SussyError, SussyResult, TableKind};
use crate::MAX_ENTRIES;

/// Two-component float vector (u, v)
pub type Vec2 = [f32; 2];
/// Three-component float vector (x, y, z)
pub type Vec3 = [f32; 3];

/// One entry of the position/normal table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionNormal {
    pub position: Vec3,
    pub normal: Vec3,
}

impl PositionNormal {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// One triangle vertex: indices into the position/normal and UV tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Corner {
    pub pos_normal: u16,
    pub uv: u16,
}

impl Corner {
    pub const fn new(pos_normal: u16, uv: u16) -> Self {
        Self { pos_normal, uv }
    }
}

/// Three corners in emission order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub corners: [Corner; 3],
}

impl Triangle {
    pub const fn new(corners: [Corner; 3]) -> Self {
        Self { corners }
    }
}

/// Decoded (or about-to-be-encoded) Sussy mesh
///
/// Table order is significant: it is exactly the order written to the file,
/// and triangle corners refer to entries by position in these vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SussyMesh {
    pub pos_normals: Vec<PositionNormal>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<Triangle>,
}

impl SussyMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the mesh has no table entries and no triangles
    pub fn is_empty(&self) -> bool {
        self.pos_normals.is_empty() && self.uvs.is_empty() && self.triangles.is_empty()
    }

    /// Size in bytes of the encoded file
    pub fn encoded_size(&self) -> usize {
        crate::encoded_size(self.pos_normals.len(), self.uvs.len(), self.triangles.len())
    }

    /// Check table capacities and that every corner index is in range
    pub fn validate(&self) -> SussyResult<()> {
        if self.pos_normals.len() > MAX_ENTRIES {
            return Err(SussyError::CapacityExceeded {
                table: TableKind::PosNormal,
            });
        }
        if self.uvs.len() > MAX_ENTRIES {
            return Err(SussyError::CapacityExceeded {
                table: TableKind::Uv,
            });
        }
        if self.triangles.len() > MAX_ENTRIES {
            return Err(SussyError::CapacityExceeded {
                table: TableKind::Triangles,
            });
        }
        check_indices(&self.triangles, self.pos_normals.len(), self.uvs.len())
    }

    /// True if neither table holds two entries with the same dedup key
    pub fn is_deduplicated(&self) -> bool {
        all_unique(&self.pos_normals) && all_unique(&self.uvs)
    }
}

/// Verify every corner against the table sizes, reporting the first offender
pub(crate) fn check_indices(
    triangles: &[Triangle],
    pos_normal_len: usize,
    uv_len: usize,
) -> SussyResult<()> {
    for (triangle, tri) in triangles.iter().enumerate() {
        for (corner, c) in tri.corners.iter().enumerate() {
            if c.pos_normal as usize >= pos_normal_len {
                return Err(SussyError::IndexOutOfRange {
                    triangle,
                    corner,
                    table: TableKind::PosNormal,
                    index: c.pos_normal,
                    len: pos_normal_len,
                });
            }
            if c.uv as usize >= uv_len {
                return Err(SussyError::IndexOutOfRange {
                    triangle,
                    corner,
                    table: TableKind::Uv,
                    index: c.uv,
                    len: uv_len,
                });
            }
        }
    }
    Ok(())
}

fn all_unique<T: DedupKey>(entries: &[T]) -> bool {
    let mut seen = hashbrown::HashSet::with_capacity(entries.len());
    entries.iter().all(|e| seen.insert(e.dedup_key()))
}
