//! Mesh decoder
//!
//! Strictly sequential: the three sections are read in file order with no
//! backtracking, then every corner index is checked against its table. The
//! tables are taken as stored; no dedup or remapping happens on this side.

use std::io::{Cursor, Read};
use std::path::Path;

use crate::cursor::{read_f32, read_u16};
use crate::error::{Section, SussyError, SussyResult};
use crate::mesh::{check_indices, Corner, PositionNormal, SussyMesh, Triangle, Vec2, Vec3};


/// Decode a complete Sussy file
///
/// All-or-nothing: any truncation, out-of-range index or trailing byte
/// fails the whole call.
pub fn decode(bytes: &[u8]) -> SussyResult<SussyMesh> {
    let mut cursor = Cursor::new(bytes);

    let pos_normal_count = read_u16(&mut cursor, Section::PosNormalCount)? as usize;
    let mut pos_normals = Vec::with_capacity(pos_normal_count);
    for _ in 0..pos_normal_count {
        let position = read_vec3(&mut cursor, Section::PosNormalTable)?;
        let normal = read_vec3(&mut cursor, Section::PosNormalTable)?;
        pos_normals.push(PositionNormal::new(position, normal));
    }

    let uv_count = read_u16(&mut cursor, Section::UvCount)? as usize;
    let mut uvs = Vec::with_capacity(uv_count);
    for _ in 0..uv_count {
        uvs.push(read_vec2(&mut cursor, Section::UvTable)?);
    }

    let triangle_count = read_u16(&mut cursor, Section::TriangleCount)? as usize;
    let mut triangles = Vec::with_capacity(triangle_count);
    for _ in 0..triangle_count {
        let mut corners = [Corner::default(); 3];
        for corner in &mut corners {
            let pos_normal = read_u16(&mut cursor, Section::Triangles)?;
            let uv = read_u16(&mut cursor, Section::Triangles)?;
            *corner = Corner::new(pos_normal, uv);
        }
        triangles.push(Triangle::new(corners));
    }

    check_indices(&triangles, pos_normals.len(), uvs.len())?;

    let extra = bytes.len() - cursor.position() as usize;
    if extra > 0 {
        return Err(SussyError::TrailingData { extra });
    }

    tracing::debug!(
        "Decoded Sussy mesh: {} pos/normals, {} uvs, {} triangles",
        pos_normals.len(),
        uvs.len(),
        triangles.len()
    );

    Ok(SussyMesh {
        pos_normals,
        uvs,
        triangles,
    })
}

/// Read a whole stream and decode it
pub fn read_mesh<R: Read>(mut reader: R) -> SussyResult<SussyMesh> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Load and decode a `.sussy` file
pub fn import_file(path: &Path) -> SussyResult<SussyMesh> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

fn read_vec3(cursor: &mut Cursor<&[u8]>, section: Section) -> SussyResult<Vec3> {
    Ok([
        read_f32(cursor, section)?,
        read_f32(cursor, section)?,
        read_f32(cursor, section)?,
    ])
}

fn read_vec2(cursor: &mut Cursor<&[u8]>, section: Section) -> SussyResult<Vec2> {
    Ok([read_f32(cursor, section)?, read_f32(cursor, section)?])
}
