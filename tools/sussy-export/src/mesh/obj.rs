//! OBJ mesh source

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sussy_format::{LoopAttributes, Vec2, Vec3};

use super::types::{face_normal, LoadedMesh};

/// One face corner as written in the file: (v, vt, vn), already resolved to 0-based
type FaceVertex = (usize, Option<usize>, Option<usize>);

/// Load and triangulate an OBJ file
///
/// Polygons are fan-triangulated. Corners without a `vn` reference get
/// their triangle's flat normal. UVs are kept only if every corner has one.
pub fn load_obj(input: &Path) -> Result<LoadedMesh> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    parse_obj(BufReader::new(file)).with_context(|| format!("Failed to parse OBJ: {:?}", input))
}

pub(crate) fn parse_obj<R: BufRead>(reader: R) -> Result<LoadedMesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();

    // (position, uv, normal) per corner, normals resolved after triangulation
    let mut corners: Vec<[(Vec3, Option<Vec2>, Option<Vec3>); 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" if parts.len() >= 4 => positions.push(parse_floats(&parts[1..4], line_no)?),
            "vt" if parts.len() >= 3 => tex_coords.push(parse_floats(&parts[1..3], line_no)?),
            "vn" if parts.len() >= 4 => normals.push(parse_floats(&parts[1..4], line_no)?),
            "f" if parts.len() >= 4 => {
                let face_verts = parts[1..]
                    .iter()
                    .map(|v| {
                        parse_obj_vertex(v, positions.len(), tex_coords.len(), normals.len())
                            .with_context(|| {
                                format!("Invalid face vertex {:?} on line {}", v, line_no + 1)
                            })
                    })
                    .collect::<Result<Vec<FaceVertex>>>()?;

                // Fan triangulation for convex polygons
                for i in 1..face_verts.len() - 1 {
                    let tri = [0, i, i + 1].map(|idx| {
                        let (vi, vti, vni) = face_verts[idx];
                        (
                            positions[vi],
                            vti.map(|t| tex_coords[t]),
                            vni.map(|n| normals[n]),
                        )
                    });
                    corners.push(tri);
                }
            }
            "v" | "vn" | "f" => bail!(
                "Line {}: '{}' needs at least 3 values, found {}",
                line_no + 1,
                parts[0],
                parts.len() - 1
            ),
            "vt" => bail!(
                "Line {}: 'vt' needs at least 2 values, found {}",
                line_no + 1,
                parts.len() - 1
            ),
            _ => {}
        }
    }

    if corners.is_empty() {
        bail!("No triangles found in OBJ file");
    }

    let total = corners.len() * 3;
    let with_uv = corners.iter().flatten().filter(|c| c.1.is_some()).count();
    let with_normal = corners.iter().flatten().filter(|c| c.2.is_some()).count();

    let has_uvs = with_uv == total;
    if with_uv > 0 && !has_uvs {
        tracing::warn!(
            "OBJ has UVs on only {} of {} corners, ignoring UVs",
            with_uv,
            total
        );
    }
    if with_normal < total {
        tracing::warn!(
            "{} of {} corners have no normal, using face normals",
            total - with_normal,
            total
        );
    }

    let triangles = corners
        .into_iter()
        .map(|tri| {
            let flat = face_normal(tri[0].0, tri[1].0, tri[2].0);
            tri.map(|(position, uv, normal)| LoopAttributes {
                position,
                normal: normal.unwrap_or(flat),
                uv: if has_uvs { uv } else { None },
            })
        })
        .collect();

    Ok(LoadedMesh { triangles, has_uvs })
}

fn parse_floats<const N: usize>(parts: &[&str], line_no: usize) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, s) in out.iter_mut().zip(parts) {
        *slot = s
            .parse()
            .with_context(|| format!("Invalid number {:?} on line {}", s, line_no + 1))?;
    }
    Ok(out)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
fn parse_obj_vertex(
    s: &str,
    position_count: usize,
    tex_coord_count: usize,
    normal_count: usize,
) -> Result<FaceVertex> {
    let mut parts = s.split('/');

    let vi = match parts.next() {
        Some(p) if !p.is_empty() => resolve_index(p, position_count)?,
        _ => bail!("missing position index"),
    };
    let vti = match parts.next() {
        Some(p) if !p.is_empty() => Some(resolve_index(p, tex_coord_count)?),
        _ => None,
    };
    let vni = match parts.next() {
        Some(p) if !p.is_empty() => Some(resolve_index(p, normal_count)?),
        _ => None,
    };

    Ok((vi, vti, vni))
}

/// Resolve a 1-based (or negative, relative) OBJ index against `count` elements
fn resolve_index(s: &str, count: usize) -> Result<usize> {
    let raw: i64 = s.parse().with_context(|| format!("invalid index {:?}", s))?;
    let idx = match raw {
        0 => bail!("index 0 is not valid in OBJ"),
        r if r > 0 => r as usize - 1,
        r => match count.checked_sub(r.unsigned_abs() as usize) {
            Some(i) => i,
            None => bail!("relative index {} before start of list", r),
        },
    };
    if idx >= count {
        bail!("index {} out of range ({} defined)", raw, count);
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# single triangle
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj(TRIANGLE.as_bytes()).unwrap();
        assert!(mesh.has_uvs);
        assert_eq!(mesh.triangles.len(), 1);

        let [a, b, c] = mesh.triangles[0];
        assert_eq!(a.position, [0.0, 0.0, 0.0]);
        assert_eq!(b.uv, Some([1.0, 0.0]));
        assert_eq!(c.normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_fan_triangulation() {
        let quad = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(quad.as_bytes()).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.triangles[1][0].position, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.triangles[1][1].position, [1.0, 1.0, 0.0]);
        assert_eq!(mesh.triangles[1][2].position, [0.0, 1.0, 0.0]);
        // No vn: flat normal, no vt: no UVs
        assert!(!mesh.has_uvs);
        assert_eq!(mesh.triangles[0][0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.triangles[0][0].uv, None);
    }

    #[test]
    fn test_relative_and_normal_only_indices() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf -3//1 -2//1 -1//1\n";
        let mesh = parse_obj(obj.as_bytes()).unwrap();
        assert_eq!(mesh.triangles[0][2].position, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.triangles[0][0].normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_partial_uvs_dropped() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nf 1/1 2 3\n";
        let mesh = parse_obj(obj.as_bytes()).unwrap();
        assert!(!mesh.has_uvs);
        assert!(mesh.triangles[0].iter().all(|c| c.uv.is_none()));
    }

    #[test]
    fn test_out_of_range_index() {
        let obj = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = parse_obj(obj.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[test]
    fn test_short_element_lines_rejected() {
        let cases = [
            ("v 0 0 0\nv 1 2\n", "Line 2"),
            ("vt 0.5\n", "Line 1"),
            ("v 0 0 0\nvn 0 1\n", "Line 2"),
            ("v 0 0 0\nv 1 0 0\nf 1 2\n", "Line 3"),
        ];
        for (obj, line) in cases {
            let err = parse_obj(obj.as_bytes()).unwrap_err();
            assert!(err.to_string().contains(line), "{:?}: {}", obj, err);
        }
    }

    #[test]
    fn test_no_faces() {
        let err = parse_obj("v 0 0 0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("No triangles"));
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index("1", 3).unwrap(), 0);
        assert_eq!(resolve_index("-1", 3).unwrap(), 2);
        assert!(resolve_index("0", 3).is_err());
        assert!(resolve_index("-4", 3).is_err());
        assert!(resolve_index("x", 3).is_err());
    }
}
