//! Types shared by the mesh sources

use sussy_format::{LoopAttributes, MeshSource, Vec3};

/// Normal used when a triangle has no area to derive one from
pub(crate) const FALLBACK_NORMAL: Vec3 = [0.0, 1.0, 0.0];

/// Triangulated host mesh ready for encoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedMesh {
    /// Triangles in file order, one attribute set per corner
    pub triangles: Vec<[LoopAttributes; 3]>,
    /// Whether every corner carries a UV
    pub has_uvs: bool,
}

impl MeshSource for LoadedMesh {
    fn has_uvs(&self) -> bool {
        self.has_uvs
    }

    fn triangles(&self) -> impl Iterator<Item = [LoopAttributes; 3]> + '_ {
        self.triangles.iter().copied()
    }
}

/// Flat normal of a counter-clockwise triangle
pub(crate) fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len <= f32::EPSILON {
        return FALLBACK_NORMAL;
    }
    [n[0] / len, n[1] / len, n[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_ccw() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);

        let n = face_normal([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_face_normal_degenerate() {
        let p = [2.0, 2.0, 2.0];
        assert_eq!(face_normal(p, p, p), FALLBACK_NORMAL);
    }
}
