//! Human-readable dump of a decoded mesh

use std::fmt;

use sussy_format::SussyMesh;

/// Display adapter printing tables and triangles in a stable layout
pub struct MeshDump<'a>(pub &'a SussyMesh);

impl fmt::Display for MeshDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.0;

        writeln!(f, "Position/Normal count: {}", mesh.pos_normals.len())?;
        writeln!(f)?;
        writeln!(f, "Positions and Normals:")?;
        for (i, entry) in mesh.pos_normals.iter().enumerate() {
            writeln!(
                f,
                "{:2}: Position: {} | Normal: {}",
                i,
                join2(&entry.position),
                join2(&entry.normal)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "UV count: {}", mesh.uvs.len())?;
        writeln!(f, "UVs:")?;
        for (i, uv) in mesh.uvs.iter().enumerate() {
            writeln!(f, "{:2}: UV: {}", i, join2(uv))?;
        }

        writeln!(f)?;
        writeln!(f, "Triangles count: {}", mesh.triangles.len())?;
        writeln!(f, "Triangles:")?;
        for (i, tri) in mesh.triangles.iter().enumerate() {
            write!(f, "{:2}:", i)?;
            for c in &tri.corners {
                write!(f, " ({:2}, {:2})", c.pos_normal, c.uv)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Format a decoded mesh for printing
pub fn format_dump(mesh: &SussyMesh) -> String {
    MeshDump(mesh).to_string()
}

fn join2(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sussy_format::{Corner, PositionNormal, Triangle};

    #[test]
    fn test_dump_layout() {
        let mesh = SussyMesh {
            pos_normals: vec![PositionNormal::new([1.0, -0.5, 2.126], [0.0, 1.0, 0.0])],
            uvs: vec![[0.333, 1.0]],
            triangles: vec![Triangle::new([Corner::new(0, 0); 3])],
        };

        let expected = "\
Position/Normal count: 1

Positions and Normals:
 0: Position: 1.00 -0.50 2.13 | Normal: 0.00 1.00 0.00

UV count: 1
UVs:
 0: UV: 0.33 1.00

Triangles count: 1
Triangles:
 0: ( 0,  0) ( 0,  0) ( 0,  0)
";
        assert_eq!(format_dump(&mesh), expected);
    }

    #[test]
    fn test_dump_empty() {
        let text = format_dump(&SussyMesh::new());
        assert!(text.starts_with("Position/Normal count: 0\n"));
        assert!(text.ends_with("Triangles count: 0\nTriangles:\n"));
    }
}
