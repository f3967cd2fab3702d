//! Source meshes for integration tests.
//!
//! OBJ text is written inline; the GLB is assembled byte by byte so the
//! tests do not depend on checked-in binaries.

#![allow(dead_code)]

/// Unit quad in the XY plane, two triangles sharing an edge, with UVs and one normal
pub const QUAD_OBJ: &str = "\
# quad
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vt 1 0
vt 0 1
vt 1 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 3/3/1 2/2/1 4/4/1
";

/// Single triangle without texture coordinates
pub const TRIANGLE_NO_UV_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";

/// Cube with per-face normals and a quad polygon per face (fan-triangulated)
pub const CUBE_OBJ: &str = "\
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 -1
vn 0 0 1
vn 0 -1 0
vn 0 1 0
vn -1 0 0
vn 1 0 0
f 1/1/1 4/2/1 3/3/1 2/4/1
f 5/1/2 6/2/2 7/3/2 8/4/2
f 1/1/3 2/2/3 6/3/3 5/4/3
f 4/1/4 8/2/4 7/3/4 3/4/4
f 1/1/5 5/2/5 8/3/5 4/4/5
f 2/1/6 3/2/6 7/3/6 6/4/6
";

/// Quad as a binary glTF: POSITION, NORMAL, TEXCOORD_0 and u16 indices
///
/// Encodes to 4 pos/normal pairs, 4 UVs and 2 triangles.
pub fn quad_glb() -> Vec<u8> {
    let positions: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    let normals = [[0.0f32, 0.0, 1.0]; 4];
    let uvs: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let indices: [u16; 6] = [0, 1, 2, 2, 1, 3];

    let mut bin = Vec::new();
    for v in positions.iter().chain(normals.iter()) {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for uv in &uvs {
        for c in uv {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in &indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    assert_eq!(bin.len(), 140);

    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "mesh": 0 }}],
  "meshes": [{{
    "primitives": [{{
      "attributes": {{ "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 }},
      "indices": 3,
      "mode": 4
    }}]
  }}],
  "buffers": [{{ "byteLength": {len} }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 48, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 48, "byteLength": 48, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 96, "byteLength": 32, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 128, "byteLength": 12, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5126, "count": 4, "type": "VEC3" }},
    {{ "bufferView": 2, "componentType": 5126, "count": 4, "type": "VEC2" }},
    {{ "bufferView": 3, "componentType": 5123, "count": 6, "type": "SCALAR" }}
  ]
}}"#,
        len = bin.len()
    );

    assemble_glb(json.as_bytes(), &bin)
}

fn assemble_glb(json: &[u8], bin: &[u8]) -> Vec<u8> {
    let json_padding = (4 - json.len() % 4) % 4;
    let json_chunk_length = json.len() + json_padding;
    let bin_padding = (4 - bin.len() % 4) % 4;
    let bin_chunk_length = bin.len() + bin_padding;
    let total_length = 12 + 8 + json_chunk_length + 8 + bin_chunk_length;

    let mut glb = Vec::with_capacity(total_length);

    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // "JSON"
    glb.extend_from_slice(json);
    glb.extend(std::iter::repeat_n(0x20u8, json_padding));

    glb.extend_from_slice(&(bin_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN\0"
    glb.extend_from_slice(bin);
    glb.extend(std::iter::repeat_n(0u8, bin_padding));

    glb
}
