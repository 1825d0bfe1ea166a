use crate::resources::geometry::{AttributeKind, Geometry, GeometryAttribute};

/// Interleaved `[position(3), normal(3), uv(2)]`.
type Vertex = [f32; 8];

#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    // 24 vertices (4 per face), one normal per face
    let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
        // Front face (+Z)
        ([[-w, -h, d], [w, -h, d], [w, h, d], [-w, h, d]], [0.0, 0.0, 1.0]),
        // Back face (-Z)
        ([[-w, -h, -d], [-w, h, -d], [w, h, -d], [w, -h, -d]], [0.0, 0.0, -1.0]),
        // Top face (+Y)
        ([[-w, h, -d], [-w, h, d], [w, h, d], [w, h, -d]], [0.0, 1.0, 0.0]),
        // Bottom face (-Y)
        ([[-w, -h, -d], [w, -h, -d], [w, -h, d], [-w, -h, d]], [0.0, -1.0, 0.0]),
        // Right face (+X)
        ([[w, -h, -d], [w, h, -d], [w, h, d], [w, -h, d]], [1.0, 0.0, 0.0]),
        // Left face (-X)
        ([[-w, -h, -d], [-w, -h, d], [-w, h, d], [-w, h, -d]], [-1.0, 0.0, 0.0]),
    ];
    let uvs: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let vertices: Vec<Vertex> = faces
        .iter()
        .flat_map(|(corners, normal)| {
            corners.iter().zip(uvs.iter()).map(|(p, uv)| {
                [p[0], p[1], p[2], normal[0], normal[1], normal[2], uv[0], uv[1]]
            })
        })
        .collect();

    // 2 triangles per face, CCW
    let indices: Vec<u32> = (0..6)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    let mut geo = Geometry::with_data(bytemuck::cast_slice(&vertices).to_vec(), indices);
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Position));
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Normal));
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Uv));
    geo
}
