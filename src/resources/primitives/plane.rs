use crate::resources::geometry::{AttributeKind, Geometry, GeometryAttribute};

pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// Rectangle in the XY plane facing +Z, with `[position, normal, uv]`
/// interleaved per vertex.
///
/// # Panics
///
/// Panics on non-positive dimensions or zero segments.
#[must_use]
pub fn create_plane(options: &PlaneOptions) -> Geometry {
    assert!(options.width > 0.0 && options.height > 0.0, "plane size must be positive");
    assert!(
        options.width_segments > 0 && options.height_segments > 0,
        "plane needs at least one segment per axis"
    );

    let width_half = options.width / 2.0;
    let height_half = options.height / 2.0;

    let grid_x = options.width_segments;
    let grid_y = options.height_segments;

    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_width = options.width / grid_x as f32;
    let segment_height = options.height / grid_y as f32;

    let mut vertices: Vec<[f32; 8]> = Vec::with_capacity((grid_x1 * grid_y1) as usize);
    let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);

    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - width_half;
            let u = ix as f32 / grid_x as f32;
            let v = 1.0 - (iy as f32 / grid_y as f32);
            // -y keeps v = 1 at the top edge
            vertices.push([x, -y, 0.0, 0.0, 0.0, 1.0, u, v]);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut geo = Geometry::with_data(bytemuck::cast_slice(&vertices).to_vec(), indices);
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Position));
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Normal));
    geo.set_attribute(GeometryAttribute::new(AttributeKind::Uv));
    geo
}
