//! Test-mesh builders: a subdivided plane and a cube
//!
//! Winding is clockwise in y-up clip coordinates, which is what the
//! backface test forwards for faces whose normals point at the viewer.

use crate::math::{Vec2, Vec3};
use crate::types::{IndexedTriangleList, Vertex};

/// Build a subdivided plane in the x-y plane, centered at the origin,
/// facing the viewer (normals toward -z). Texture coordinates run 0..1
/// across the whole plane, divided by `uv_scale` for tiling.
pub fn plane_skinned_normals(
    divisions_x: usize,
    divisions_y: usize,
    width: f32,
    height: f32,
    uv_scale: f32,
) -> IndexedTriangleList {
    let nx = divisions_x.max(1);
    let ny = divisions_y.max(1);
    let normal = Vec3::new(0.0, 0.0, -1.0);

    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            let fx = i as f32 / nx as f32;
            let fy = j as f32 / ny as f32;
            let pos = Vec3::new((fx - 0.5) * width, (fy - 0.5) * height, 0.0);
            let uv = Vec2::new(fx / uv_scale, (1.0 - fy) / uv_scale);
            vertices.push(Vertex::new(pos, normal, uv));
        }
    }

    let mut indices = Vec::with_capacity(nx * ny * 6);
    for j in 0..ny {
        for i in 0..nx {
            let bl = j * (nx + 1) + i;
            let br = bl + 1;
            let tl = bl + (nx + 1);
            let tr = tl + 1;
            indices.extend_from_slice(&[bl, tl, tr]);
            indices.extend_from_slice(&[bl, tr, br]);
        }
    }

    IndexedTriangleList::new(vertices, indices)
}

/// Build an axis-aligned cube with per-face normals and 0..1 texture
/// coordinates on each face (24 vertices, 12 triangles).
pub fn cube(size: f32) -> IndexedTriangleList {
    let h = size / 2.0;

    // per face: normal, right and up as seen from outside the face
    let faces = [
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, right, up) in faces {
        let center = normal * h;
        let base = vertices.len();

        let bl = center - right * h - up * h;
        let tl = center - right * h + up * h;
        let tr = center + right * h + up * h;
        let br = center + right * h - up * h;

        vertices.push(Vertex::new(bl, normal, Vec2::new(0.0, 1.0)));
        vertices.push(Vertex::new(tl, normal, Vec2::new(0.0, 0.0)));
        vertices.push(Vertex::new(tr, normal, Vec2::new(1.0, 0.0)));
        vertices.push(Vertex::new(br, normal, Vec2::new(1.0, 1.0)));

        indices.extend_from_slice(&[base, base + 1, base + 2]);
        indices.extend_from_slice(&[base, base + 2, base + 3]);
    }

    IndexedTriangleList::new(vertices, indices)
}
