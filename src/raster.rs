//! Scanline triangle rasterization
//!
//! Screen-space triangles are decomposed into at most two flat-edged
//! triangles and walked one scanline at a time. Interpolants are stepped
//! with per-edge and per-pixel deltas, pre-stepped to pixel centers using
//! the `ceil(coord - 0.5)` convention, depth-tested against the z-buffer
//! before shading (early z), and perspective-corrected by multiplying the
//! recovered `w` back through the bundle.

use std::mem;

use crate::effect::PixelStage;
use crate::interpolant::{Interpolant, Triangle};
use crate::types::Texture;
use crate::zbuffer::DepthBuffer;

/// Rasterize one screen-space triangle into the target surface.
///
/// Sorts the vertices by ascending screen y, classifies the triangle as
/// flat-top, flat-bottom, or general, and splits the general case on the
/// long edge at the middle vertex's y.
pub fn draw_triangle<P: PixelStage>(
    target: &mut Texture,
    zbuffer: &mut DepthBuffer,
    ps: &P,
    triangle: &Triangle,
) {
    let mut v0 = triangle.v0;
    let mut v1 = triangle.v1;
    let mut v2 = triangle.v2;

    // sort vertices by y
    if v1.pos.y < v0.pos.y {
        mem::swap(&mut v0, &mut v1);
    }
    if v2.pos.y < v1.pos.y {
        mem::swap(&mut v1, &mut v2);
    }
    if v1.pos.y < v0.pos.y {
        mem::swap(&mut v0, &mut v1);
    }

    if v0.pos.y == v1.pos.y {
        // natural flat top, order the top pair by x
        if v1.pos.x < v0.pos.x {
            mem::swap(&mut v0, &mut v1);
        }
        draw_flat_top(target, zbuffer, ps, &v0, &v1, &v2);
    } else if v1.pos.y == v2.pos.y {
        // natural flat bottom, order the bottom pair by x
        if v2.pos.x < v1.pos.x {
            mem::swap(&mut v1, &mut v2);
        }
        draw_flat_bottom(target, zbuffer, ps, &v0, &v1, &v2);
    } else {
        // general case: split on the long edge at v1's y
        let alpha = (v1.pos.y - v0.pos.y) / (v2.pos.y - v0.pos.y);
        let vi = v0.lerp_toward(v2, alpha);

        if v1.pos.x < vi.pos.x {
            // major right
            draw_flat_bottom(target, zbuffer, ps, &v0, &v1, &vi);
            draw_flat_top(target, zbuffer, ps, &v1, &vi, &v2);
        } else {
            // major left
            draw_flat_bottom(target, zbuffer, ps, &v0, &vi, &v1);
            draw_flat_top(target, zbuffer, ps, &vi, &v1, &v2);
        }
    }
}

/// it0 top-left, it1 top-right, it2 bottom
fn draw_flat_top<P: PixelStage>(
    target: &mut Texture,
    zbuffer: &mut DepthBuffer,
    ps: &P,
    it0: &Interpolant,
    it1: &Interpolant,
    it2: &Interpolant,
) {
    // change in interpolant per unit y down each edge
    let delta_y = it2.pos.y - it0.pos.y;
    if delta_y <= 0.0 {
        // degenerate: all three vertices on one scanline
        return;
    }
    let dit0 = (*it2 - *it0) / delta_y;
    let dit1 = (*it2 - *it1) / delta_y;

    // right edge starts at the top-right vertex
    let it_edge1 = *it1;

    draw_flat(target, zbuffer, ps, it0, it2, &dit0, &dit1, it_edge1);
}

/// it0 top, it1 bottom-left, it2 bottom-right
fn draw_flat_bottom<P: PixelStage>(
    target: &mut Texture,
    zbuffer: &mut DepthBuffer,
    ps: &P,
    it0: &Interpolant,
    it1: &Interpolant,
    it2: &Interpolant,
) {
    let delta_y = it2.pos.y - it0.pos.y;
    if delta_y <= 0.0 {
        return;
    }
    let dit0 = (*it1 - *it0) / delta_y;
    let dit1 = (*it2 - *it0) / delta_y;

    // both edges start at the apex
    let it_edge1 = *it0;

    draw_flat(target, zbuffer, ps, it0, it2, &dit0, &dit1, it_edge1);
}

/// Shared scanline walker for flat-top and flat-bottom triangles.
/// `it0` anchors the left edge and the prestep, `it2` supplies the bottom y.
fn draw_flat<P: PixelStage>(
    target: &mut Texture,
    zbuffer: &mut DepthBuffer,
    ps: &P,
    it0: &Interpolant,
    it2: &Interpolant,
    dv0: &Interpolant,
    dv1: &Interpolant,
    mut it_edge1: Interpolant,
) {
    // left edge interpolant (always from it0)
    let mut it_edge0 = *it0;

    let width = zbuffer.width() as i32;
    let height = zbuffer.height() as i32;

    // scanline range, pixel-center rule: ceil(y - 0.5), end exclusive
    let y_start = ((it0.pos.y - 0.5).ceil() as i32).max(0);
    let y_end = ((it2.pos.y - 0.5).ceil() as i32).min(height - 1);

    // prestep edges to the first scanline's pixel center
    it_edge0 += *dv0 * (y_start as f32 + 0.5 - it0.pos.y);
    it_edge1 += *dv1 * (y_start as f32 + 0.5 - it0.pos.y);

    for y in y_start..y_end {
        // pixel range, same rule along x, end exclusive
        let x_start = ((it_edge0.pos.x - 0.5).ceil() as i32).max(0);
        let x_end = ((it_edge1.pos.x - 0.5).ceil() as i32).min(width - 1);

        if x_start < x_end {
            // a non-empty span implies it_edge1.x > it_edge0.x, so the
            // delta divisor is never zero here
            let dx = it_edge1.pos.x - it_edge0.pos.x;
            let di_line = (it_edge1 - it_edge0) / dx;

            // prestep to the first pixel center
            let mut i_line = it_edge0 + di_line * (x_start as f32 + 0.5 - it_edge0.pos.x);

            for x in x_start..x_end {
                // early z: shading is skipped entirely for occluded pixels
                if zbuffer.test_and_set(x as usize, y as usize, i_line.pos.z) {
                    // recover perspective-correct w from interpolated 1/w,
                    // then undo the pre-divide on every attribute
                    let w = 1.0 / i_line.pos.w;
                    let attr = i_line * w;
                    target.put_pixel(x as usize, y as usize, ps.shade(&attr));
                }
                i_line += di_line;
            }
        }

        it_edge0 += *dv0;
        it_edge1 += *dv1;
    }
}
