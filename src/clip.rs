//! Homogeneous clip-space triangle clipping
//!
//! Triangles entirely outside any one frustum half-space are rejected
//! outright. Only the near plane actually splits geometry; the other five
//! planes are reject-only. The near test compares `z` against 0 rather than
//! `-w` — that asymmetry matches the clip-space convention the splitting
//! math below assumes, and must not be "fixed".

use crate::interpolant::{Interpolant, Triangle};

/// Outcome of clipping one triangle against the frustum.
#[derive(Debug, Clone, Copy)]
pub enum Clipped {
    /// Entirely outside one half-space; nothing to draw.
    Rejected,
    /// Forwarded unchanged, or the single triangle left after clipping.
    One(Triangle),
    /// The visible quad left when one vertex was behind the near plane.
    Two(Triangle, Triangle),
}

/// Classify and, when the near plane cuts it, split one clip-space triangle.
pub fn clip_triangle(t: Triangle) -> Clipped {
    let p0 = t.v0.pos;
    let p1 = t.v1.pos;
    let p2 = t.v2.pos;

    // trivial rejects: all three vertices beyond a single plane
    if p0.x > p0.w && p1.x > p1.w && p2.x > p2.w {
        return Clipped::Rejected;
    }
    if p0.x < -p0.w && p1.x < -p1.w && p2.x < -p2.w {
        return Clipped::Rejected;
    }
    if p0.y > p0.w && p1.y > p1.w && p2.y > p2.w {
        return Clipped::Rejected;
    }
    if p0.y < -p0.w && p1.y < -p1.w && p2.y < -p2.w {
        return Clipped::Rejected;
    }
    if p0.z > p0.w && p1.z > p1.w && p2.z > p2.w {
        return Clipped::Rejected;
    }
    if p0.z < 0.0 && p1.z < 0.0 && p2.z < 0.0 {
        return Clipped::Rejected;
    }

    // near-plane split, relabeling so the behind vertices come first
    if p0.z < 0.0 {
        if p1.z < 0.0 {
            clip_two_behind(t.v0, t.v1, t.v2)
        } else if p2.z < 0.0 {
            clip_two_behind(t.v0, t.v2, t.v1)
        } else {
            clip_one_behind(t.v0, t.v1, t.v2)
        }
    } else if p1.z < 0.0 {
        if p2.z < 0.0 {
            clip_two_behind(t.v1, t.v2, t.v0)
        } else {
            clip_one_behind(t.v1, t.v0, t.v2)
        }
    } else if p2.z < 0.0 {
        clip_one_behind(t.v2, t.v0, t.v1)
    } else {
        Clipped::One(t)
    }
}

/// One vertex (`v0`) behind the near plane: the visible region is a quad,
/// emitted as two triangles.
fn clip_one_behind(v0: Interpolant, v1: Interpolant, v2: Interpolant) -> Clipped {
    let alpha_a = -v0.pos.z / (v1.pos.z - v0.pos.z);
    let alpha_b = -v0.pos.z / (v2.pos.z - v0.pos.z);

    let v0a = v0.lerp_toward(v1, alpha_a);
    let v0b = v0.lerp_toward(v2, alpha_b);

    Clipped::Two(
        Triangle::new(v0a, v1, v2),
        Triangle::new(v0b, v0a, v2),
    )
}

/// Two vertices (`v0`, `v1`) behind the near plane: one triangle survives.
fn clip_two_behind(v0: Interpolant, v1: Interpolant, v2: Interpolant) -> Clipped {
    let alpha_0 = -v0.pos.z / (v2.pos.z - v0.pos.z);
    let alpha_1 = -v1.pos.z / (v2.pos.z - v1.pos.z);

    let v0a = v0.lerp_toward(v2, alpha_0);
    let v1b = v1.lerp_toward(v2, alpha_1);

    Clipped::One(Triangle::new(v0a, v1b, v2))
}
