//! Per-vertex attribute bundle interpolated across triangles
//!
//! The bundle behaves as a vector space: add, subtract, and scalar
//! multiply/divide apply field-wise across every attribute. Near-plane
//! clipping, the general-triangle split, and scanline stepping all lean on
//! that contract, so the position, normal, world position, and texture
//! coordinate are always stepped together.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::math::{Vec2, Vec3, Vec4};

/// Vertex-stage output: clip-space position plus the attributes carried to
/// the pixel stage. The normal is deliberately left unnormalized until
/// shading so interpolation stays linear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interpolant {
    pub pos: Vec4,
    pub normal: Vec3,
    pub world_pos: Vec3,
    pub uv: Vec2,
}

impl Interpolant {
    pub fn new(pos: Vec4, normal: Vec3, world_pos: Vec3, uv: Vec2) -> Self {
        Self { pos, normal, world_pos, uv }
    }

    /// Linear blend toward `other`: `self + (other - self) * alpha`
    pub fn lerp_toward(self, other: Interpolant, alpha: f32) -> Interpolant {
        self + (other - self) * alpha
    }
}

impl Add for Interpolant {
    type Output = Interpolant;
    fn add(self, rhs: Interpolant) -> Interpolant {
        Interpolant {
            pos: self.pos + rhs.pos,
            normal: self.normal + rhs.normal,
            world_pos: self.world_pos + rhs.world_pos,
            uv: self.uv + rhs.uv,
        }
    }
}

impl Sub for Interpolant {
    type Output = Interpolant;
    fn sub(self, rhs: Interpolant) -> Interpolant {
        Interpolant {
            pos: self.pos - rhs.pos,
            normal: self.normal - rhs.normal,
            world_pos: self.world_pos - rhs.world_pos,
            uv: self.uv - rhs.uv,
        }
    }
}

impl Mul<f32> for Interpolant {
    type Output = Interpolant;
    fn mul(self, s: f32) -> Interpolant {
        Interpolant {
            pos: self.pos * s,
            normal: self.normal * s,
            world_pos: self.world_pos * s,
            uv: self.uv * s,
        }
    }
}

impl Div<f32> for Interpolant {
    type Output = Interpolant;
    fn div(self, s: f32) -> Interpolant {
        Interpolant {
            pos: self.pos / s,
            normal: self.normal / s,
            world_pos: self.world_pos / s,
            uv: self.uv / s,
        }
    }
}

impl AddAssign for Interpolant {
    fn add_assign(&mut self, rhs: Interpolant) {
        *self = *self + rhs;
    }
}

impl SubAssign for Interpolant {
    fn sub_assign(&mut self, rhs: Interpolant) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Interpolant {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl DivAssign<f32> for Interpolant {
    fn div_assign(&mut self, s: f32) {
        *self = *self / s;
    }
}

/// Ordered triple of interpolants; winding carries no meaning beyond input
/// order until the backface test classifies it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle {
    pub v0: Interpolant,
    pub v1: Interpolant,
    pub v2: Interpolant,
}

impl Triangle {
    pub fn new(v0: Interpolant, v1: Interpolant, v2: Interpolant) -> Self {
        Self { v0, v1, v2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Interpolant {
        Interpolant::new(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec3::new(0.5, -0.25, 0.125),
            Vec3::new(-1.0, 6.0, 2.5),
            Vec2::new(0.25, 0.75),
        )
    }

    fn other() -> Interpolant {
        Interpolant::new(
            Vec4::new(-2.0, 0.5, 1.0, 8.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(3.0, -2.0, 0.5),
            Vec2::new(1.0, 0.0),
        )
    }

    #[test]
    fn test_add_sub_round_trip() {
        let a = sample();
        let b = other();
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_scale_is_field_wise() {
        let a = sample() * 2.0;
        assert!((a.pos.w - 8.0).abs() < 0.0001);
        assert!((a.normal.x - 1.0).abs() < 0.0001);
        assert!((a.world_pos.y - 12.0).abs() < 0.0001);
        assert!((a.uv.y - 1.5).abs() < 0.0001);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = sample();
        let b = other();
        assert_eq!(a.lerp_toward(b, 0.0), a);
        assert_eq!(a.lerp_toward(b, 1.0), b);

        let mid = a.lerp_toward(b, 0.5);
        assert!((mid.pos.x - (-0.5)).abs() < 0.0001);
        assert!((mid.uv.x - 0.625).abs() < 0.0001);
    }

    #[test]
    fn test_assign_ops_match_binary_ops() {
        let mut a = sample();
        a += other();
        a *= 0.5;
        let b = (sample() + other()) * 0.5;
        assert_eq!(a, b);
    }
}
