//! Perspective divide and NDC-to-screen mapping

use crate::interpolant::{Interpolant, Triangle};

/// Converts clip-space interpolants into screen space.
///
/// The whole bundle is divided by the clip-space `w` first, which is the
/// pre-divide half of perspective-correct interpolation: attributes
/// interpolated linearly in screen space afterwards are really
/// `attribute / w`, and the rasterizer multiplies the reciprocal back in per
/// pixel. The reciprocal itself is stashed in `pos.w` so it can be recovered
/// by interpolating it linearly too.
#[derive(Debug, Clone)]
pub struct ScreenTransformer {
    x_factor: f32,
    y_factor: f32,
}

impl ScreenTransformer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            x_factor: width as f32 / 2.0,
            y_factor: height as f32 / 2.0,
        }
    }

    /// Perspective divide plus viewport map. After this, `pos.x`/`pos.y` are
    /// pixel coordinates, `pos.z` is the depth-comparable `z / w`, and
    /// `pos.w` holds `1 / w`.
    pub fn transform(&self, v: &mut Interpolant) {
        let w_inv = 1.0 / v.pos.w;
        *v *= w_inv;
        v.pos.x = (v.pos.x + 1.0) * self.x_factor;
        v.pos.y = (-v.pos.y + 1.0) * self.y_factor;
        v.pos.w = w_inv;
    }

    pub fn transform_triangle(&self, t: &mut Triangle) {
        self.transform(&mut t.v0);
        self.transform(&mut t.v1);
        self.transform(&mut t.v2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec3, Vec4};

    #[test]
    fn test_ndc_corners_map_to_screen() {
        let st = ScreenTransformer::new(400, 300);

        let mut center = Interpolant::default();
        center.pos = Vec4::new(0.0, 0.0, 0.5, 1.0);
        st.transform(&mut center);
        assert!((center.pos.x - 200.0).abs() < 0.001);
        assert!((center.pos.y - 150.0).abs() < 0.001);

        // NDC y is up, screen y is down
        let mut top_left = Interpolant::default();
        top_left.pos = Vec4::new(-1.0, 1.0, 0.5, 1.0);
        st.transform(&mut top_left);
        assert!(top_left.pos.x.abs() < 0.001);
        assert!(top_left.pos.y.abs() < 0.001);
    }

    #[test]
    fn test_attributes_pre_divided_and_w_reciprocal() {
        let st = ScreenTransformer::new(100, 100);
        let mut v = Interpolant::new(
            Vec4::new(0.0, 0.0, 1.0, 2.0),
            Vec3::new(2.0, 4.0, 6.0),
            Vec3::new(8.0, 2.0, 4.0),
            Vec2::new(1.0, 0.5),
        );
        st.transform(&mut v);

        assert!((v.pos.w - 0.5).abs() < 0.001);
        assert!((v.pos.z - 0.5).abs() < 0.001);
        assert!((v.uv.x - 0.5).abs() < 0.001);
        assert!((v.normal.y - 2.0).abs() < 0.001);
        assert!((v.world_pos.x - 4.0).abs() < 0.001);
    }
}
