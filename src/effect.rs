//! Programmable shader stages
//!
//! The pipeline is generic over three capabilities: a per-vertex transform,
//! a per-triangle assembly step, and a per-pixel shading function. The
//! concrete stages here implement a single point light with distance
//! attenuation, Phong specular highlights, and nearest-neighbor texture
//! sampling.

use std::rc::Rc;

use crate::interpolant::{Interpolant, Triangle};
use crate::math::{Mat4, Vec3};
use crate::types::{Color, Texture, Vertex};

/// Per-vertex transform stage. Stateless per call; the bound matrices are
/// configuration set once per drawable object.
pub trait VertexStage {
    fn transform(&self, v: &Vertex) -> Interpolant;

    /// Currently bound projection matrix. The pipeline derives its
    /// backface-culling eye point from this matrix's translation row.
    fn projection(&self) -> Mat4;
}

/// Per-triangle assembly stage: three transformed vertices in, exactly one
/// triangle out. Exists so future effects can do per-triangle work; no
/// culling happens here.
pub trait GeometryStage {
    fn assemble(
        &self,
        v0: Interpolant,
        v1: Interpolant,
        v2: Interpolant,
        triangle_index: usize,
    ) -> Triangle;
}

/// Per-pixel shading stage: perspective-corrected attributes in, color out.
/// Pure function of the bound state and the input bundle.
pub trait PixelStage {
    fn shade(&self, attr: &Interpolant) -> Color;
}

/// Vertex stage binding world-view and projection matrices.
///
/// Position goes through the combined world-view-projection into clip
/// space. The normal and world position go through world-view only; the
/// normal is transformed as a direction and *not* renormalized here, since
/// renormalizing before interpolation would break linearity. The texture
/// coordinate passes through untouched.
#[derive(Debug, Clone)]
pub struct PhongVertexStage {
    world_view: Mat4,
    proj: Mat4,
    world_view_proj: Mat4,
}

impl PhongVertexStage {
    pub fn new() -> Self {
        Self {
            world_view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            world_view_proj: Mat4::IDENTITY,
        }
    }

    pub fn bind_world_view(&mut self, world_view: Mat4) {
        self.world_view = world_view;
        self.world_view_proj = self.world_view * self.proj;
    }

    pub fn bind_projection(&mut self, proj: Mat4) {
        self.proj = proj;
        self.world_view_proj = self.world_view * self.proj;
    }

    pub fn world_view(&self) -> Mat4 {
        self.world_view
    }
}

impl Default for PhongVertexStage {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexStage for PhongVertexStage {
    fn transform(&self, v: &Vertex) -> Interpolant {
        Interpolant {
            pos: self.world_view_proj.transform(v.pos),
            normal: self.world_view.transform_direction(v.normal),
            world_pos: self.world_view.transform(v.pos).xyz(),
            uv: v.uv,
        }
    }

    fn projection(&self) -> Mat4 {
        self.proj
    }
}

/// Identity triangle assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughGeometry;

impl GeometryStage for PassThroughGeometry {
    fn assemble(
        &self,
        v0: Interpolant,
        v1: Interpolant,
        v2: Interpolant,
        _triangle_index: usize,
    ) -> Triangle {
        Triangle::new(v0, v1, v2)
    }
}

/// Point-light diffuse attenuation constants
pub const ATTENUATION_CONSTANT: f32 = 0.682;
pub const ATTENUATION_LINEAR: f32 = 0.9;
pub const ATTENUATION_QUADRATIC: f32 = 0.6;

/// Specular highlight shape
pub const SPECULAR_POWER: f32 = 30.0;
pub const SPECULAR_INTENSITY: f32 = 0.6;

/// Pixel stage: textured specular+diffuse point light.
///
/// Light position is expected in view space (the scene transforms it by the
/// view matrix before binding), matching the world-view space the vertex
/// stage leaves `world_pos` in.
#[derive(Debug, Clone)]
pub struct PhongPixelStage {
    light_pos: Vec3,
    light_diffuse: Vec3,
    light_ambient: Vec3,
    texture: Option<Rc<Texture>>,
}

impl PhongPixelStage {
    pub fn new() -> Self {
        Self {
            light_pos: Vec3::new(0.0, 0.0, 0.5),
            light_diffuse: Vec3::new(1.0, 1.0, 1.0),
            light_ambient: Vec3::new(0.1, 0.1, 0.1),
            texture: None,
        }
    }

    pub fn set_light_position(&mut self, pos: Vec3) {
        self.light_pos = pos;
    }

    pub fn set_diffuse_light(&mut self, c: Vec3) {
        self.light_diffuse = c;
    }

    pub fn set_ambient_light(&mut self, c: Vec3) {
        self.light_ambient = c;
    }

    pub fn bind_texture(&mut self, tex: Rc<Texture>) {
        self.texture = Some(tex);
    }

    /// Sample the bound texture at the nearest wrapped texel (white when no
    /// texture is bound), in unit range.
    fn material_color(&self, attr: &Interpolant) -> Vec3 {
        match &self.texture {
            Some(tex) => {
                let tx = (attr.uv.x * tex.width as f32 + 0.5) as usize % tex.width;
                let ty = (attr.uv.y * tex.height as f32 + 0.5) as usize % tex.height;
                tex.get_pixel(tx, ty).to_unit_rgb()
            }
            None => Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Default for PhongPixelStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelStage for PhongPixelStage {
    fn shade(&self, attr: &Interpolant) -> Color {
        let material = self.material_color(attr);

        // re-normalize the interpolated surface normal
        let normal = attr.normal.normalize();

        // surface point to light
        let to_light = self.light_pos - attr.world_pos;
        let dist = to_light.len();
        let dir = to_light.normalize();

        let attenuation = 1.0
            / (ATTENUATION_CONSTANT
                + ATTENUATION_LINEAR * dist
                + ATTENUATION_QUADRATIC * dist * dist);

        // intensity from angle of incidence, scaled by attenuation
        let diffuse = self.light_diffuse * (attenuation * normal.dot(dir).max(0.0));

        // specular from angle between the reflected light vector and the
        // viewing vector, narrowed with a power function
        let reflected = to_light.reflect(normal).normalize();
        let view = attr.world_pos.normalize();
        let highlight = (-reflected).dot(view).max(0.0).powf(SPECULAR_POWER);
        let specular = self.light_diffuse * (SPECULAR_INTENSITY * highlight);

        // combine, filter by material, saturate, scale to bytes
        let lit = material
            .hadamard(diffuse + self.light_ambient + specular)
            .saturate(0.0, 1.0);
        Color::from_unit_rgb(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec4};

    fn attr_at(world_pos: Vec3, normal: Vec3) -> Interpolant {
        Interpolant::new(Vec4::new(0.0, 0.0, 0.5, 1.0), normal, world_pos, Vec2::default())
    }

    #[test]
    fn test_vertex_stage_identity_passthrough() {
        let vs = PhongVertexStage::new();
        let v = Vertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec2::new(0.25, 0.5),
        );
        let out = vs.transform(&v);
        assert_eq!(out.pos, v.pos);
        assert_eq!(out.normal, v.normal);
        assert_eq!(out.world_pos, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(out.uv, v.uv);
    }

    #[test]
    fn test_vertex_stage_normal_ignores_translation() {
        let mut vs = PhongVertexStage::new();
        vs.bind_world_view(Mat4::translation(5.0, 0.0, 0.0));
        let v = Vertex::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec2::default());
        let out = vs.transform(&v);
        assert_eq!(out.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!((out.world_pos.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_ambient_only_passes_material_through() {
        let mut ps = PhongPixelStage::new();
        ps.set_diffuse_light(Vec3::ZERO);
        ps.set_ambient_light(Vec3::new(1.0, 1.0, 1.0));
        ps.bind_texture(Rc::new(Texture::new(1, 1, Color::RED)));

        // light contributes nothing, ambient of 1 leaves material untouched
        let c = ps.shade(&attr_at(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(c, Color::RED);
    }

    #[test]
    fn test_facing_away_gets_no_diffuse() {
        let mut ps = PhongPixelStage::new();
        ps.set_light_position(Vec3::new(0.0, 0.0, 0.0));
        ps.set_ambient_light(Vec3::ZERO);
        ps.bind_texture(Rc::new(Texture::new(1, 1, Color::WHITE)));

        // normal points directly away from the light, diffuse clamps to zero
        let c = ps.shade(&attr_at(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(c.r, 0);
        assert_eq!(c.g, 0);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn test_closer_surface_is_brighter() {
        let mut ps = PhongPixelStage::new();
        ps.set_light_position(Vec3::new(0.0, 0.0, 0.0));
        ps.set_ambient_light(Vec3::ZERO);
        ps.bind_texture(Rc::new(Texture::new(1, 1, Color::WHITE)));

        let near = ps.shade(&attr_at(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)));
        let far = ps.shade(&attr_at(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0)));
        assert!(near.r > far.r);
    }

    #[test]
    fn test_texture_sampling_wraps_both_axes() {
        let mut ps = PhongPixelStage::new();
        ps.set_diffuse_light(Vec3::ZERO);
        ps.set_ambient_light(Vec3::new(1.0, 1.0, 1.0));

        // 2x4 texture, distinct corner color at (0, 0)
        let mut tex = Texture::new(2, 4, Color::BLUE);
        tex.put_pixel(0, 0, Color::GREEN);
        ps.bind_texture(Rc::new(tex));

        // uv (1, 1) wraps back to texel (0, 0) on both axes
        let mut attr = attr_at(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        attr.uv = Vec2::new(0.9, 0.95);
        assert_eq!(ps.shade(&attr), Color::GREEN);
    }
}
