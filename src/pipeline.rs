//! Draw-call orchestration
//!
//! One draw call takes an indexed triangle list through vertex transform,
//! triangle assembly with backface culling, near-plane clipping, perspective
//! divide / screen transform, and scanline rasterization, synchronously and
//! in index order. The pipeline owns its depth buffer and shader stages;
//! the target surface is borrowed per draw call and must match the
//! dimensions the pipeline was built with.

use crate::clip::{clip_triangle, Clipped};
use crate::effect::{
    GeometryStage, PassThroughGeometry, PhongPixelStage, PhongVertexStage, PixelStage, VertexStage,
};
use crate::interpolant::{Interpolant, Triangle};
use crate::raster;
use crate::screen::ScreenTransformer;
use crate::types::{IndexedTriangleList, Texture};
use crate::zbuffer::DepthBuffer;

pub struct Pipeline<V, G, P> {
    width: usize,
    height: usize,
    zbuffer: DepthBuffer,
    screen: ScreenTransformer,
    pub vs: V,
    pub gs: G,
    pub ps: P,
}

/// The stock configuration: Phong point-light shading over a bound texture.
pub type PhongPointPipeline = Pipeline<PhongVertexStage, PassThroughGeometry, PhongPixelStage>;

impl PhongPointPipeline {
    pub fn phong(width: usize, height: usize) -> Self {
        Pipeline::new(
            width,
            height,
            PhongVertexStage::new(),
            PassThroughGeometry,
            PhongPixelStage::new(),
        )
    }
}

impl<V: VertexStage, G: GeometryStage, P: PixelStage> Pipeline<V, G, P> {
    pub fn new(width: usize, height: usize, vs: V, gs: G, ps: P) -> Self {
        Self {
            width,
            height,
            zbuffer: DepthBuffer::new(width, height),
            screen: ScreenTransformer::new(width, height),
            vs,
            gs,
            ps,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.zbuffer
    }

    /// Reset the depth buffer. Call once per frame, before any draw call.
    pub fn begin_frame(&mut self) {
        self.zbuffer.clear();
    }

    /// Rasterize one indexed triangle list into the target surface. Runs to
    /// completion before returning; the mesh is never mutated.
    pub fn draw(&mut self, target: &mut Texture, mesh: &IndexedTriangleList) {
        debug_assert_eq!(target.width, self.width);
        debug_assert_eq!(target.height, self.height);

        let transformed: Vec<Interpolant> =
            mesh.vertices.iter().map(|v| self.vs.transform(v)).collect();

        self.assemble_triangles(target, &transformed, &mesh.indices);
    }

    /// Walk the index stream in triples, cull backfaces, and hand surviving
    /// triangles to the geometry stage and clipper.
    fn assemble_triangles(
        &mut self,
        target: &mut Texture,
        vertices: &[Interpolant],
        indices: &[usize],
    ) {
        // reference eye point from the projection matrix's translation row
        let eye = self.vs.projection().translation_row();

        for (triangle_index, idx) in indices.chunks_exact(3).enumerate() {
            let v0 = vertices[idx[0]];
            let v1 = vertices[idx[1]];
            let v2 = vertices[idx[2]];

            // face normal from the clip-space edge vectors; cull when it
            // does not point toward the eye
            let normal = (v1.pos.xyz() - v0.pos.xyz()).cross(v2.pos.xyz() - v0.pos.xyz());
            let to_eye = eye - v2.pos.xyz();
            if normal.dot(to_eye) <= 0.0 {
                continue;
            }

            let t = self.gs.assemble(v0, v1, v2, triangle_index);
            match clip_triangle(t) {
                Clipped::Rejected => {}
                Clipped::One(t) => self.post_process(target, t),
                Clipped::Two(a, b) => {
                    self.post_process(target, a);
                    self.post_process(target, b);
                }
            }
        }
    }

    /// Perspective divide, screen transform, rasterize.
    fn post_process(&mut self, target: &mut Texture, mut t: Triangle) {
        self.screen.transform_triangle(&mut t);
        raster::draw_triangle(target, &mut self.zbuffer, &self.ps, &t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::geometry::plane_skinned_normals;
    use crate::math::{Mat4, Vec2, Vec3, Vec4};
    use crate::types::{Color, Vertex};

    /// Triangle whose clip-space positions pass straight through identity
    /// matrices: screen (100,100) / (200,100) / (150,200) on a 400x400
    /// target, depth 0.5, winding facing the eye.
    fn front_facing_mesh() -> IndexedTriangleList {
        let mut v0 = Vertex::from_pos(-0.5, 0.5, 0.5);
        let mut v1 = Vertex::from_pos(0.0, 0.5, 0.5);
        let mut v2 = Vertex::from_pos(-0.25, 0.0, 0.5);
        for v in [&mut v0, &mut v1, &mut v2] {
            v.normal = Vec3::new(0.0, 0.0, -1.0);
            v.uv = Vec2::default();
        }
        IndexedTriangleList::new(vec![v0, v1, v2], vec![0, 1, 2])
    }

    fn ambient_only_pipeline(width: usize, height: usize, material: Color) -> PhongPointPipeline {
        let mut p = PhongPointPipeline::phong(width, height);
        p.ps.set_diffuse_light(Vec3::ZERO);
        p.ps.set_ambient_light(Vec3::new(1.0, 1.0, 1.0));
        p.ps.bind_texture(Rc::new(Texture::new(1, 1, material)));
        p
    }

    fn covered_count(zb: &DepthBuffer) -> usize {
        let mut n = 0;
        for y in 0..zb.height() {
            for x in 0..zb.width() {
                if zb.at(x, y).is_finite() {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_single_triangle_ambient_red() {
        let mut p = ambient_only_pipeline(400, 400, Color::RED);
        let mut target = Texture::new(400, 400, Color::BLACK);

        p.begin_frame();
        p.draw(&mut target, &front_facing_mesh());

        // material * ambient(1,1,1) = material, untouched by the light
        assert_eq!(target.get_pixel(150, 150), Color::RED);
        assert_eq!(target.get_pixel(50, 300), Color::BLACK);
    }

    #[test]
    fn test_reversed_winding_is_culled() {
        let mut p = ambient_only_pipeline(400, 400, Color::RED);
        let mut target = Texture::new(400, 400, Color::BLACK);

        let mut mesh = front_facing_mesh();
        mesh.indices = vec![0, 2, 1];

        p.begin_frame();
        p.draw(&mut target, &mesh);
        assert_eq!(covered_count(p.depth_buffer()), 0);
    }

    #[test]
    fn test_offscreen_triangle_writes_no_pixels() {
        let mut p = ambient_only_pipeline(100, 100, Color::WHITE);
        let mut target = Texture::new(100, 100, Color::BLACK);

        // all three x > w: outside the right plane, but wound so the
        // backface test forwards it to the clipper
        let mesh = IndexedTriangleList::new(
            vec![
                Vertex { pos: Vec4::new(2.0, 0.0, 0.5, 1.0), ..Default::default() },
                Vertex { pos: Vec4::new(2.0, 0.5, 0.5, 1.0), ..Default::default() },
                Vertex { pos: Vec4::new(2.5, 0.0, 0.5, 1.0), ..Default::default() },
            ],
            vec![0, 1, 2],
        );

        p.begin_frame();
        p.draw(&mut target, &mesh);
        assert_eq!(covered_count(p.depth_buffer()), 0);
    }

    #[test]
    fn test_near_clipped_triangle_writes_finite_depths() {
        let mut p = ambient_only_pipeline(200, 200, Color::GREEN);
        let mut target = Texture::new(200, 200, Color::BLACK);

        // one vertex behind the near plane, two in front
        let mesh = IndexedTriangleList::new(
            vec![
                Vertex { pos: Vec4::new(0.0, 0.8, -0.5, 1.0), ..Default::default() },
                Vertex { pos: Vec4::new(0.6, -0.5, 0.5, 1.0), ..Default::default() },
                Vertex { pos: Vec4::new(-0.6, -0.5, 0.5, 1.0), ..Default::default() },
            ],
            vec![0, 1, 2],
        );

        p.begin_frame();
        p.draw(&mut target, &mesh);

        let zb = p.depth_buffer();
        assert!(covered_count(zb) > 0);
        for y in 0..zb.height() {
            for x in 0..zb.width() {
                let d = zb.at(x, y);
                assert!(d.is_infinite() || (d.is_finite() && d >= 0.0));
            }
        }
    }

    #[test]
    fn test_begin_frame_resets_depth() {
        let mut p = ambient_only_pipeline(400, 400, Color::RED);
        let mut target = Texture::new(400, 400, Color::BLACK);

        p.begin_frame();
        p.draw(&mut target, &front_facing_mesh());
        assert!(covered_count(p.depth_buffer()) > 0);

        p.begin_frame();
        assert_eq!(covered_count(p.depth_buffer()), 0);
    }

    #[test]
    fn test_closer_draw_wins_between_draw_calls() {
        let mut p = ambient_only_pipeline(400, 400, Color::RED);
        let mut target = Texture::new(400, 400, Color::BLACK);

        let near = front_facing_mesh(); // depth 0.5
        let mut far = front_facing_mesh();
        for v in &mut far.vertices {
            v.pos.z = 0.8;
        }

        p.begin_frame();
        p.draw(&mut target, &far);
        p.ps.bind_texture(Rc::new(Texture::new(1, 1, Color::BLUE)));
        p.draw(&mut target, &near);
        assert_eq!(target.get_pixel(150, 150), Color::BLUE);

        // drawing the far mesh again changes nothing
        p.ps.bind_texture(Rc::new(Texture::new(1, 1, Color::GREEN)));
        p.draw(&mut target, &far);
        assert_eq!(target.get_pixel(150, 150), Color::BLUE);
    }

    #[test]
    fn test_textured_wall_through_projection() {
        // a lit wall in front of the camera, the way the original scene
        // drives the pipeline: world-view and projection bound per object
        let mut p = PhongPointPipeline::phong(400, 400);
        p.ps.set_ambient_light(Vec3::new(0.35, 0.35, 0.35));
        p.ps.set_light_position(Vec3::new(0.0, 0.0, 0.0));
        p.ps.bind_texture(Rc::new(Texture::checkerboard(
            32,
            32,
            Color::WHITE,
            Color::new(128, 128, 128),
        )));

        p.vs.bind_projection(Mat4::perspective_fov_lh(
            std::f32::consts::FRAC_PI_2,
            1.0,
            0.5,
            10.0,
        ));
        p.vs.bind_world_view(Mat4::translation(0.0, 0.0, 2.0));

        let wall = plane_skinned_normals(1, 1, 1.0, 1.0, 1.0);
        let mut target = Texture::new(400, 400, Color::BLACK);

        p.begin_frame();
        p.draw(&mut target, &wall);

        // wall center lands at screen center, lit above pure black
        let center = target.get_pixel(200, 200);
        assert_ne!(center, Color::BLACK);
        // corners of the target are outside the wall
        assert_eq!(target.get_pixel(5, 5), Color::BLACK);
    }
}
