//! softpipe: software triangle rasterization pipeline
//!
//! A CPU rasterizer that takes indexed triangle lists through the classic
//! stages: per-vertex transform, triangle assembly with backface culling,
//! near-plane clipping in homogeneous clip space, perspective divide and
//! screen mapping, then scanline rasterization with early-z depth testing
//! and perspective-correct attribute interpolation. Shading is pluggable;
//! the stock effect is a single point light with distance attenuation and
//! Phong specular highlights over a nearest-sampled texture.
//!
//! ```no_run
//! use std::rc::Rc;
//! use softpipe::{Color, Mat4, PhongPointPipeline, Texture, Vec3};
//! use softpipe::geometry::plane_skinned_normals;
//!
//! let mut pipeline = PhongPointPipeline::phong(640, 480);
//! pipeline.vs.bind_projection(Mat4::perspective_fov_lh(1.13, 4.0 / 3.0, 1.0, 1000.0));
//! pipeline.vs.bind_world_view(Mat4::translation(0.0, 0.0, 2.0));
//! pipeline.ps.set_light_position(Vec3::new(0.0, 0.0, 0.0));
//! pipeline.ps.bind_texture(Rc::new(Texture::checkerboard(
//!     64, 64, Color::WHITE, Color::new(64, 64, 64),
//! )));
//!
//! let wall = plane_skinned_normals(1, 1, 1.0, 1.0, 1.0);
//! let mut frame = Texture::new(640, 480, Color::BLACK);
//! pipeline.begin_frame();
//! pipeline.draw(&mut frame, &wall);
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod clip;
pub mod effect;
pub mod geometry;
pub mod interpolant;
pub mod math;
pub mod pipeline;
pub mod raster;
pub mod screen;
pub mod types;
pub mod zbuffer;

pub use effect::{
    GeometryStage, PassThroughGeometry, PhongPixelStage, PhongVertexStage, PixelStage, VertexStage,
};
pub use interpolant::{Interpolant, Triangle};
pub use math::{Mat4, Vec2, Vec3, Vec4};
pub use pipeline::{PhongPointPipeline, Pipeline};
pub use screen::ScreenTransformer;
pub use types::{Color, IndexedTriangleList, Texture, Vertex};
pub use zbuffer::DepthBuffer;
