//! Core value types: colors, vertices, textures, and indexed meshes

use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Vec3, Vec4};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from unit-range channels, scaling to 0-255.
    /// Channels must already be clamped to [0, 1].
    pub fn from_unit_rgb(rgb: Vec3) -> Self {
        Self {
            r: (rgb.x * 255.0) as u8,
            g: (rgb.y * 255.0) as u8,
            b: (rgb.z * 255.0) as u8,
            a: 255,
        }
    }

    /// Unit-range channels (material color for lighting)
    pub fn to_unit_rgb(self) -> Vec3 {
        Vec3::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Convert to u32 (RGBA byte order)
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
    }

    /// Convert to [u8; 4] for raw pixel upload
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Input geometry record: homogeneous position, normal, texture coordinate,
/// and a per-vertex color for effects that want one (the Phong point-light
/// effect ignores it). Read-only to the pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec4,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            pos: Vec4::from_point(pos),
            normal,
            uv,
            color: Vec3::ZERO,
        }
    }

    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec4::new(x, y, z, 1.0),
            normal: Vec3::ZERO,
            uv: Vec2::default(),
            color: Vec3::ZERO,
        }
    }
}

/// Triangle topology over a vertex array: indices come in triples,
/// one triple per triangle. Supplied per draw call, never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexedTriangleList {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<usize>,
}

impl IndexedTriangleList {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<usize>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Simple texture (array of colors). Doubles as the render target surface:
/// the pipeline samples bound textures through `get_pixel` and writes shaded
/// pixels to the target through `put_pixel`.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
            name: String::new(),
        }
    }

    /// Load texture from an image file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        use image::GenericImageView;

        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        })
    }

    /// Load texture from raw encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, String> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        })
    }

    /// Load all textures from a directory (sorted by path)
    pub fn load_directory<P: AsRef<std::path::Path>>(dir: P) -> Vec<Self> {
        let dir = dir.as_ref();
        let mut textures = Vec::new();

        if let Ok(entries) = std::fs::read_dir(dir) {
            let mut paths: Vec<_> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .map(|ext| {
                            let ext = ext.to_ascii_lowercase();
                            ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "bmp"
                        })
                        .unwrap_or(false)
                })
                .collect();

            paths.sort();

            for path in paths {
                match Self::from_file(&path) {
                    Ok(tex) => {
                        println!("Loaded texture: {} ({}x{})", tex.name, tex.width, tex.height);
                        textures.push(tex);
                    }
                    Err(e) => {
                        eprintln!("{}", e);
                    }
                }
            }
        }

        textures
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Get pixel at x,y coordinates (black outside bounds)
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::BLACK
        }
    }

    /// Write pixel at x,y coordinates (ignored outside bounds)
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Sample at normalized UV coordinates (nearest neighbor, wrapping)
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let tx = ((u * self.width as f32) as usize) % self.width;
        let ty = ((v * self.height as f32) as usize) % self.height;
        self.pixels[ty * self.width + tx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_unit_round_trip() {
        let c = Color::new(255, 0, 0);
        let unit = c.to_unit_rgb();
        assert!((unit.x - 1.0).abs() < 0.001);
        assert_eq!(Color::from_unit_rgb(unit), c);
    }

    #[test]
    fn test_texture_put_get() {
        let mut tex = Texture::new(4, 4, Color::BLACK);
        tex.put_pixel(2, 3, Color::GREEN);
        assert_eq!(tex.get_pixel(2, 3), Color::GREEN);

        // out-of-bounds writes are dropped, reads come back black
        tex.put_pixel(9, 9, Color::RED);
        assert_eq!(tex.get_pixel(9, 9), Color::BLACK);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let tex = Texture::checkerboard(8, 8, Color::WHITE, Color::BLACK);
        assert_eq!(tex.get_pixel(0, 0), Color::WHITE);
        assert_eq!(tex.get_pixel(4, 0), Color::BLACK);
    }
}
