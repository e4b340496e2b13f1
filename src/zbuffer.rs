//! Per-pixel depth buffer with test-and-set semantics

/// One depth value per pixel of the render target. Cleared to +infinity so
/// the first write to any pixel always passes. Owned exclusively by one
/// pipeline instance; no locking, single-threaded use only.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depths: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to +infinity (once per frame, before any draw call)
    pub fn clear(&mut self) {
        for d in &mut self.depths {
            *d = f32::INFINITY;
        }
    }

    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.depths[y * self.width + x]
    }

    /// Update the cell and return true only if `depth` is strictly closer
    /// than the stored value. Ties lose, so the first triangle processed at
    /// a given depth keeps the pixel.
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let stored = &mut self.depths[y * self.width + x];
        if depth < *stored {
            *stored = depth;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_then_every_pixel_passes_once() {
        let mut zb = DepthBuffer::new(4, 3);
        zb.clear();
        for y in 0..3 {
            for x in 0..4 {
                assert!(zb.test_and_set(x, y, 10.0));
                assert!(!zb.test_and_set(x, y, 10.0));
            }
        }
    }

    #[test]
    fn test_closer_depth_wins_either_order() {
        let mut zb = DepthBuffer::new(2, 2);

        assert!(zb.test_and_set(0, 0, 1.0));
        assert!(!zb.test_and_set(0, 0, 2.0));
        assert!((zb.at(0, 0) - 1.0).abs() < f32::EPSILON);

        assert!(zb.test_and_set(1, 1, 2.0));
        assert!(zb.test_and_set(1, 1, 1.0));
        assert!((zb.at(1, 1) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_equal_depth_rejected() {
        let mut zb = DepthBuffer::new(1, 1);
        assert!(zb.test_and_set(0, 0, 0.5));
        assert!(!zb.test_and_set(0, 0, 0.5));
    }
}
