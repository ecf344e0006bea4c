//! Shape generation for 2D primitives
//!
//! Vertices come out in window pixels (origin top-left, y down); the pipeline
//! maps them to clip space.

use glam::Vec2;

use super::vertex::Vertex;
use crate::scene::CircleShape;

/// Filled circle as a triangle fan flattened into a triangle list
pub fn circle(shape: &CircleShape) -> Vec<Vertex> {
    let color = shape.fill.to_rgba();
    let center = shape.center();
    let outline: Vec<Vec2> = shape.outline().collect();
    let n = outline.len();

    let mut vertices = Vec::with_capacity(n * 3);
    for i in 0..n {
        let p1 = outline[i];
        let p2 = outline[(i + 1) % n];

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Window pixels to normalized device coordinates for a fixed view size
#[inline]
pub fn pixel_to_ndc(p: Vec2, view: Vec2) -> [f32; 2] {
    [p.x / view.x * 2.0 - 1.0, 1.0 - p.y / view.y * 2.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Rgb8;

    #[test]
    fn test_circle_vertex_count_matches_segments() {
        for segments in [3, 7, 32, 64] {
            let shape = CircleShape::new(50.0, segments);
            assert_eq!(circle(&shape).len(), segments as usize * 3);
        }
    }

    #[test]
    fn test_circle_vertices_on_rim_or_center() {
        let mut shape = CircleShape::new(40.0, 16);
        shape.position = Vec2::new(100.0, 200.0);
        shape.fill = Rgb8::new(255, 0, 0);
        let center = Vec2::new(140.0, 240.0);

        for (i, v) in circle(&shape).iter().enumerate() {
            let p = Vec2::from(v.position);
            let d = (p - center).length();
            if i % 3 == 0 {
                assert!(d < 1e-4);
            } else {
                assert!((d - 40.0).abs() < 1e-3);
            }
            assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_pixel_to_ndc_corners() {
        let view = Vec2::new(1280.0, 720.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, view), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(view, view), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc(view / 2.0, view), [0.0, 0.0]);
    }
}
