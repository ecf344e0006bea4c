//! Scene state: every parameter that is displayed or animated
//!
//! Owned by the frame driver and mutated once per frame. The panel edits a
//! copy of these values (`PanelModel`) which is assigned back through
//! `SceneState::apply_panel`; the drawable `CircleShape` is then brought in
//! line with the parameters by `SceneState::sync_shape`.

use std::f32::consts::PI;
use std::ops::RangeInclusive;
use std::time::Duration;

use glam::Vec2;

use crate::config::DemoConfig;
use crate::ui::PanelModel;

/// Radius slider bounds
pub const RADIUS_RANGE: RangeInclusive<f32> = 0.0..=300.0;
/// Side-count slider bounds
pub const SEGMENT_RANGE: RangeInclusive<u32> = 3..=64;
/// Maximum number of characters the text input holds
pub const TEXT_CAPACITY: usize = 254;

/// 8-bit RGB color as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert normalized channels, truncating `c * 255` toward zero
    pub fn from_unit(c: [f32; 3]) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(channel(c[0]), channel(c[1]), channel(c[2]))
    }

    /// Opaque RGBA in 0..1 for vertex colors
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Text with a hard character limit
///
/// Anything past the limit is dropped on assignment, always on a character
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText {
    text: String,
    capacity: usize,
}

impl BoundedText {
    pub fn new(capacity: usize, initial: &str) -> Self {
        let mut text = Self {
            text: String::new(),
            capacity,
        };
        text.set(initial);
        text
    }

    /// Replace the contents, truncating to the capacity
    pub fn set(&mut self, value: &str) {
        self.text.clear();
        self.text.push_str(truncate_chars(value, self.capacity));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// A filled regular polygon approximating a circle
///
/// `position` is the top-left corner of the bounding box, so the center sits
/// at `position + (radius, radius)`. The outline is cached in local
/// coordinates and regenerated when the radius or point count changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub position: Vec2,
    pub fill: Rgb8,
    radius: f32,
    point_count: u32,
    outline: Vec<Vec2>,
}

impl CircleShape {
    pub fn new(radius: f32, point_count: u32) -> Self {
        let mut shape = Self {
            position: Vec2::ZERO,
            fill: Rgb8::new(255, 255, 255),
            radius,
            point_count,
            outline: Vec::new(),
        };
        shape.rebuild_outline();
        shape
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    pub fn set_radius(&mut self, radius: f32) {
        if radius != self.radius {
            self.radius = radius;
            self.rebuild_outline();
        }
    }

    pub fn set_point_count(&mut self, point_count: u32) {
        if point_count != self.point_count {
            self.point_count = point_count;
            self.rebuild_outline();
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    /// Outline vertices in window coordinates, first point at the top
    pub fn outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outline.iter().map(move |p| self.position + *p)
    }

    fn rebuild_outline(&mut self) {
        let n = self.point_count;
        let r = self.radius;
        self.outline = (0..n)
            .map(|i| {
                let theta = (i as f32 / n as f32) * 2.0 * PI - PI / 2.0;
                Vec2::new(r + r * theta.cos(), r + r * theta.sin())
            })
            .collect();
    }
}

/// The on-screen text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Top-left corner in window pixels
    pub position: Vec2,
    /// Glyph height in pixels
    pub char_size: f32,
}

/// Everything the frame driver mutates
#[derive(Debug, Clone)]
pub struct SceneState {
    pub circle: CircleShape,
    pub radius: f32,
    pub segments: u32,
    /// Normalized RGB, edited by the color picker
    pub color: [f32; 3],
    /// Pixels per second
    pub velocity: Vec2,
    pub draw_circle: bool,
    pub draw_text: bool,
    /// Edit buffer behind the text input
    pub text_input: BoundedText,
    /// What is actually drawn; only changes on commit
    pub label: Label,
}

impl SceneState {
    pub fn new(config: &DemoConfig) -> Self {
        let radius = config.circle_radius.clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        let segments = config
            .circle_segments
            .clamp(*SEGMENT_RANGE.start(), *SEGMENT_RANGE.end());

        let mut circle = CircleShape::new(radius, segments);
        circle.position = config.circle_position;

        let mut scene = Self {
            circle,
            radius,
            segments,
            color: config.circle_color,
            velocity: config.circle_velocity,
            draw_circle: config.draw_circle,
            draw_text: config.draw_text,
            text_input: BoundedText::new(TEXT_CAPACITY, &config.initial_text),
            label: Label {
                text: config.initial_text.clone(),
                position: config.label_position(),
                char_size: config.label_char_size,
            },
        };
        scene.sync_shape();
        scene
    }

    /// Flip the sign of the horizontal velocity
    pub fn reverse_horizontal(&mut self) {
        self.velocity.x *= -1.0;
    }

    /// Snap the circle back to the window origin; velocity and color stay
    pub fn reset_position(&mut self) {
        self.circle.position = Vec2::ZERO;
    }

    /// Copy the edit buffer into the displayed label
    pub fn commit_text(&mut self) {
        self.label.text = self.text_input.as_str().to_string();
    }

    /// Assign the panel's edited values back, then run its button actions
    pub fn apply_panel(&mut self, panel: &PanelModel) {
        self.draw_circle = panel.draw_circle;
        self.draw_text = panel.draw_text;
        self.radius = panel.radius.clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        self.segments = panel
            .segments
            .clamp(*SEGMENT_RANGE.start(), *SEGMENT_RANGE.end());
        self.color = panel.color.map(|c| c.clamp(0.0, 1.0));
        self.text_input.set(&panel.text);

        if panel.commit_text {
            self.commit_text();
        }
        if panel.reset_position {
            self.reset_position();
        }
    }

    /// Push radius, side count and color into the drawable
    pub fn sync_shape(&mut self) {
        self.circle.set_point_count(self.segments);
        self.circle.set_radius(self.radius);
        self.circle.fill = Rgb8::from_unit(self.color);
    }

    /// Move the circle by `velocity * dt`; no bounds
    pub fn advance(&mut self, dt: Duration) {
        self.circle.position += self.velocity * dt.as_secs_f32();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scene() -> SceneState {
        SceneState::new(&DemoConfig::default())
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_defaults() {
        let s = scene();
        assert_eq!(s.circle.radius(), 50.0);
        assert_eq!(s.circle.point_count(), 32);
        assert_eq!(s.circle.fill, Rgb8::new(0, 255, 255));
        assert_eq!(s.circle.position, Vec2::new(10.0, 10.0));
        assert_eq!(s.velocity, Vec2::new(1.0, 0.5));
        assert_eq!(s.label.text, "Sample Text");
        assert_eq!(s.text_input.as_str(), "Sample Text");
    }

    #[test]
    fn test_one_frame_and_reverse() {
        let mut s = scene();
        s.advance(Duration::from_millis(16));
        assert!(approx(s.circle.position, Vec2::new(10.016, 10.008)));

        s.reverse_horizontal();
        assert_eq!(s.velocity.x, -1.0);
        assert_eq!(s.velocity.y, 0.5);
    }

    #[test]
    fn test_drift_is_unbounded() {
        let mut s = scene();
        s.velocity = Vec2::new(-500.0, 0.0);
        s.advance(Duration::from_secs(10));
        assert!(s.circle.position.x < -4000.0);
    }

    #[test]
    fn test_reset_keeps_velocity_and_color() {
        let mut s = scene();
        s.advance(Duration::from_secs(3));
        s.reverse_horizontal();
        let velocity = s.velocity;
        let fill = s.circle.fill;

        s.reset_position();
        assert_eq!(s.circle.position, Vec2::ZERO);
        assert_eq!(s.velocity, velocity);
        assert_eq!(s.circle.fill, fill);
    }

    #[test]
    fn test_text_reaches_label_only_on_commit() {
        let mut s = scene();
        let mut panel = PanelModel::from_scene(&s);
        panel.text = "Hello".to_string();
        s.apply_panel(&panel);
        assert_eq!(s.text_input.as_str(), "Hello");
        assert_eq!(s.label.text, "Sample Text");

        panel.commit_text = true;
        s.apply_panel(&panel);
        assert_eq!(s.label.text, "Hello");

        let mut panel = PanelModel::from_scene(&s);
        panel.text = "Changed later".to_string();
        s.apply_panel(&panel);
        assert_eq!(s.label.text, "Hello");
    }

    #[test]
    fn test_segment_change_regenerates_outline() {
        let mut s = scene();
        assert_eq!(s.circle.outline().count(), 32);

        s.segments = 5;
        s.sync_shape();
        let points: Vec<Vec2> = s.circle.outline().collect();
        assert_eq!(points.len(), 5);
        // First point sits at the top of the bounding box
        assert!(approx(points[0], s.circle.position + Vec2::new(50.0, 0.0)));
        for p in points {
            assert!(((p - s.circle.center()).length() - 50.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bounded_text_truncates_on_char_boundary() {
        let mut t = BoundedText::new(3, "");
        t.set("héllo");
        assert_eq!(t.as_str(), "hél");

        let long = "x".repeat(TEXT_CAPACITY + 10);
        let t = BoundedText::new(TEXT_CAPACITY, &long);
        assert_eq!(t.as_str().chars().count(), TEXT_CAPACITY);
    }

    proptest! {
        #[test]
        fn prop_radius_clamped(radius in -1000.0f32..1000.0) {
            let mut s = scene();
            let mut panel = PanelModel::from_scene(&s);
            panel.radius = radius;
            s.apply_panel(&panel);
            s.sync_shape();
            prop_assert_eq!(s.circle.radius(), radius.clamp(0.0, 300.0));
        }

        #[test]
        fn prop_segments_clamped(segments in 0u32..200) {
            let mut s = scene();
            let mut panel = PanelModel::from_scene(&s);
            panel.segments = segments;
            s.apply_panel(&panel);
            s.sync_shape();
            let expected = segments.clamp(3, 64);
            prop_assert_eq!(s.circle.point_count(), expected);
            prop_assert_eq!(s.circle.outline().count(), expected as usize);
        }

        #[test]
        fn prop_color_floors(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let rgb = Rgb8::from_unit([r, g, b]);
            prop_assert_eq!(rgb.r as f32, (r * 255.0).floor());
            prop_assert_eq!(rgb.g as f32, (g * 255.0).floor());
            prop_assert_eq!(rgb.b as f32, (b * 255.0).floor());
        }

        #[test]
        fn prop_reverse_parity(presses in 0usize..50) {
            let mut s = scene();
            let original = s.velocity.x;
            for _ in 0..presses {
                s.reverse_horizontal();
            }
            let expected = if presses % 2 == 0 { original } else { -original };
            prop_assert_eq!(s.velocity.x, expected);
        }

        #[test]
        fn prop_reset_after_any_drift(dx in -1e4f32..1e4, dy in -1e4f32..1e4) {
            let mut s = scene();
            s.circle.position += Vec2::new(dx, dy);
            let mut panel = PanelModel::from_scene(&s);
            panel.reset_position = true;
            s.apply_panel(&panel);
            prop_assert_eq!(s.circle.position, Vec2::ZERO);
            prop_assert_eq!(s.velocity, Vec2::new(1.0, 0.5));
        }
    }
}
