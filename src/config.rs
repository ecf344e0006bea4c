//! Startup configuration
//!
//! Built once in `main` and handed to the driver and the app; never mutated
//! afterwards. Every value here is a hard-coded default, there is no config
//! file and no command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Immutable demo configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Window title
    pub title: String,
    /// Logical window size in pixels; also the fixed view used for drawing
    pub window_width: u32,
    pub window_height: u32,
    /// Frame-rate cap (frames per second)
    pub frame_rate_limit: u32,
    /// Scale applied to the whole control panel (sizes and fonts)
    pub ui_scale: f32,
    /// Label font, relative to the working directory
    pub font_path: PathBuf,
    /// Label glyph height in pixels
    pub label_char_size: f32,
    /// Initial contents of both the text buffer and the label
    pub initial_text: String,

    // === Circle ===
    /// Top-left of the circle's bounding box
    pub circle_position: Vec2,
    pub circle_radius: f32,
    pub circle_segments: u32,
    /// Normalized RGB
    pub circle_color: [f32; 3],
    /// Pixels per second
    pub circle_velocity: Vec2,
    pub draw_circle: bool,
    pub draw_text: bool,

    /// Key that reverses the horizontal velocity
    pub reverse_key: KeyCode,
    /// Background clear color (RGB, 0-255)
    pub clear_color: [u8; 3],
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "SFML works!".to_string(),
            window_width: 1280,
            window_height: 720,
            frame_rate_limit: 60,
            ui_scale: 2.0,
            font_path: PathBuf::from("fonts/Roboto-Regular.ttf"),
            label_char_size: 24.0,
            initial_text: "Sample Text".to_string(),

            circle_position: Vec2::new(10.0, 10.0),
            circle_radius: 50.0,
            circle_segments: 32,
            circle_color: [0.0, 1.0, 1.0],
            circle_velocity: Vec2::new(1.0, 0.5),
            draw_circle: true,
            draw_text: true,

            reverse_key: KeyCode::KeyX,
            clear_color: [0, 0, 0],
        }
    }
}

impl DemoConfig {
    /// Label anchor: bottom-left corner, moved up by the glyph height
    pub fn label_position(&self) -> Vec2 {
        Vec2::new(0.0, self.window_height as f32 - self.label_char_size)
    }

    /// Target duration of one frame; zero means uncapped
    pub fn frame_interval(&self) -> Duration {
        if self.frame_rate_limit == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / self.frame_rate_limit as f64)
        }
    }

    /// Logical view size as a vector
    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }
}
