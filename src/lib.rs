//! Circle overlay - an animated circle and a text label with a live control panel
//!
//! Core modules:
//! - `scene`: Parameters that are displayed or animated
//! - `driver`: Per-frame event/UI/sync/animate/draw cycle
//! - `ui`: Immediate-mode control panel (egui)
//! - `renderer`: wgpu scene pipeline and overlay painting
//! - `app`: winit event loop tying it all together

pub mod app;
pub mod config;
pub mod driver;
pub mod error;
pub mod font;
pub mod pacing;
pub mod renderer;
pub mod scene;
pub mod ui;

pub use app::run;
pub use config::DemoConfig;
pub use driver::{DrawCommand, FrameDriver, FrameEvent, LoopState};
pub use error::DemoError;
pub use scene::SceneState;
