//! wgpu rendering
//!
//! The scene (background and circle) goes through a small flat-color
//! pipeline; the label and the control panel are painted on top by the
//! overlay.

pub mod overlay;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use overlay::{Overlay, OverlayFrame};
pub use pipeline::RenderState;
pub use vertex::Vertex;
