//! Startup errors
//!
//! Both kinds are fatal: `main` logs them and exits with a non-zero status.
//! Nothing in the running frame loop produces a `DemoError`.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// Event loop, window, GPU surface/adapter/device or overlay setup failed
    #[error("failed to initialize the UI backend: {0}")]
    UiBackendInit(String),

    #[error("could not load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
}

impl From<winit::error::EventLoopError> for DemoError {
    fn from(err: winit::error::EventLoopError) -> Self {
        DemoError::UiBackendInit(format!("event loop: {err}"))
    }
}

impl From<winit::error::OsError> for DemoError {
    fn from(err: winit::error::OsError) -> Self {
        DemoError::UiBackendInit(format!("window: {err}"))
    }
}

impl From<wgpu::CreateSurfaceError> for DemoError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        DemoError::UiBackendInit(format!("surface: {err}"))
    }
}

impl From<wgpu::RequestDeviceError> for DemoError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        DemoError::UiBackendInit(format!("device: {err}"))
    }
}
