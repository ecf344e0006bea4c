//! winit application: window, GPU, overlay and the frame loop
//!
//! winit delivers events one at a time through `ApplicationHandler`. Each
//! window event is handed to the overlay first and then to the frame driver;
//! `about_to_wait` is the top of the loop, where the driver's loop condition is
//! checked and the pacer decides whether the next frame is due.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::DemoConfig;
use crate::driver::{DrawCommand, FrameDriver, FrameEvent};
use crate::error::DemoError;
use crate::font::{install_label_font, load_label_font};
use crate::pacing::{FramePacer, Pace};
use crate::renderer::{Overlay, OverlayFrame, RenderState, shapes};
use crate::scene::Rgb8;
use crate::ui;

/// Open the window and run until it is closed
///
/// Returns the first startup failure, if any; a normal close is `Ok(())`.
pub fn run(config: DemoConfig) -> Result<(), DemoError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything that only exists once the window is up
struct Running {
    window: Arc<Window>,
    gpu: RenderState,
    overlay: Overlay,
}

struct DemoApp {
    driver: FrameDriver,
    pacer: FramePacer,
    running: Option<Running>,
    failure: Option<DemoError>,
}

impl DemoApp {
    fn new(config: DemoConfig) -> Self {
        let pacer = FramePacer::new(config.frame_interval(), Instant::now());
        Self {
            driver: FrameDriver::new(config),
            pacer,
            running: None,
            failure: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Running, DemoError> {
        let config = self.driver.config();

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let gpu = pollster::block_on(RenderState::new(window.clone(), config.view_size()))?;
        let overlay = Overlay::new(&window, &gpu.device, gpu.config.format, config.ui_scale);

        let font = load_label_font(&config.font_path)?;
        log::info!(
            "Loaded font {} ({}, {} bytes)",
            font.path.display(),
            font.family_name.as_deref().unwrap_or("unnamed"),
            font.byte_len()
        );
        install_label_font(&overlay.ctx, font);

        Ok(Running {
            window,
            gpu,
            overlay,
        })
    }
}

impl Running {
    /// UI build, sync, animation and render for one frame
    fn frame(&mut self, driver: &mut FrameDriver) {
        let dt = driver.begin_frame();

        let mut panel = driver.panel_model();
        let OverlayFrame {
            shapes: mut panel_shapes,
            pixels_per_point,
            textures_free,
        } = self.overlay.run(
            &self.window,
            &self.gpu.device,
            &self.gpu.queue,
            dt,
            |ctx| {
                ui::control_panel(ctx, &mut panel);
                if let Some(label) = driver.visible_label(&panel) {
                    ui::paint_label(ctx, &label);
                }
            },
        );
        driver.finish_frame(&panel, dt);

        let mut clear = Rgb8::new(0, 0, 0);
        let mut vertices = Vec::new();
        let mut overlay_shapes = Vec::new();
        for command in driver.draw_list() {
            match command {
                DrawCommand::Clear(color) => clear = color,
                DrawCommand::Circle(circle) => vertices = shapes::circle(&circle),
                // Already painted on the background layer during the UI pass
                DrawCommand::Text(_) => {}
                DrawCommand::Overlay => overlay_shapes.append(&mut panel_shapes),
                DrawCommand::Present => self.present(
                    clear,
                    &vertices,
                    std::mem::take(&mut overlay_shapes),
                    pixels_per_point,
                ),
            }
        }

        self.overlay.release(&textures_free);
    }

    fn present(
        &mut self,
        clear: Rgb8,
        vertices: &[crate::renderer::Vertex],
        overlay_shapes: Vec<egui::epaint::ClippedShape>,
        pixels_per_point: f32,
    ) {
        let (output, view, mut encoder) = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                return;
            }
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                return;
            }
        };

        self.gpu.draw_scene(&mut encoder, &view, clear, vertices);

        let size = [self.gpu.config.width, self.gpu.config.height];
        let uploads = self.overlay.paint(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &view,
            size,
            overlay_shapes,
            pixels_per_point,
        );

        self.window.pre_present_notify();
        self.gpu.finish_frame(encoder, uploads, output);
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.failure.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(running) => {
                log::info!("Window open");
                self.running = Some(running);
                self.driver.start_clock_at(Instant::now());
            }
            Err(err) => {
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        // The overlay sees every event before the application does; the
        // application still interprets events the overlay claimed
        running.overlay.on_window_event(&running.window, &event);

        match &event {
            WindowEvent::Resized(size) => running.gpu.resize(size.width, size.height),
            WindowEvent::RedrawRequested => running.frame(&mut self.driver),
            _ => self.driver.handle_event(&FrameEvent::from_window_event(&event)),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.driver.keep_running() {
            // Tear down GPU resources before the window goes away
            self.running = None;
            event_loop.exit();
            return;
        }

        let Some(running) = self.running.as_ref() else {
            return;
        };
        match self.pacer.poll(Instant::now()) {
            Pace::Frame => {
                running.window.request_redraw();
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
            }
            Pace::WaitUntil(deadline) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
    }
}
