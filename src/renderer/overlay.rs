//! egui overlay: input from winit, painting through wgpu
//!
//! The overlay always paints in its own pass after the scene pass, loading
//! what is already in the target, so nothing drawn by the scene can cover it.

use std::time::Duration;

use egui::epaint::ClippedShape;
use winit::event::WindowEvent;
use winit::window::Window;

/// What one UI pass produced, ready to be painted
pub struct OverlayFrame {
    pub shapes: Vec<ClippedShape>,
    pub pixels_per_point: f32,
    /// Textures to release once this frame has been submitted
    pub textures_free: Vec<egui::TextureId>,
}

pub struct Overlay {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        ui_scale: f32,
    ) -> Self {
        let ctx = egui::Context::default();
        ctx.set_zoom_factor(ui_scale);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) {
        let _ = self.state.on_window_event(window, event);
    }

    /// Run one UI pass and upload any texture changes it made
    pub fn run(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dt: Duration,
        build: impl FnMut(&egui::Context),
    ) -> OverlayFrame {
        let mut raw_input = self.state.take_egui_input(window);
        raw_input.predicted_dt = dt.as_secs_f32();

        let output = self.ctx.run(raw_input, build);
        self.state
            .handle_platform_output(window, output.platform_output);

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        OverlayFrame {
            shapes: output.shapes,
            pixels_per_point: output.pixels_per_point,
            textures_free: output.textures_delta.free,
        }
    }

    /// Tessellate and record the overlay pass; returns buffer uploads that
    /// must be submitted before the encoder
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        shapes: Vec<ClippedShape>,
        pixels_per_point: f32,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point,
        };
        let paint_jobs = self.ctx.tessellate(shapes, pixels_per_point);
        let uploads = self
            .renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &paint_jobs, &screen);

        uploads
    }

    pub fn release(&mut self, textures: &[egui::TextureId]) {
        for id in textures {
            self.renderer.free_texture(id);
        }
    }
}
