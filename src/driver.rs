//! Frame driver
//!
//! One frame, in order:
//! 1. events (already forwarded to the overlay by the caller) are interpreted
//!    with [`FrameDriver::handle_event`]
//! 2. the panel is declared against [`FrameDriver::panel_model`]
//! 3. [`FrameDriver::finish_frame`] assigns the edits back, syncs the circle
//!    and advances the animation
//! 4. [`FrameDriver::draw_list`] says what to draw, back to front
//!
//! Nothing here touches the GPU or the window, so the whole cycle can be
//! exercised in tests.

use std::time::{Duration, Instant};

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::config::DemoConfig;
use crate::scene::{CircleShape, Label, Rgb8, SceneState};
use crate::ui::PanelModel;

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Close requested; the loop stops at its next check
    Closing,
    Terminated,
}

/// The part of a window event the application cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    Closed,
    KeyPressed(PhysicalKey),
    Other,
}

impl FrameEvent {
    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => FrameEvent::Closed,
            WindowEvent::KeyboardInput { event, .. } => {
                FrameEvent::from_key(event.physical_key, event.state)
            }
            _ => FrameEvent::Other,
        }
    }

    /// Only presses matter; releases are ignored
    pub fn from_key(key: PhysicalKey, state: ElementState) -> Self {
        if state.is_pressed() {
            FrameEvent::KeyPressed(key)
        } else {
            FrameEvent::Other
        }
    }
}

/// One step of the render phase
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb8),
    Circle(CircleShape),
    Text(Label),
    /// The control panel, always after the scene
    Overlay,
    Present,
}

/// Restartable stopwatch measuring time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Time since the previous restart
    pub fn restart_at(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

pub struct FrameDriver {
    config: DemoConfig,
    scene: SceneState,
    state: LoopState,
    clock: FrameClock,
}

impl FrameDriver {
    pub fn new(config: DemoConfig) -> Self {
        let scene = SceneState::new(&config);
        Self {
            config,
            scene,
            state: LoopState::Running,
            clock: FrameClock::new(Instant::now()),
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Interpret one event; unknown events are ignored
    pub fn handle_event(&mut self, event: &FrameEvent) {
        if self.state != LoopState::Running {
            return;
        }

        match event {
            FrameEvent::Closed => {
                log::info!("Close requested");
                self.state = LoopState::Closing;
            }
            FrameEvent::KeyPressed(key) => {
                log::info!("Key pressed with code = {:?}", key);
                if *key == PhysicalKey::Code(self.config.reverse_key) {
                    self.scene.reverse_horizontal();
                }
            }
            FrameEvent::Other => {}
        }
    }

    /// Loop condition, checked before every iteration
    ///
    /// A pending close is turned into `Terminated` here and reported as
    /// "stop".
    pub fn keep_running(&mut self) -> bool {
        match self.state {
            LoopState::Running => true,
            LoopState::Closing | LoopState::Terminated => {
                self.state = LoopState::Terminated;
                false
            }
        }
    }

    /// Restart frame timing, so setup time is not counted as a frame
    pub fn start_clock_at(&mut self, now: Instant) {
        self.clock = FrameClock::new(now);
    }

    /// Start a frame; returns the time the previous one took
    pub fn begin_frame(&mut self) -> Duration {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> Duration {
        self.clock.restart_at(now)
    }

    /// Snapshot of the editable parameters for this frame's panel
    pub fn panel_model(&self) -> PanelModel {
        PanelModel::from_scene(&self.scene)
    }

    /// Parameter sync and animation
    pub fn finish_frame(&mut self, panel: &PanelModel, dt: Duration) {
        self.scene.apply_panel(panel);
        self.scene.sync_shape();
        self.scene.advance(dt);
    }

    /// The label as it will be drawn once `panel` has been applied, if visible
    ///
    /// Lets the label be painted during the UI pass, before the edits are
    /// assigned back.
    pub fn visible_label(&self, panel: &PanelModel) -> Option<Label> {
        let mut next = self.scene.clone();
        next.apply_panel(panel);
        next.draw_text.then_some(next.label)
    }

    /// Back-to-front draw order for the current state
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let [r, g, b] = self.config.clear_color;
        let mut commands = vec![DrawCommand::Clear(Rgb8::new(r, g, b))];
        if self.scene.draw_circle {
            commands.push(DrawCommand::Circle(self.scene.circle.clone()));
        }
        if self.scene.draw_text {
            commands.push(DrawCommand::Text(self.scene.label.clone()));
        }
        commands.push(DrawCommand::Overlay);
        commands.push(DrawCommand::Present);
        commands
    }
}
