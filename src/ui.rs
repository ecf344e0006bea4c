//! Immediate-mode control panel
//!
//! The panel is declared from scratch every frame. It never holds on to scene
//! fields; instead it edits a `PanelModel` read from the scene, and the frame
//! driver assigns the model back once the UI pass is over.

use egui::{Align2, Color32, FontFamily, FontId, LayerId};

use crate::font::LABEL_FONT_FAMILY;
use crate::scene::{Label, RADIUS_RANGE, SEGMENT_RANGE, SceneState, TEXT_CAPACITY};

/// Per-frame working copy of the editable scene parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub draw_circle: bool,
    pub draw_text: bool,
    pub radius: f32,
    pub segments: u32,
    pub color: [f32; 3],
    pub text: String,
    /// "Set Text" was pressed
    pub commit_text: bool,
    /// "Reset Circle" was pressed
    pub reset_position: bool,
}

impl PanelModel {
    pub fn from_scene(scene: &SceneState) -> Self {
        Self {
            draw_circle: scene.draw_circle,
            draw_text: scene.draw_text,
            radius: scene.radius,
            segments: scene.segments,
            color: scene.color,
            text: scene.text_input.as_str().to_string(),
            commit_text: false,
            reset_position: false,
        }
    }
}

/// Declare the control panel for this frame
///
/// Button flags only ever go from false to true here, so running this twice in
/// one frame (egui may do a second pass) keeps a click from the first pass.
pub fn control_panel(ctx: &egui::Context, panel: &mut PanelModel) {
    egui::Window::new("Window title").show(ctx, |ui| {
        ui.label("Window text!");
        ui.horizontal(|ui| {
            ui.checkbox(&mut panel.draw_circle, "Draw Circle");
            ui.checkbox(&mut panel.draw_text, "Draw Text");
        });
        ui.add(egui::Slider::new(&mut panel.radius, RADIUS_RANGE).text("Radius"));
        ui.add(egui::Slider::new(&mut panel.segments, SEGMENT_RANGE).text("Sides"));
        ui.horizontal(|ui| {
            ui.color_edit_button_rgb(&mut panel.color);
            ui.label("Color Circle");
        });
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut panel.text).char_limit(TEXT_CAPACITY));
            ui.label("Text");
        });
        ui.horizontal(|ui| {
            if ui.button("Set Text").clicked() {
                panel.commit_text = true;
            }
            if ui.button("Reset Circle").clicked() {
                panel.reset_position = true;
            }
        });
    });
}

/// Paint the label on the background layer, underneath every panel
///
/// Must be called inside the UI pass so the glyphs it needs are part of that
/// pass's texture upload. Label coordinates are window pixels; egui works in
/// points, so both the position and the glyph size are divided by the UI zoom.
pub fn paint_label(ctx: &egui::Context, label: &Label) {
    let zoom = ctx.zoom_factor();
    let font_id = FontId::new(
        label.char_size / zoom,
        FontFamily::Name(LABEL_FONT_FAMILY.into()),
    );
    let pos = egui::pos2(label.position.x / zoom, label.position.y / zoom);

    ctx.layer_painter(LayerId::background()).text(
        pos,
        Align2::LEFT_TOP,
        &label.text,
        font_id,
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;

    #[test]
    fn test_from_scene_has_no_pending_actions() {
        let scene = SceneState::new(&DemoConfig::default());
        let panel = PanelModel::from_scene(&scene);
        assert!(!panel.commit_text);
        assert!(!panel.reset_position);
        assert_eq!(panel.radius, 50.0);
        assert_eq!(panel.segments, 32);
        assert_eq!(panel.text, "Sample Text");
    }

    #[test]
    fn test_panel_without_input_leaves_model_untouched() {
        let ctx = egui::Context::default();
        let scene = SceneState::new(&DemoConfig::default());
        let mut panel = PanelModel::from_scene(&scene);
        let before = panel.clone();

        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| control_panel(ctx, &mut panel));
        }
        assert_eq!(panel, before);
    }

    #[test]
    fn test_panel_is_rebuilt_from_new_state() {
        let ctx = egui::Context::default();
        let mut scene = SceneState::new(&DemoConfig::default());
        scene.radius = 120.0;
        scene.draw_text = false;

        let mut panel = PanelModel::from_scene(&scene);
        let _ = ctx.run(egui::RawInput::default(), |ctx| control_panel(ctx, &mut panel));
        assert_eq!(panel.radius, 120.0);
        assert!(!panel.draw_text);
    }
}
