//! Label font loading
//!
//! The font file is read once at startup and parsed to make sure it is a usable
//! face before egui ever sees it (egui would otherwise panic on the first text
//! layout). The bytes are registered under their own family so only the label
//! uses them; the panel keeps egui's built-in fonts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{FontData, FontDefinitions, FontFamily};

use crate::error::DemoError;

/// egui family name the label is laid out with
pub const LABEL_FONT_FAMILY: &str = "label";

const LABEL_FONT_KEY: &str = "label-font";

/// A font file that has been read and parsed successfully
#[derive(Debug, Clone)]
pub struct LabelFont {
    pub path: PathBuf,
    pub family_name: Option<String>,
    bytes: Vec<u8>,
}

impl LabelFont {
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Read and validate the font at `path`
pub fn load_label_font(path: &Path) -> Result<LabelFont, DemoError> {
    let bytes = std::fs::read(path).map_err(|e| DemoError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let face = ttf_parser::Face::parse(&bytes, 0).map_err(|e| DemoError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let family_name = face
        .names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .and_then(|name| name.to_string());

    Ok(LabelFont {
        path: path.to_path_buf(),
        family_name,
        bytes,
    })
}

/// Register the label font with egui, keeping the default fonts for the panel
pub fn install_label_font(ctx: &egui::Context, font: LabelFont) {
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        LABEL_FONT_KEY.to_owned(),
        Arc::new(FontData::from_owned(font.bytes)),
    );
    fonts.families.insert(
        FontFamily::Name(LABEL_FONT_FAMILY.into()),
        vec![LABEL_FONT_KEY.to_owned()],
    );
    ctx.set_fonts(fonts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use crate::scene::SceneState;
    use crate::ui::{PanelModel, control_panel, paint_label};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("circle-overlay-{}-{}", std::process::id(), name))
    }

    /// A real TrueType file: one of egui's bundled fonts
    fn write_bundled_font(name: &str) -> PathBuf {
        let defaults = FontDefinitions::default();
        let data = defaults
            .font_data
            .values()
            .next()
            .expect("egui ships default fonts");
        let path = temp_path(name);
        std::fs::write(&path, &data.font[..]).unwrap();
        path
    }

    #[test]
    fn test_missing_font_is_font_load_error() {
        let path = temp_path("does-not-exist.ttf");
        let err = load_label_font(&path).unwrap_err();
        assert!(matches!(err, DemoError::FontLoad { path: p, .. } if p == path));
    }

    #[test]
    fn test_garbage_font_is_font_load_error() {
        let path = temp_path("garbage.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = load_label_font(&path).unwrap_err();
        assert!(matches!(err, DemoError::FontLoad { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_valid_font_loads_and_lays_out_label() {
        let path = write_bundled_font("bundled.ttf");
        let font = load_label_font(&path).unwrap();
        assert!(font.byte_len() > 0);
        let _ = std::fs::remove_file(&path);

        let ctx = egui::Context::default();
        install_label_font(&ctx, font);

        let scene = SceneState::new(&DemoConfig::default());
        let mut panel = PanelModel::from_scene(&scene);
        let mut frame = || {
            ctx.run(egui::RawInput::default(), |ctx| {
                control_panel(ctx, &mut panel);
                paint_label(ctx, &scene.label);
            })
        };

        let first = frame();
        assert!(!first.textures_delta.set.is_empty());
        let label_painted = first.shapes.iter().any(|clipped| {
            matches!(&clipped.shape, egui::Shape::Text(text) if text.galley.text() == "Sample Text")
        });
        assert!(label_painted);

        // Every glyph the label needs went up with the frame that drew it
        let second = frame();
        assert!(second.textures_delta.set.is_empty());
    }
}
