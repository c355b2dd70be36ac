//! Theme module for the timetable planner
//!
//! Defines the TimetableTheme structure and the block color helpers.

use egui::Color32;

use crate::models::block::CoursePayload;
use crate::models::settings::Settings;

/// Colors used by the table grids and the surrounding window
#[derive(Debug, Clone)]
pub struct TimetableTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,
    pub grid_background: Color32,
    /// Header row and time label column
    pub header_background: Color32,
    pub grid_line: Color32,
    /// Line drawn above each full hour
    pub hour_line: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Outline of the cell a dragged block would land on
    pub drop_target: Color32,
}

impl TimetableTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            grid_background: Color32::from_rgb(255, 255, 255),
            header_background: Color32::from_rgb(237, 242, 247),
            grid_line: Color32::from_rgb(226, 232, 240),
            hour_line: Color32::from_rgb(203, 213, 224),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
            drop_target: Color32::from_rgb(56, 161, 105),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            grid_background: Color32::from_rgb(40, 40, 40),
            header_background: Color32::from_rgb(50, 52, 58),
            grid_line: Color32::from_rgb(58, 58, 58),
            hour_line: Color32::from_rgb(80, 80, 84),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
            drop_target: Color32::from_rgb(104, 211, 145),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        if settings.is_dark_theme() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Fill color for a block: the payload's `color` field when it is a valid
    /// hex color, otherwise a stable pick from the palette by lecture id.
    pub fn block_fill(&self, payload: &CoursePayload) -> Color32 {
        const PALETTE: [Color32; 6] = [
            Color32::from_rgb(254, 235, 200),
            Color32::from_rgb(198, 246, 213),
            Color32::from_rgb(190, 227, 248),
            Color32::from_rgb(233, 216, 253),
            Color32::from_rgb(254, 215, 226),
            Color32::from_rgb(250, 240, 137),
        ];

        if let Some(color) = payload
            .extra
            .get("color")
            .and_then(|value| value.as_str())
            .and_then(|hex| Self::hex_to_color(hex).ok())
        {
            return color;
        }

        let hash = payload
            .lecture_id
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        let color = PALETTE[hash % PALETTE.len()];
        if self.is_dark {
            color.gamma_multiply(0.6)
        } else {
            color
        }
    }

    /// Parse "#RRGGBB" or "RRGGBB"
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(
            TimetableTheme::hex_to_color("#FF8040").unwrap(),
            Color32::from_rgb(255, 128, 64)
        );
        assert!(TimetableTheme::hex_to_color("#FFF").is_err());
        assert!(TimetableTheme::hex_to_color("#GG0000").is_err());
    }

    #[test]
    fn test_block_fill_prefers_payload_color() {
        let theme = TimetableTheme::light();
        let mut payload = CoursePayload::new("CS101", "Compilers");
        payload
            .extra
            .insert("color".to_string(), serde_json::json!("#102030"));
        assert_eq!(theme.block_fill(&payload), Color32::from_rgb(16, 32, 48));
    }

    #[test]
    fn test_block_fill_is_stable_per_lecture() {
        let theme = TimetableTheme::light();
        let a = CoursePayload::new("CS101", "Compilers");
        let b = CoursePayload::new("CS101", "Compilers (lab)");
        assert_eq!(theme.block_fill(&a), theme.block_fill(&b));
    }

    #[test]
    fn test_theme_from_settings() {
        let settings = Settings {
            theme: "Dark".to_string(),
            ..Settings::default()
        };
        assert!(TimetableTheme::from_settings(&settings).is_dark);
        assert!(!TimetableTheme::from_settings(&Settings::default()).is_dark);
    }
}
