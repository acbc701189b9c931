//! Viewer configuration.
//!
//! Every field has a default matching the production site, so hosts only
//! override what differs (`{"svg_base_path": "/maps"}` is a valid config).

use seatmap_core::FillPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory the venue maps are served from; `{venue}.svg` is appended.
    pub svg_base_path: String,
    /// Alpha composited onto section base colors.
    pub fill_alpha: u8,
    /// `fill-opacity` for section colors that cannot be parsed.
    pub unparsed_fill_opacity: f32,
    pub hover_opacity: f32,
    pub hover_brightness: f32,
    /// Tooltip offset from the pointer, in CSS pixels.
    pub tooltip_offset: f64,
    pub tooltip_id: String,
    pub selected_class: String,
    pub fallback_message: String,
    /// Name of the page-wide notification used by the default callback.
    pub event_name: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            svg_base_path: "/static/events/stadiums/svg".to_string(),
            fill_alpha: 0x99,
            unparsed_fill_opacity: 0.6,
            hover_opacity: 0.8,
            hover_brightness: 1.1,
            tooltip_offset: 10.0,
            tooltip_id: "svg-stadium-tooltip".to_string(),
            selected_class: "selected".to_string(),
            fallback_message: "Interactive stadium map not available".to_string(),
            event_name: "stadium-section-filter".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Location of a venue's map. The path depends on the venue key only.
    pub fn svg_url(&self, venue: &str) -> String {
        format!("{}/{venue}.svg", self.svg_base_path.trim_end_matches('/'))
    }

    pub fn fill_policy(&self) -> FillPolicy {
        FillPolicy {
            alpha: self.fill_alpha,
            fallback_opacity: self.unparsed_fill_opacity,
        }
    }

    pub(crate) fn hover_filter(&self) -> String {
        format!("brightness({})", self.hover_brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.svg_url("stadium-a"),
            "/static/events/stadiums/svg/stadium-a.svg"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{"svg_base_path": "/maps/", "fill_alpha": 128}"#)
            .unwrap();
        assert_eq!(config.svg_url("x"), "/maps/x.svg");
        assert_eq!(config.fill_alpha, 128);
        assert_eq!(config.selected_class, "selected");
        assert_eq!(config.hover_filter(), "brightness(1.1)");
    }
}
