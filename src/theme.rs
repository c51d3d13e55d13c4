use crate::surface::Shadow;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_THEME: Lazy<HoverTheme> = Lazy::new(HoverTheme::classic);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverTheme {
    pub text_color: String,
    pub positive_color: String,
    pub negative_color: String,
    pub panel_fill: String,
    pub panel_shadow: Shadow,
    pub corner_radius: f64,
}

impl HoverTheme {
    /// Shared instance of [`HoverTheme::classic`]; initialized once, never mutated.
    pub fn default_theme() -> &'static HoverTheme {
        &DEFAULT_THEME
    }

    pub fn classic() -> Self {
        Self {
            text_color: "#000000".to_string(),
            positive_color: "#228c15".to_string(),
            negative_color: "#8e0d07".to_string(),
            panel_fill: "#fff".to_string(),
            panel_shadow: Shadow {
                offset_x: 0.0,
                offset_y: 2.0,
                blur: 8.0,
                color: "#000".to_string(),
            },
            corner_radius: 5.0,
        }
    }

    /// Colour for a signed percentage change. Zero counts as a decline.
    pub fn delta_color(&self, change: f64) -> &str {
        if change > 0.0 {
            &self.positive_color
        } else {
            &self.negative_color
        }
    }
}

impl Default for HoverTheme {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_nan_deltas_are_negative() {
        let theme = HoverTheme::classic();
        assert_eq!(theme.delta_color(5.0), "#228c15");
        assert_eq!(theme.delta_color(-3.0), "#8e0d07");
        assert_eq!(theme.delta_color(0.0), "#8e0d07");
        assert_eq!(theme.delta_color(f64::NAN), "#8e0d07");
    }

    #[test]
    fn default_theme_is_shared() {
        assert!(std::ptr::eq(
            HoverTheme::default_theme(),
            HoverTheme::default_theme()
        ));
        assert_eq!(HoverTheme::default_theme(), &HoverTheme::classic());
    }
}
