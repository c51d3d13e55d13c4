use crate::font::FontSpec;
use crate::theme::HoverTheme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label style the graph renderer passes along with each hover event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    pub label_size: f64,
    pub label_font: String,
    pub label_weight: String,
}

impl StyleSettings {
    pub fn font(&self) -> FontSpec {
        FontSpec::new(&self.label_weight, self.label_size, &self.label_font)
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            label_size: 14.0,
            label_font: "Arial".to_string(),
            label_weight: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub style: StyleSettings,
    pub theme: HoverTheme,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    style: Option<StyleOverrides>,
    theme: Option<ThemeOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StyleOverrides {
    label_size: Option<f64>,
    label_font: Option<String>,
    label_weight: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeOverrides {
    text_color: Option<String>,
    positive_color: Option<String>,
    negative_color: Option<String>,
    panel_fill: Option<String>,
    shadow_color: Option<String>,
    shadow_blur: Option<f64>,
    shadow_offset_y: Option<f64>,
    corner_radius: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f64>,
    height: Option<f64>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    Ok(apply_config_file(config, parsed))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(style) = parsed.style {
        if let Some(v) = style.label_size {
            config.style.label_size = v;
        }
        if let Some(v) = style.label_font {
            config.style.label_font = v;
        }
        if let Some(v) = style.label_weight {
            config.style.label_weight = v;
        }
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = theme.positive_color {
            config.theme.positive_color = v;
        }
        if let Some(v) = theme.negative_color {
            config.theme.negative_color = v;
        }
        if let Some(v) = theme.panel_fill {
            config.theme.panel_fill = v;
        }
        if let Some(v) = theme.shadow_color {
            config.theme.panel_shadow.color = v;
        }
        if let Some(v) = theme.shadow_blur {
            config.theme.panel_shadow.blur = v;
        }
        if let Some(v) = theme.shadow_offset_y {
            config.theme.panel_shadow.offset_y = v;
        }
        if let Some(v) = theme.corner_radius {
            config.theme.corner_radius = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    config
}
