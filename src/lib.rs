pub mod config;
pub mod error;
pub mod font;
pub mod format;
pub mod graph;
pub mod layout;
pub mod node;
pub mod paint;
pub mod progress;
pub mod render;
pub mod shapes;
pub mod surface;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, RenderConfig, StyleSettings};
pub use error::Error;
pub use layout::{HoverLayout, compute_hover_layout};
pub use node::{NodeCategory, NodeDisplayData};
pub use paint::{draw_hover, draw_hover_with_theme, paint_hover_layout};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface, Shadow, TextMeasure};
pub use theme::HoverTheme;

#[cfg(feature = "cli")]
pub use cli::run;

use text_metrics::FontMeasure;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub style: StyleSettings,
    pub theme: HoverTheme,
    pub render: RenderConfig,
    /// Estimate text widths instead of loading fonts.
    pub fast_text: bool,
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            style: config.style,
            theme: config.theme,
            render: config.render,
            fast_text: false,
        }
    }
}

/// Paints the hover panel for `node` and returns it as an SVG document.
pub fn render_hover_svg(node: &NodeDisplayData) -> String {
    render_hover_svg_with_options(node, &RenderOptions::default())
}

pub fn render_hover_svg_with_options(node: &NodeDisplayData, options: &RenderOptions) -> String {
    let commands = record_hover(node, options);
    render::render_svg(&commands, &options.render)
}

/// Paints onto a [`RecordingSurface`] and returns what was drawn.
pub fn record_hover(node: &NodeDisplayData, options: &RenderOptions) -> Vec<DrawCommand> {
    let mut surface = RecordingSurface::new(FontMeasure {
        fast: options.fast_text,
    });
    draw_hover_with_theme(&mut surface, node, &options.style, &options.theme);
    surface.into_commands()
}
