use crate::font::FontSpec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Drop shadow applied to fills on a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: String,
}

impl Shadow {
    pub fn none() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            color: "rgba(0, 0, 0, 0)".to_string(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0
    }
}

/// The subset of a 2D canvas context the hover renderer paints through.
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn set_fill_style(&mut self, color: &str);
    fn set_shadow(&mut self, shadow: &Shadow);
    fn set_font(&mut self, font: &str);
    /// Width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn clear_shadow(&mut self) {
        self.set_shadow(&Shadow::none());
    }
}

pub trait TextMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f64;
}

/// Every character advances by `size * factor`.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub factor: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { factor: 0.5 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * self.factor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cpx: f64, cpy: f64, x: f64, y: f64 },
    ClosePath,
    Fill { color: String, shadow: Option<Shadow> },
    FillText { text: String, x: f64, y: f64, color: String, font: FontSpec },
}

/// In-memory surface that records what was painted, with the fill, font and
/// shadow state each paint call saw.
#[derive(Debug, Clone)]
pub struct RecordingSurface<M> {
    measure: M,
    fill_style: String,
    font: FontSpec,
    shadow: Shadow,
    commands: Vec<DrawCommand>,
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            fill_style: "#000000".to_string(),
            font: FontSpec::new("normal", 10.0, "sans-serif"),
            shadow: Shadow::none(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Text runs in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<M: TextMeasure> DrawingSurface for RecordingSurface<M> {
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.commands
            .push(DrawCommand::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        let shadow = self.shadow.is_visible().then(|| self.shadow.clone());
        self.commands.push(DrawCommand::Fill {
            color: self.fill_style.clone(),
            shadow,
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_style = color.to_string();
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.shadow = shadow.clone();
    }

    fn set_font(&mut self, font: &str) {
        // A canvas keeps its previous font when handed an unparsable one.
        match font.parse() {
            Ok(parsed) => self.font = parsed,
            Err(err) => warn!("ignoring font: {err}"),
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.measure.measure(text, &self.font)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            color: self.fill_style.clone(),
            font: self.font.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_state_with_each_paint() {
        let mut surface = RecordingSurface::new(MonospaceMeasure::default());
        surface.set_font("bold 20px Arial");
        surface.set_fill_style("#123456");
        surface.fill_text("hi", 1.0, 2.0);
        surface.set_shadow(&Shadow {
            offset_x: 0.0,
            offset_y: 2.0,
            blur: 8.0,
            color: "#000".to_string(),
        });
        surface.fill();
        surface.clear_shadow();
        surface.fill();

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::FillText {
                text: "hi".to_string(),
                x: 1.0,
                y: 2.0,
                color: "#123456".to_string(),
                font: FontSpec::new("bold", 20.0, "Arial"),
            }
        );
        assert!(matches!(&commands[1], DrawCommand::Fill { shadow: Some(_), .. }));
        assert!(matches!(&commands[2], DrawCommand::Fill { shadow: None, .. }));
    }

    #[test]
    fn measures_in_current_font() {
        let mut surface = RecordingSurface::new(MonospaceMeasure { factor: 0.5 });
        surface.set_font("normal 10px Arial");
        assert_eq!(surface.measure_text("abcd"), 20.0);
        surface.set_font("normal 20px Arial");
        assert_eq!(surface.measure_text("abcd"), 40.0);
        surface.set_font("garbage");
        assert_eq!(surface.measure_text("abcd"), 40.0);
    }
}
