use crate::config::RenderConfig;
use crate::surface::{DrawCommand, Shadow};
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Converts recorded canvas commands into a standalone SVG document.
pub fn render_svg(commands: &[DrawCommand], config: &RenderConfig) -> String {
    let width = config.width.max(1.0);
    let height = config.height.max(1.0);
    let mut svg = String::new();
    let mut defs = String::new();
    let mut body = String::new();
    let mut path = String::new();
    let mut shadows: Vec<Shadow> = Vec::new();

    for cmd in commands {
        match cmd {
            DrawCommand::BeginPath => path.clear(),
            DrawCommand::MoveTo { x, y } => {
                let _ = write!(path, "M {x:.2} {y:.2} ");
            }
            DrawCommand::LineTo { x, y } => {
                let _ = write!(path, "L {x:.2} {y:.2} ");
            }
            DrawCommand::QuadraticCurveTo { cpx, cpy, x, y } => {
                let _ = write!(path, "Q {cpx:.2} {cpy:.2} {x:.2} {y:.2} ");
            }
            DrawCommand::ClosePath => path.push('Z'),
            DrawCommand::Fill { color, shadow } => {
                let filter = match shadow {
                    Some(shadow) => {
                        let id = shadow_filter_id(&mut shadows, &mut defs, shadow);
                        format!(" filter=\"url(#{id})\"")
                    }
                    None => String::new(),
                };
                let _ = write!(
                    body,
                    "<path d=\"{}\" fill=\"{}\"{filter}/>",
                    path.trim_end(),
                    escape_xml(color)
                );
            }
            DrawCommand::FillText {
                text,
                x,
                y,
                color,
                font,
            } => {
                let _ = write!(
                    body,
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" xml:space=\"preserve\">{}</text>",
                    escape_xml(&font.family),
                    font.size,
                    escape_xml(&font.weight),
                    escape_xml(color),
                    escape_xml(text)
                );
            }
        }
    }

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&config.background)
    );
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

/// Reuses a filter for identical shadows. Canvas blur is twice the SVG deviation.
fn shadow_filter_id(shadows: &mut Vec<Shadow>, defs: &mut String, shadow: &Shadow) -> String {
    let idx = match shadows.iter().position(|known| known == shadow) {
        Some(idx) => idx,
        None => {
            shadows.push(shadow.clone());
            let idx = shadows.len() - 1;
            let _ = write!(
                defs,
                "<filter id=\"shadow-{idx}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{}\" flood-color=\"{}\"/></filter>",
                shadow.offset_x,
                shadow.offset_y,
                shadow.blur / 2.0,
                escape_xml(&shadow.color)
            );
            idx
        }
    };
    format!("shadow-{idx}")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .ok_or_else(|| anyhow::anyhow!("Invalid output size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleSettings;
    use crate::node::NodeDisplayData;
    use crate::paint::draw_hover;
    use crate::surface::{MonospaceMeasure, RecordingSurface};
    use serde_json::json;

    fn recorded(label: &str) -> Vec<DrawCommand> {
        let node: NodeDisplayData = serde_json::from_value(json!({
            "label": label,
            "nodeType": "Firm",
            "ticker": "ACM",
            "fundamentals": true,
            "sector": "Industrials",
            "ebitda": 500000, "ebitdaChange": 3,
            "marketValue": 2000000, "marketValueChange": -1,
            "x": 20, "y": 40, "size": 6, "color": "#335577"
        }))
        .unwrap();
        let mut surface = RecordingSurface::new(MonospaceMeasure::default());
        draw_hover(&mut surface, &node, &StyleSettings::default());
        surface.into_commands()
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_svg(&recorded("Acme Corp"), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Acme Corp (ACM)"));
        assert!(svg.contains("feDropShadow"));
        assert!(svg.contains("filter=\"url(#shadow-0)\""));
        assert!(svg.contains("fill=\"#228c15\""));
        assert!(svg.contains("fill=\"#335577\" xml:space=\"preserve\">Industrials</text>"));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn escapes_text() {
        let svg = render_svg(&recorded("Smith & <Sons>"), &RenderConfig::default());
        assert!(svg.contains("Smith &amp; &lt;Sons&gt; (ACM)"));
    }

    #[test]
    fn panel_path_uses_quadratic_corners() {
        let svg = render_svg(&recorded("Acme"), &RenderConfig::default());
        assert_eq!(svg.matches(" Q ").count() + svg.matches("\"Q ").count(), 4);
        assert!(svg.contains("Z\""));
    }
}
