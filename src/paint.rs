use crate::config::StyleSettings;
use crate::layout::{HoverLayout, compute_hover_layout};
use crate::node::NodeDisplayData;
use crate::shapes::rounded_rect_path;
use crate::surface::DrawingSurface;
use crate::theme::HoverTheme;
use tracing::trace;

/// Paints the hover panel for `node` onto `surface` with the shared default theme.
///
/// This is the hover-node hook: it measures, lays out and paints in one call
/// and leaves nothing behind but the pixels.
pub fn draw_hover<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    node: &NodeDisplayData,
    settings: &StyleSettings,
) {
    draw_hover_with_theme(surface, node, settings, HoverTheme::default_theme());
}

pub fn draw_hover_with_theme<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    node: &NodeDisplayData,
    settings: &StyleSettings,
    theme: &HoverTheme,
) {
    let layout = compute_hover_layout(surface, node, settings, theme);
    trace!(
        label = %node.label,
        x = layout.panel.x,
        y = layout.panel.y,
        width = layout.panel.width,
        height = layout.panel.height,
        lines = layout.lines.len(),
        "hover panel"
    );
    paint_hover_layout(surface, &layout, theme);
}

/// Background first, shadowed; the shadow is cleared before any text is drawn.
pub fn paint_hover_layout<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    layout: &HoverLayout,
    theme: &HoverTheme,
) {
    let panel = &layout.panel;
    surface.set_fill_style(&theme.panel_fill);
    surface.set_shadow(&theme.panel_shadow);
    rounded_rect_path(surface, panel.x, panel.y, panel.width, panel.height, panel.radius);
    surface.fill();
    surface.clear_shadow();

    for line in &layout.lines {
        surface.set_font(&line.font.to_string());
        for run in &line.runs {
            surface.set_fill_style(&run.color);
            surface.fill_text(&run.text, run.x, line.baseline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, MonospaceMeasure, RecordingSurface};
    use serde_json::json;

    fn node(value: serde_json::Value) -> NodeDisplayData {
        serde_json::from_value(value).unwrap()
    }

    fn paint(node: &NodeDisplayData) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new(MonospaceMeasure::default());
        draw_hover(&mut surface, node, &StyleSettings::default());
        surface.into_commands()
    }

    #[test]
    fn exactly_one_shadowed_fill_before_text() {
        let commands = paint(&node(json!({
            "label": "Jane Doe",
            "nodeType": "Person",
            "extraDetails": "Director",
            "x": 0, "y": 0, "size": 4, "color": "#123123"
        })));
        let fills: Vec<usize> = commands
            .iter()
            .enumerate()
            .filter(|(_, cmd)| matches!(cmd, DrawCommand::Fill { .. }))
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(fills.len(), 1);
        let DrawCommand::Fill { color, shadow } = &commands[fills[0]] else {
            unreachable!()
        };
        assert_eq!(color, "#fff");
        assert_eq!(shadow.as_ref().map(|s| s.blur), Some(8.0));
        let first_text = commands
            .iter()
            .position(|cmd| matches!(cmd, DrawCommand::FillText { .. }))
            .unwrap();
        assert!(fills[0] < first_text);
    }

    #[test]
    fn non_firm_paints_label_sub_label_and_category() {
        let commands = paint(&node(json!({
            "label": "Jane Doe",
            "nodeType": "Person",
            "extraDetails": "Director",
            "x": 0, "y": 0, "size": 4, "color": "#123123"
        })));
        let texts: Vec<(&str, &str, f64)> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, color, font, .. } => {
                    Some((text.as_str(), color.as_str(), font.size))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("Jane Doe", "#000000", 14.0),
                ("Director", "#000000", 12.0),
                ("Person", "#123123", 12.0),
            ]
        );
    }

    #[test]
    fn custom_theme_colours_reach_the_surface() {
        let mut theme = HoverTheme::classic();
        theme.text_color = "#222".to_string();
        theme.panel_fill = "#eee".to_string();
        let mut surface = RecordingSurface::new(MonospaceMeasure::default());
        draw_hover_with_theme(
            &mut surface,
            &node(json!({
                "label": "Jane Doe", "nodeType": "Person",
                "x": 0, "y": 0, "size": 4, "color": "#123123"
            })),
            &StyleSettings::default(),
            &theme,
        );
        assert!(surface.commands().iter().any(
            |cmd| matches!(cmd, DrawCommand::Fill { color, .. } if color == "#eee")
        ));
        assert!(surface.commands().iter().any(
            |cmd| matches!(cmd, DrawCommand::FillText { text, color, .. } if text == "Jane Doe" && color == "#222")
        ));
    }
}
