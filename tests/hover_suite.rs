use fingraph_hover::layout::{LineKind, Metric};
use fingraph_hover::surface::MonospaceMeasure;
use fingraph_hover::{
    DrawCommand, HoverTheme, NodeDisplayData, RecordingSurface, StyleSettings, compute_hover_layout,
    draw_hover,
};
use serde_json::{Value, json};

const GREEN: &str = "#228c15";
const RED: &str = "#8e0d07";
const BLACK: &str = "#000000";

fn acme() -> Value {
    json!({
        "label": "Acme Corp",
        "nodeType": "Firm",
        "ticker": "ACM",
        "fundamentals": true,
        "extraDetails": "unknown",
        "sector": "Industrials",
        "ebitda": 500000,
        "ebitdaChange": 3,
        "marketValue": 2000000,
        "marketValueChange": -1,
        "x": 120.0,
        "y": 80.0,
        "size": 8.0,
        "color": "#335577"
    })
}

fn node_with(overrides: Value) -> NodeDisplayData {
    let mut base = acme();
    if let (Value::Object(base), Value::Object(extra)) = (&mut base, overrides) {
        base.extend(extra);
    }
    serde_json::from_value(base).expect("node fixture")
}

/// (text, colour) of each painted run.
fn painted(node: &NodeDisplayData) -> Vec<(String, String)> {
    let mut surface = RecordingSurface::new(MonospaceMeasure::default());
    draw_hover(&mut surface, node, &StyleSettings::default());
    surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::FillText { text, color, .. } => Some((text.clone(), color.clone())),
            _ => None,
        })
        .collect()
}

fn run(text: &str, color: &str) -> (String, String) {
    (text.to_string(), color.to_string())
}

#[test]
fn acme_end_to_end() {
    let node = node_with(json!({}));
    assert_eq!(
        painted(&node),
        vec![
            run("Acme Corp (ACM)", BLACK),
            run("EBITDA: 500,000 (", BLACK),
            run("3%", GREEN),
            run(")", BLACK),
            run("Mkt Val: 2,000,000 (", BLACK),
            run("-1%", RED),
            run(")", BLACK),
            run("Industrials", "#335577"),
        ]
    );
}

#[test]
fn no_fundamentals_no_financial_text() {
    for flag in [json!(false), Value::Null] {
        let node = node_with(json!({ "fundamentals": flag }));
        let texts = painted(&node);
        assert!(texts.iter().all(|(text, _)| !text.contains("EBITDA") && !text.contains("Mkt Val")));
        assert_eq!(texts[0].0, "Acme Corp");

        let layout = compute_hover_layout(
            &mut RecordingSurface::new(MonospaceMeasure::default()),
            &node,
            &StyleSettings::default(),
            HoverTheme::default_theme(),
        );
        assert_eq!(layout.heights.metric, 0.0);
    }
}

#[test]
fn sub_label_is_verbatim_unless_unknown() {
    let node = node_with(json!({ "extraDetails": "Listed on NYSE" }));
    let texts = painted(&node);
    assert_eq!(texts[1], run("Listed on NYSE", BLACK));

    let node = node_with(json!({ "extraDetails": "unknown" }));
    assert!(painted(&node).iter().all(|(text, _)| text != "unknown"));
}

#[test]
fn delta_boundaries() {
    let cases = [(5.0, GREEN), (-3.0, RED), (0.0, RED), (-0.4, RED), (0.4, GREEN)];
    for (change, colour) in cases {
        let node = node_with(json!({ "ebitdaChange": change }));
        let texts = painted(&node);
        assert_eq!(texts[2].1, colour, "ebitdaChange = {change}");
    }
}

#[test]
fn empty_ticker_is_still_appended() {
    let node = node_with(json!({ "ticker": "" }));
    assert_eq!(painted(&node)[0], run("Acme Corp ()", BLACK));
}

#[test]
fn number_formatting() {
    let node = node_with(json!({ "ebitda": 1234567.6, "marketValueChange": -12.4 }));
    let texts = painted(&node);
    assert_eq!(texts[1].0, "EBITDA: 1,234,568 (");
    assert_eq!(texts[5].0, "-12%");
}

#[test]
fn non_firm_category_uses_node_type_and_colour() {
    let node = node_with(json!({ "nodeType": "Individual", "color": "#ff8800" }));
    let texts = painted(&node);
    assert_eq!(texts.first().unwrap(), &run("Acme Corp", BLACK));
    assert_eq!(texts.last().unwrap(), &run("Individual", "#ff8800"));
    assert_eq!(texts.len(), 2);
}

#[test]
fn panel_width_covers_widest_line() {
    let settings = StyleSettings::default();
    for details in ["x", "A considerably longer description than anything else here"] {
        let node = node_with(json!({ "extraDetails": details }));
        let layout = compute_hover_layout(
            &mut RecordingSurface::new(MonospaceMeasure::default()),
            &node,
            &settings,
            HoverTheme::default_theme(),
        );
        let widest = [LineKind::Label, LineKind::SubLabel, LineKind::Category]
            .into_iter()
            .filter_map(|kind| layout.line(kind))
            .map(|line| line.text().chars().count() as f64 * line.font.size * 0.5)
            .fold(0.0, f64::max);
        let margin = settings.label_size / 2.0 + node.size + 3.0;
        assert_eq!(layout.panel.width, (widest + margin).round());
        assert!(layout.line(LineKind::Metric(Metric::Ebitda)).is_some());
    }
}

#[test]
fn shadow_never_reaches_text() {
    let mut surface = RecordingSurface::new(MonospaceMeasure::default());
    draw_hover(&mut surface, &node_with(json!({})), &StyleSettings::default());
    let svg = fingraph_hover::render::render_svg(surface.commands(), &Default::default());
    assert_eq!(svg.matches("filter=").count(), 1);
    assert!(svg.contains("<path d=\"M 125.00 66.00"));
}
