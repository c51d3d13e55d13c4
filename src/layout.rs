//! Hover panel geometry.
//!
//! Text is measured on the surface that will later be painted, so widths match
//! the host's fonts. Row heights are derived from the label size:
//!
//! * label row: `round(size / 2 + LABEL_LINE_PAD)`
//! * sub-label, category and metric rows: `round(detail / 2 + DETAIL_LINE_PAD)`
//!   where `detail = size - SUB_LABEL_SIZE_DELTA`
//!
//! The panel reserves `METRIC_BLOCK_ROWS` metric rows although only two are
//! drawn; baselines below are fixed offsets from the node anchor and do not
//! follow from the row heights alone.

use crate::config::StyleSettings;
use crate::font::FontSpec;
use crate::format::{format_grouped, format_percent, round_half_up};
use crate::node::{Fundamentals, NodeDisplayData};
use crate::surface::DrawingSurface;
use crate::theme::HoverTheme;
use serde::Serialize;

/// Sub-label, category and metric rows use a font this much smaller than the label.
pub const SUB_LABEL_SIZE_DELTA: f64 = 2.0;
pub const LABEL_LINE_PAD: f64 = 4.0;
pub const DETAIL_LINE_PAD: f64 = 9.0;
/// Gap between the node's edge and the start of the text.
pub const TEXT_GUTTER: f64 = 3.0;
/// Panel top sits this far above the anchor (plus the sub-label row).
pub const PANEL_TOP_INSET: f64 = 14.0;
pub const PANEL_BOTTOM_PAD: f64 = 12.0;
pub const METRIC_BLOCK_ROWS: f64 = 3.0;
/// Sub-label baseline is raised by this much over two thirds of the label size.
pub const SUB_LABEL_RISE: f64 = 4.0;
pub const MARKET_ROW_NUDGE: f64 = 2.0;
/// Category baseline drops this many metric rows below the anchor.
pub const CATEGORY_METRIC_ROWS: f64 = 2.5;
pub const CATEGORY_LINE_NUDGE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

/// Per-row height allocations; absent rows are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowHeights {
    pub label: f64,
    pub sub_label: f64,
    pub category: f64,
    pub metric: f64,
}

impl RowHeights {
    pub fn panel_height(&self) -> f64 {
        self.category
            + self.label
            + METRIC_BLOCK_ROWS * self.metric
            + self.sub_label
            + PANEL_BOTTOM_PAD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Ebitda,
    MarketValue,
}

impl Metric {
    pub fn caption(self) -> &'static str {
        match self {
            Metric::Ebitda => "EBITDA",
            Metric::MarketValue => "Mkt Val",
        }
    }

    fn values(self, fundamentals: &Fundamentals) -> (f64, f64) {
        match self {
            Metric::Ebitda => (fundamentals.ebitda, fundamentals.ebitda_change),
            Metric::MarketValue => (fundamentals.market_value, fundamentals.market_value_change),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Label,
    SubLabel,
    Metric(Metric),
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub kind: LineKind,
    pub font: FontSpec,
    pub baseline: f64,
    pub runs: Vec<TextRun>,
}

impl TextLine {
    fn single(
        kind: LineKind,
        font: &FontSpec,
        text: &str,
        x: f64,
        baseline: f64,
        color: &str,
    ) -> Self {
        Self {
            kind,
            font: font.clone(),
            baseline,
            runs: vec![TextRun {
                text: text.to_string(),
                x,
                color: color.to_string(),
            }],
        }
    }

    /// The runs joined together, as a reader would see the line.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverLayout {
    pub panel: PanelRect,
    pub heights: RowHeights,
    pub text_x: f64,
    /// Lines in paint order.
    pub lines: Vec<TextLine>,
}

impl HoverLayout {
    pub fn line(&self, kind: LineKind) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.kind == kind)
    }
}

pub fn compute_hover_layout<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    node: &NodeDisplayData,
    settings: &StyleSettings,
    theme: &HoverTheme,
) -> HoverLayout {
    let size = settings.label_size;
    let label_font = settings.font();
    let detail_font = label_font.with_size(size - SUB_LABEL_SIZE_DELTA);
    let detail_size = detail_font.size;

    let fundamentals = node.category().fundamentals().copied();
    let label = node.main_label();
    let sub_label = node.sub_label();
    let category_label = node.category_label();

    surface.set_font(&label_font.to_string());
    let label_width = surface.measure_text(&label);
    surface.set_font(&detail_font.to_string());
    let sub_label_width = sub_label.map_or(0.0, |text| surface.measure_text(text));
    let category_width = if category_label.is_empty() {
        0.0
    } else {
        surface.measure_text(category_label)
    };
    let text_width = label_width.max(sub_label_width).max(category_width);

    let detail_row = round_half_up(detail_size / 2.0 + DETAIL_LINE_PAD);
    let heights = RowHeights {
        label: round_half_up(size / 2.0 + LABEL_LINE_PAD),
        sub_label: if sub_label.is_some() { detail_row } else { 0.0 },
        category: detail_row,
        metric: if fundamentals.is_some() { detail_row } else { 0.0 },
    };

    let panel = PanelRect {
        x: round_half_up(node.x),
        y: round_half_up(node.y) - heights.sub_label - PANEL_TOP_INSET,
        width: round_half_up(text_width + size / 2.0 + node.size + TEXT_GUTTER),
        height: heights.panel_height(),
        radius: theme.corner_radius,
    };

    let text_x = node.x + node.size + TEXT_GUTTER;
    let mut lines = Vec::with_capacity(5);
    lines.push(TextLine::single(
        LineKind::Label,
        &label_font,
        &label,
        text_x,
        node.y + size / 3.0,
        &theme.text_color,
    ));

    if let Some(sub_label) = sub_label {
        lines.push(TextLine::single(
            LineKind::SubLabel,
            &detail_font,
            sub_label,
            text_x,
            node.y - (2.0 * size) / 3.0 - SUB_LABEL_RISE,
            &theme.text_color,
        ));
    }

    if let Some(fundamentals) = fundamentals {
        let rows = [
            (Metric::Ebitda, node.y + heights.metric + (2.0 * size) / 3.0),
            (
                Metric::MarketValue,
                node.y + 2.0 * heights.metric + (2.0 * size) / 3.0 + MARKET_ROW_NUDGE,
            ),
        ];
        for (metric, baseline) in rows {
            lines.push(metric_line(
                surface,
                metric,
                &fundamentals,
                &detail_font,
                text_x,
                baseline,
                theme,
            ));
        }
    }

    if !category_label.is_empty() {
        lines.push(TextLine::single(
            LineKind::Category,
            &detail_font,
            category_label,
            text_x,
            node.y
                + CATEGORY_METRIC_ROWS * heights.metric
                + size / 3.0
                + CATEGORY_LINE_NUDGE
                + detail_size,
            &node.color,
        ));
    }

    HoverLayout {
        panel,
        heights,
        text_x,
        lines,
    }
}

/// `"<caption>: <value> ("`, the coloured delta, then `")"`, each run starting
/// where the previous one ended. Expects `font` to be set on the surface.
fn metric_line<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    metric: Metric,
    fundamentals: &Fundamentals,
    font: &FontSpec,
    text_x: f64,
    baseline: f64,
    theme: &HoverTheme,
) -> TextLine {
    let (value, change) = metric.values(fundamentals);
    let prefix = format!("{}: {} (", metric.caption(), format_grouped(value));
    let delta = format_percent(change);

    let delta_x = text_x + surface.measure_text(&prefix);
    let close_x = delta_x + surface.measure_text(&delta);
    TextLine {
        kind: LineKind::Metric(metric),
        font: font.clone(),
        baseline,
        runs: vec![
            TextRun {
                text: prefix,
                x: text_x,
                color: theme.text_color.clone(),
            },
            TextRun {
                text: delta,
                x: delta_x,
                color: theme.delta_color(change).to_string(),
            },
            TextRun {
                text: ")".to_string(),
                x: close_x,
                color: theme.text_color.clone(),
            },
        ],
    }
}
