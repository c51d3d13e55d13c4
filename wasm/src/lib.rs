use fingraph_hover::{
    DrawingSurface, NodeDisplayData, RenderOptions, Shadow, StyleSettings,
    render_hover_svg_with_options,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Host canvas seen through the renderer's drawing contract.
struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl DrawingSurface for CanvasSurface<'_> {
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.ctx.set_shadow_offset_x(shadow.offset_x);
        self.ctx.set_shadow_offset_y(shadow.offset_y);
        self.ctx.set_shadow_blur(shadow.blur);
        self.ctx.set_shadow_color(&shadow.color);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }
}

/// Hover-node hook for the graph renderer: `(context, data, settings) => void`.
#[wasm_bindgen(js_name = drawHover)]
pub fn draw_hover(
    context: &CanvasRenderingContext2d,
    data: JsValue,
    settings: JsValue,
) -> Result<(), JsValue> {
    let node: NodeDisplayData = serde_wasm_bindgen::from_value(data)?;
    let settings: StyleSettings = serde_wasm_bindgen::from_value(settings)?;
    let mut surface = CanvasSurface { ctx: context };
    fingraph_hover::draw_hover(&mut surface, &node, &settings);
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoverRenderOptions {
    label_size: Option<f64>,
    label_font: Option<String>,
    label_weight: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
}

fn build_render_options(options: HoverRenderOptions) -> RenderOptions {
    let mut render_options = RenderOptions {
        fast_text: true,
        ..RenderOptions::default()
    };
    if let Some(size) = options.label_size {
        render_options.style.label_size = size;
    }
    if let Some(font) = options.label_font {
        render_options.style.label_font = font;
    }
    if let Some(weight) = options.label_weight {
        render_options.style.label_weight = weight;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    render_options
}

fn hover_svg(node_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let node = NodeDisplayData::from_json(node_json).map_err(|error| error.to_string())?;
    let options = match options_json {
        Some(raw) => serde_json::from_str::<HoverRenderOptions>(raw).map_err(|error| error.to_string())?,
        None => HoverRenderOptions::default(),
    };
    Ok(render_hover_svg_with_options(&node, &build_render_options(options)))
}

/// Hover panel as an SVG string, for hosts without a canvas.
#[wasm_bindgen(js_name = renderHoverSvg)]
pub fn render_hover_svg(node_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    hover_svg(node_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
