use crate::surface::DrawingSurface;

/// Traces a closed rounded rectangle on `surface` without painting it.
///
/// The path starts just right of the top-left corner and runs clockwise; each
/// corner is a quadratic curve whose control point is the rectangle corner.
/// Radii of half the width or height or more are not clamped.
pub fn rounded_rect_path<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    let right = x + width;
    let bottom = y + height;
    surface.begin_path();
    surface.move_to(x + radius, y);
    surface.line_to(right - radius, y);
    surface.quadratic_curve_to(right, y, right, y + radius);
    surface.line_to(right, bottom - radius);
    surface.quadratic_curve_to(right, bottom, right - radius, bottom);
    surface.line_to(x + radius, bottom);
    surface.quadratic_curve_to(x, bottom, x, bottom - radius);
    surface.line_to(x, y + radius);
    surface.quadratic_curve_to(x, y, x + radius, y);
    surface.close_path();
}
