use crate::viewport::Viewport;

/// One cell of the background pattern: top and left edges of a square.
///
/// # Returns
/// SVG path commands, e.g. `"M 40 0 L 0 0 L 0 40"`
pub fn grid_cell_commands(spacing: f32) -> String {
    format!("M {} 0 L 0 0 L 0 {}", spacing, spacing)
}

/// Generate SVG path commands for the background grid lines
///
/// The grid follows the viewport so that it appears attached to the canvas
/// while panning and zooming.
///
/// # Arguments
/// * `width` - Canvas width in pixels
/// * `height` - Canvas height in pixels
/// * `viewport` - Current zoom and pan
/// * `spacing` - Grid spacing in canvas units (before zoom)
///
/// # Returns
/// SVG path commands string (e.g., "M 40 0 L 40 600 M 80 0 L 80 600...")
pub fn generate_grid_commands(width: f32, height: f32, viewport: &Viewport, spacing: f32) -> String {
    let effective_spacing = spacing * viewport.scale;

    // Lines closer than this read as a solid fill
    if effective_spacing < 4.0 {
        return String::new();
    }

    let offset_x = viewport.translate_x.rem_euclid(effective_spacing);
    let offset_y = viewport.translate_y.rem_euclid(effective_spacing);

    let columns = ((width - offset_x) / effective_spacing).max(0.0) as usize + 1;
    let rows = ((height - offset_y) / effective_spacing).max(0.0) as usize + 1;
    let mut commands = String::with_capacity((columns + rows) * 24);

    for i in 0..columns {
        let x = offset_x + i as f32 * effective_spacing;
        if !commands.is_empty() {
            commands.push(' ');
        }
        commands.push_str(&format!("M {} 0 L {} {}", x, x, height));
    }

    for i in 0..rows {
        let y = offset_y + i as f32 * effective_spacing;
        commands.push(' ');
        commands.push_str(&format!("M 0 {} L {} {}", y, width, y));
    }

    commands
}
