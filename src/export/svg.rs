//! SVG rendering of a canvas, one unit square per cell.

use std::fmt::Write;

use crate::error::Result;

use super::ExportPayload;

/// Render a payload as a standalone SVG document.
///
/// Fill colours are written from the parsed palette, so a swatch that is not
/// a hex colour fails the render instead of reaching the markup.
pub fn render_svg(payload: &ExportPayload) -> Result<String> {
    let fills: Vec<String> = payload.colours()?.into_iter().map(|c| c.to_hex_rgb()).collect();
    let (width, height) = (payload.header.width, payload.header.height);
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" shape-rendering="crispEdges">"#
    );
    for entry in &payload.pixels {
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="1" height="1" fill="{}"/>"#,
            entry.x,
            entry.y,
            fills[entry.slot]
        );
    }
    svg.push_str("</svg>\n");

    Ok(svg)
}
