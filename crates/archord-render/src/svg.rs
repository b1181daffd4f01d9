use crate::model::{ArcLayer, EntityMarker, Scene};
use archord_core::Region;
use std::fmt::Write as _;

/// Options for the SVG writer.
#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Optional root id, for documents embedding several diagrams.
    pub diagram_id: Option<String>,
    /// When false, entity ticks and labels are omitted.
    pub include_markers: bool,
    /// When false, the vertical region divider is omitted.
    pub include_divider: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 0.0,
            diagram_id: None,
            include_markers: true,
            include_divider: true,
        }
    }
}

/// Writes a scene as a standalone SVG document.
///
/// Styling is class-based (`target-low` / `target-high`, `dimmed`,
/// `entity-label` ...) so the embedding page's stylesheet stays in charge of
/// colors; the only inline style parameters are geometry and the shared
/// base-layer opacity.
pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let pad = options.viewbox_padding.max(0.0);
    let mut out = String::new();

    out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
    if let Some(id) = &options.diagram_id {
        let _ = write!(out, " id=\"{}\"", escape_xml(id));
    }
    let _ = write!(
        out,
        " class=\"archord\" role=\"img\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
        fmt(scene.width),
        fmt(scene.height),
        fmt(-pad),
        fmt(-pad),
        fmt(scene.width + pad * 2.0),
        fmt(scene.height + pad * 2.0),
    );

    out.push_str("<g class=\"axis\">");
    let _ = write!(
        out,
        "<line class=\"baseline\" x1=\"0\" y1=\"{y}\" x2=\"{w}\" y2=\"{y}\"/>",
        y = fmt(scene.baseline_y),
        w = fmt(scene.width),
    );
    if options.include_divider {
        let _ = write!(
            out,
            "<line class=\"region-divider\" x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{h}\"/>",
            x = fmt(scene.divider_x),
            h = fmt(scene.height),
        );
    }
    out.push_str("</g>");

    let base_class = if scene.dimmed {
        "base-arcs dimmed"
    } else {
        "base-arcs"
    };
    let _ = write!(
        out,
        "<g class=\"{}\" fill=\"none\" stroke-opacity=\"{}\">",
        base_class,
        fmt(scene.base_opacity),
    );
    for layer in &scene.base_layers {
        write_arc_layer(&mut out, layer);
    }
    out.push_str("</g>");

    if !scene.overlay_layers.is_empty() {
        out.push_str("<g class=\"overlay-arcs\" fill=\"none\">");
        for layer in &scene.overlay_layers {
            write_arc_layer(&mut out, layer);
        }
        out.push_str("</g>");
    }

    if options.include_markers {
        out.push_str("<g class=\"entity-markers\">");
        for marker in &scene.markers {
            write_entity_marker(&mut out, marker);
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

fn write_arc_layer(out: &mut String, layer: &ArcLayer) {
    if layer.path.is_empty() {
        return;
    }
    let class = match layer.target_region {
        Region::Low => "arc target-low",
        Region::High => "arc target-high",
    };
    let _ = write!(out, "<path class=\"{}\" d=\"{}\"/>", class, layer.path);
}

fn write_entity_marker(out: &mut String, marker: &EntityMarker) {
    let _ = write!(
        out,
        "<g class=\"entity-marker\" data-entity-id=\"{}\">",
        escape_xml(&marker.entity_id)
    );
    let _ = write!(
        out,
        "<line class=\"entity-tick\" x1=\"{x}\" y1=\"{y0}\" x2=\"{x}\" y2=\"{y1}\"/>",
        x = fmt(marker.x),
        y0 = fmt(marker.tick_y0),
        y1 = fmt(marker.tick_y1),
    );
    let _ = write!(
        out,
        "<text class=\"entity-label\" transform=\"translate({},{}) rotate({})\" opacity=\"{}\">{}</text>",
        fmt(marker.x),
        fmt(marker.label_y),
        fmt(marker.rotation_deg),
        fmt(marker.opacity),
        escape_xml(&marker.label),
    );
    out.push_str("</g>");
}

/// Stringifies an attribute value the way JS `Number#toString()` would,
/// avoiding `-0` and float noise from our own arithmetic.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

/// Path-data numbers keep 3 fractional digits, matching how `d3-path`
/// stringifies commands (`Math.round(x * 1000) / 1000`, ties half-up).
pub(crate) fn fmt_path(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }

    let scaled = v * 1000.0;
    let mut r = (scaled + 0.5).floor() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }

    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
