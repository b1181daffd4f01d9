#![forbid(unsafe_code)]

//! `archord` renders large sets of directed cross-region references along a
//! single linear axis as semicircular arcs over a baseline, and reacts to a
//! scroll-derived event stream by highlighting, dimming and progressively
//! revealing them.
//!
//! # Features
//!
//! - `render`: enable scene layout + SVG output (`archord::render`)

pub use archord_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use archord_render::model::{ArcLayer, EntityMarker, Scene};
    pub use archord_render::svg::{SvgRenderOptions, render_scene_svg};
    pub use archord_render::{ArcDiagram, Error, HighlightState, RenderSurface, Result, Viewport};

    use archord_core::{DiagramConfig, Entity, Reference};

    /// Converts an arbitrary string into a conservative SVG `id` token
    /// suitable for embedding multiple diagrams in the same document.
    ///
    /// The root `<svg id="...">` value namespaces the element; inlining two
    /// SVGs with the same id makes those ids collide. This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `a-` when
    ///   needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "a-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "a-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "a" {
            return "a-untitled".to_string();
        }
        out.to_string()
    }

    /// One-call setup: validated config, loaded dataset, measured viewport.
    ///
    /// The returned diagram is ready for `on_section_enter` / `reveal_to` /
    /// `redraw` events.
    pub fn diagram_for_dataset(
        config: DiagramConfig,
        entities: Vec<Entity>,
        references: Vec<Reference>,
        viewport: Viewport,
    ) -> Result<ArcDiagram> {
        let mut diagram = ArcDiagram::new(config)?;
        diagram.load(entities, references)?;
        diagram.initialize(viewport)?;
        Ok(diagram)
    }

    /// Renders the diagram's current unrestricted frame straight to SVG.
    pub fn render_svg(diagram: &mut ArcDiagram, options: &SvgRenderOptions) -> Result<String> {
        let scene = diagram.redraw()?;
        Ok(render_scene_svg(&scene, options))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_svg_id_normalizes_arbitrary_text() {
            assert_eq!(sanitize_svg_id("  My Diagram! "), "My-Diagram");
            assert_eq!(sanitize_svg_id("42nd"), "a-42nd");
            assert_eq!(sanitize_svg_id("***"), "a-untitled");
            assert_eq!(sanitize_svg_id(""), "a-untitled");
            assert_eq!(sanitize_svg_id("ok_id.1"), "ok_id.1");
        }
    }
}
