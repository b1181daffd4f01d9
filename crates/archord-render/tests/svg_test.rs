use archord_core::{DiagramConfig, Entity, Reference, Region, Section};
use archord_render::svg::{SvgRenderOptions, render_scene_svg};
use archord_render::{ArcDiagram, Viewport};

fn diagram() -> ArcDiagram {
    let entities = vec![
        Entity {
            id: "gen".into(),
            display_name: "Genesis".into(),
            start_position: 0,
            verse_count: 100,
            region: Region::Low,
        },
        Entity {
            id: "sos".into(),
            display_name: "Song of <Songs> & Co".into(),
            start_position: 100,
            verse_count: 100,
            region: Region::High,
        },
    ];
    let mut d = ArcDiagram::new(DiagramConfig::new(200, 99)).unwrap();
    d.load(
        entities,
        vec![Reference::new(10, 150), Reference::new(150, 10)],
    )
    .unwrap();
    d.initialize(Viewport::new(400.0, 200.0)).unwrap();
    d.set_major_entities(["gen", "sos"].into_iter().map(String::from));
    d
}

#[test]
fn emits_one_path_per_target_class() {
    let mut d = diagram();
    let scene = d.redraw().unwrap();
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<path class=\"arc target-low\"").count(), 1);
    assert_eq!(svg.matches("<path class=\"arc target-high\"").count(), 1);
    assert!(svg.contains("stroke-opacity"));
    assert!(svg.contains("<line class=\"baseline\""));
    assert!(svg.contains("<line class=\"region-divider\""));
    assert_eq!(svg.matches("<g class=\"entity-marker\"").count(), 2);
    assert!(!svg.contains("dimmed"));
}

#[test]
fn labels_are_xml_escaped() {
    let mut d = diagram();
    let scene = d.redraw().unwrap();
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());
    assert!(svg.contains("Song of &lt;Songs&gt; &amp; Co"));
    assert!(!svg.contains("Song of <Songs>"));
}

#[test]
fn highlighted_scene_adds_overlay_and_dims_base() {
    let mut d = diagram();
    let scene = d
        .on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());
    assert!(svg.contains("<g class=\"base-arcs dimmed\""));
    assert!(svg.contains("<g class=\"overlay-arcs\""));
}

#[test]
fn options_toggle_optional_groups_and_id() {
    let mut d = diagram();
    let scene = d.redraw().unwrap();
    let svg = render_scene_svg(
        &scene,
        &SvgRenderOptions {
            diagram_id: Some("corpus \"one\"".into()),
            include_markers: false,
            include_divider: false,
            ..SvgRenderOptions::default()
        },
    );
    assert!(svg.contains("id=\"corpus &quot;one&quot;\""));
    assert!(!svg.contains("entity-marker"));
    assert!(!svg.contains("region-divider"));
}

#[test]
fn viewbox_padding_expands_the_canvas() {
    let mut d = diagram();
    let scene = d.redraw().unwrap();
    let svg = render_scene_svg(
        &scene,
        &SvgRenderOptions {
            viewbox_padding: 8.0,
            ..SvgRenderOptions::default()
        },
    );
    assert!(svg.contains("viewBox=\"-8 -8 416 216\""));
}

#[test]
fn degenerate_only_layers_emit_no_path_elements() {
    let mut d = ArcDiagram::new(DiagramConfig::new(200, 99)).unwrap();
    d.load(
        vec![Entity {
            id: "gen".into(),
            display_name: "Genesis".into(),
            start_position: 0,
            verse_count: 200,
            region: Region::Low,
        }],
        vec![Reference::new(42, 42)],
    )
    .unwrap();
    d.initialize(Viewport::new(400.0, 200.0)).unwrap();
    let scene = d.redraw().unwrap();
    let svg = render_scene_svg(&scene, &SvgRenderOptions::default());
    assert!(!svg.contains("<path"));
}
