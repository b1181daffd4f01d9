use archord_core::{DiagramConfig, Entity, LabelVisibility, Reference, Region, Section};
use archord_render::{ArcDiagram, Viewport};

fn entities() -> Vec<Entity> {
    [
        ("gen", 0u32, 50u32, Region::Low),
        ("psa", 50, 50, Region::Low),
        ("mat", 100, 50, Region::High),
        ("rev", 150, 50, Region::High),
    ]
    .into_iter()
    .map(|(id, start, count, region)| Entity {
        id: id.into(),
        display_name: id.to_ascii_uppercase(),
        start_position: start,
        verse_count: count,
        region,
    })
    .collect()
}

fn diagram() -> ArcDiagram {
    let mut d = ArcDiagram::new(DiagramConfig::new(200, 99)).expect("config valid");
    d.load(
        entities(),
        vec![
            Reference::new(5, 120),
            Reference::new(10, 160),
            Reference::new(60, 110),
            Reference::new(110, 20),
        ],
    )
    .expect("load ok");
    d.initialize(Viewport::new(400.0, 200.0)).expect("init ok");
    d.set_major_entities(["gen", "mat"].into_iter().map(String::from));
    d
}

#[test]
fn focus_builds_a_dimmed_base_and_an_overlay() {
    let mut d = diagram();
    let scene = d
        .on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();

    assert_eq!(scene.active_entity_id.as_deref(), Some("gen"));
    assert!(scene.dimmed);
    // gen owns the references sourced at 5 and 10.
    assert_eq!(scene.overlay_arc_count(), 2);
    // The base layer still draws everything.
    assert_eq!(scene.base_arc_count(), 4);
    assert_eq!(d.active_entity_id(), Some("gen"));
}

#[test]
fn repeated_focus_on_the_same_entity_is_idempotent() {
    let mut d = diagram();
    let first = d
        .on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    let second = d
        .on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(second.overlay_layers.len(), first.overlay_layers.len());
}

#[test]
fn refocusing_replaces_the_previous_overlay() {
    let mut d = diagram();
    d.on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    let scene = d
        .on_section_enter(Section::LowRegionFocus, Some("psa"))
        .unwrap();

    assert_eq!(scene.active_entity_id.as_deref(), Some("psa"));
    // Only psa's single outgoing reference remains emphasized; gen's two are
    // gone rather than accumulated.
    assert_eq!(scene.overlay_arc_count(), 1);
}

#[test]
fn section_reset_round_trips_to_the_unhighlighted_render() {
    let mut d = diagram();
    let original = d.on_section_enter(Section::Intro, None).unwrap();
    d.on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    let restored = d.on_section_enter(Section::Intro, None).unwrap();

    assert_eq!(original, restored);
    assert!(!restored.dimmed);
    assert!(restored.overlay_layers.is_empty());
    assert_eq!(d.active_entity_id(), None);
}

#[test]
fn unknown_entity_focus_is_a_no_op() {
    let mut d = diagram();
    d.on_section_enter(Section::LowRegionFocus, Some("gen"))
        .unwrap();
    let scene = d
        .on_section_enter(Section::LowRegionFocus, Some("no-such-entity"))
        .unwrap();

    // State untouched, rendering continued unaffected.
    assert_eq!(d.active_entity_id(), Some("gen"));
    assert_eq!(scene.active_entity_id.as_deref(), Some("gen"));
    assert!(scene.dimmed);
}

#[test]
fn label_visibility_follows_the_section_policy() {
    let mut d = diagram();

    // Intro: major subset visible in both regions at partial opacity.
    let intro = d.on_section_enter(Section::Intro, None).unwrap();
    let vis = |scene: &archord_render::model::Scene, id: &str| {
        scene
            .markers
            .iter()
            .find(|m| m.entity_id == id)
            .map(|m| (m.visibility, m.opacity))
            .unwrap()
    };
    let major_opacity = d.config().label.major_opacity;
    assert_eq!(vis(&intro, "gen"), (LabelVisibility::Major, major_opacity));
    assert_eq!(vis(&intro, "mat"), (LabelVisibility::Major, major_opacity));
    assert_eq!(vis(&intro, "psa"), (LabelVisibility::Hidden, 0.0));

    // Low-region focus on psa: focused region shows only psa (full opacity),
    // the other region keeps its major subset.
    let focused = d
        .on_section_enter(Section::LowRegionFocus, Some("psa"))
        .unwrap();
    assert_eq!(vis(&focused, "psa"), (LabelVisibility::Active, 1.0));
    assert_eq!(vis(&focused, "gen"), (LabelVisibility::Hidden, 0.0));
    assert_eq!(vis(&focused, "mat"), (LabelVisibility::Major, major_opacity));
    assert_eq!(vis(&focused, "rev"), (LabelVisibility::Hidden, 0.0));

    // A non-focus section keeps the major-only policy even while an entity
    // stays highlighted.
    let timeline = d
        .on_section_enter(Section::Timeline, Some("psa"))
        .unwrap();
    assert!(timeline.dimmed);
    assert_eq!(vis(&timeline, "psa"), (LabelVisibility::Hidden, 0.0));
    assert_eq!(vis(&timeline, "gen"), (LabelVisibility::Major, major_opacity));
}
