use crate::model::ArcLayer;
use crate::svg::fmt_path;
use archord_core::{ArcCurve, LinearScale, OpacityConfig, Reference, Region, RegionMap, arc_between};
use std::fmt::Write as _;

/// Partitions the visible references by the region containing their target
/// and concatenates each class into one aggregate path.
///
/// References whose geometry is degenerate contribute nothing; the batch
/// completes with whatever subset is drawable.
pub fn batch_arcs(
    scale: &LinearScale,
    baseline_y: f64,
    references: &[&Reference],
    region_map: &RegionMap,
    arc_height_ratio: f64,
) -> Vec<ArcLayer> {
    let mut low = ArcLayer {
        target_region: Region::Low,
        path: String::new(),
        arc_count: 0,
    };
    let mut high = ArcLayer {
        target_region: Region::High,
        path: String::new(),
        arc_count: 0,
    };

    for reference in references {
        let Some(curve) = arc_between(scale, reference.from_position, reference.to_position)
        else {
            continue;
        };
        let layer = match region_map.region_of(reference.to_position) {
            Region::Low => &mut low,
            Region::High => &mut high,
        };
        append_arc_fragment(&mut layer.path, &curve, baseline_y, arc_height_ratio);
        layer.arc_count += 1;
    }

    vec![low, high]
}

/// Appends one `M ... A ...` fragment. Always drawn from the left endpoint to
/// the right one; the sweep flag alone decides the baseline side.
fn append_arc_fragment(path: &mut String, curve: &ArcCurve, baseline_y: f64, arc_height_ratio: f64) {
    let _ = write!(
        path,
        "M{},{}A{},{} 0 0,{} {},{}",
        fmt_path(curve.left_x()),
        fmt_path(baseline_y),
        fmt_path(curve.rx()),
        fmt_path(curve.ry(arc_height_ratio)),
        curve.sweep_flag(),
        fmt_path(curve.right_x()),
        fmt_path(baseline_y),
    );
}

/// Count-derived shared opacity for non-highlighted arcs: a `k / count`
/// falloff clamped on both ends, with a fixed fallback when nothing is drawn.
pub fn base_opacity(reference_count: u64, config: &OpacityConfig) -> f64 {
    if reference_count == 0 {
        return config.zero_count_fallback;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = reference_count as f64;
    (config.falloff_k / count).clamp(config.min_opacity, config.max_opacity)
}
