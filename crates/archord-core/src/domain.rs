use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Integer coordinate on the single linear domain axis.
pub type Position = u32;

/// One of the two disjoint halves of the position axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[serde(alias = "lowRegion")]
    Low,
    #[serde(alias = "highRegion")]
    High,
}

impl Region {
    pub fn opposite(self) -> Self {
        match self {
            Region::Low => Region::High,
            Region::High => Region::Low,
        }
    }
}

/// Classifies positions into regions given the configured split boundary.
///
/// The low region is `[0, split_position]`, the high region is
/// `[high_region_start, domain_size)`, and `high_region_start` is always the
/// successor of `split_position` (enforced at construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionMap {
    split_position: Position,
    high_region_start: Position,
}

impl RegionMap {
    /// Builds the map from the split boundary and its (optional) successor.
    ///
    /// Historically these arrive as two independent dataset constants; when
    /// both are supplied they must agree, otherwise the successor is derived.
    pub fn new(
        domain_size: u32,
        split_position: Position,
        high_region_start: Option<Position>,
    ) -> Result<Self> {
        if domain_size == 0 {
            return Err(Error::InvalidDomainSize { size: domain_size });
        }
        if split_position >= domain_size {
            return Err(Error::SplitOutOfRange {
                split: split_position,
                domain_size,
            });
        }
        let successor = split_position + 1;
        if let Some(high_start) = high_region_start {
            if high_start != successor {
                return Err(Error::RegionBoundaryMismatch {
                    split: split_position,
                    high_start,
                });
            }
        }
        Ok(Self {
            split_position,
            high_region_start: successor,
        })
    }

    pub fn split_position(&self) -> Position {
        self.split_position
    }

    pub fn high_region_start(&self) -> Position {
        self.high_region_start
    }

    pub fn region_of(&self, position: Position) -> Region {
        if position <= self.split_position {
            Region::Low
        } else {
            Region::High
        }
    }
}

/// Classification of a reference by the relative order of its endpoints.
///
/// `Forward` means the target lies later on the axis than the source. The
/// baseline side of an arc and the emitted sweep flag both derive from this
/// value, never from which endpoint happens to be drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Returns `None` when the endpoints coincide: a zero-length chord has no
    /// defined arc and callers are expected to skip it.
    pub fn classify(from: Position, to: Position) -> Option<Self> {
        match to.cmp(&from) {
            Ordering::Greater => Some(Direction::Forward),
            Ordering::Less => Some(Direction::Backward),
            Ordering::Equal => None,
        }
    }
}

/// A named contiguous span of positions (e.g. one book of a corpus), tagged
/// with the region it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(alias = "name")]
    pub display_name: String,
    pub start_position: Position,
    pub verse_count: u32,
    pub region: Region,
}

impl Entity {
    /// Last position inside the span.
    pub fn end_position(&self) -> Position {
        self.start_position + self.verse_count.saturating_sub(1)
    }

    pub fn contains(&self, position: Position) -> bool {
        position >= self.start_position && position <= self.end_position()
    }

    /// Fractional midpoint of the span, used for tick/label placement.
    pub fn mid_position(&self) -> f64 {
        f64::from(self.start_position) + f64::from(self.verse_count.saturating_sub(1)) / 2.0
    }
}

/// A directed connection between two positions in opposite regions.
///
/// Everything beyond the two endpoints is presentation payload carried through
/// untouched; geometry never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub from_position: Position,
    pub to_position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,
}

impl Reference {
    pub fn new(from_position: Position, to_position: Position) -> Self {
        Self {
            from_position,
            to_position,
            from_id: None,
            to_id: None,
            sources: Vec::new(),
            votes: None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::classify(self.from_position, self.to_position)
    }

    /// Both endpoints coincide; such a reference yields no drawable curve.
    pub fn is_degenerate(&self) -> bool {
        self.from_position == self.to_position
    }
}

/// Narrative section tags emitted by the scroll driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    #[default]
    Intro,
    LowRegionFocus,
    HighRegionFocus,
    Timeline,
    TransitionEvent,
}

impl Section {
    /// The region a region-focused section scrolls through, if any.
    pub fn focused_region(self) -> Option<Region> {
        match self {
            Section::LowRegionFocus => Some(Region::Low),
            Section::HighRegionFocus => Some(Region::High),
            Section::Intro | Section::Timeline | Section::TransitionEvent => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Intro => "intro",
            Section::LowRegionFocus => "lowRegionFocus",
            Section::HighRegionFocus => "highRegionFocus",
            Section::Timeline => "timeline",
            Section::TransitionEvent => "transitionEvent",
        }
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "intro" => Ok(Section::Intro),
            "lowRegionFocus" => Ok(Section::LowRegionFocus),
            "highRegionFocus" => Ok(Section::HighRegionFocus),
            "timeline" => Ok(Section::Timeline),
            "transitionEvent" => Ok(Section::TransitionEvent),
            other => Err(Error::UnknownSection {
                name: other.to_string(),
            }),
        }
    }
}

/// Explicit per-entity label state, computed by the highlighter and *applied*
/// to the render surface. The surface is never read back to decide anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelVisibility {
    Hidden,
    Major,
    Active,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_map_enforces_successor_boundary() {
        let map = RegionMap::new(100, 49, Some(50)).expect("consistent boundary");
        assert_eq!(map.high_region_start(), 50);

        let err = RegionMap::new(100, 49, Some(60)).unwrap_err();
        assert!(matches!(
            err,
            Error::RegionBoundaryMismatch {
                split: 49,
                high_start: 60
            }
        ));

        // Supplying only the split derives the successor.
        let derived = RegionMap::new(100, 49, None).expect("derived boundary");
        assert_eq!(derived.high_region_start(), 50);
    }

    #[test]
    fn region_map_rejects_out_of_range_split() {
        assert!(matches!(
            RegionMap::new(100, 100, None).unwrap_err(),
            Error::SplitOutOfRange { .. }
        ));
        assert!(matches!(
            RegionMap::new(0, 0, None).unwrap_err(),
            Error::InvalidDomainSize { .. }
        ));
    }

    #[test]
    fn region_of_splits_at_boundary() {
        let map = RegionMap::new(100, 49, None).unwrap();
        assert_eq!(map.region_of(0), Region::Low);
        assert_eq!(map.region_of(49), Region::Low);
        assert_eq!(map.region_of(50), Region::High);
        assert_eq!(map.region_of(99), Region::High);
    }

    #[test]
    fn direction_is_a_pure_order_predicate() {
        assert_eq!(Direction::classify(10, 20), Some(Direction::Forward));
        assert_eq!(Direction::classify(20, 10), Some(Direction::Backward));
        assert_eq!(Direction::classify(7, 7), None);
    }

    #[test]
    fn entity_span_queries() {
        let e = Entity {
            id: "gen".into(),
            display_name: "Genesis".into(),
            start_position: 10,
            verse_count: 5,
            region: Region::Low,
        };
        assert_eq!(e.end_position(), 14);
        assert!(e.contains(10));
        assert!(e.contains(14));
        assert!(!e.contains(15));
        assert_eq!(e.mid_position(), 12.0);
    }

    #[test]
    fn entity_deserializes_export_field_names() {
        let e: Entity = serde_json::from_str(
            r#"{"id":"psa","name":"Psalms","startPosition":100,"verseCount":2461,"region":"low"}"#,
        )
        .expect("entity json");
        assert_eq!(e.display_name, "Psalms");
        assert_eq!(e.start_position, 100);
        assert_eq!(e.region, Region::Low);
    }

    #[test]
    fn reference_deserializes_with_opaque_payload() {
        let r: Reference = serde_json::from_str(
            r#"{"fromPosition":3,"toPosition":900,"fromId":"a 1:1","toId":"b 2:2","fromBook":"a","sources":["x"],"votes":4}"#,
        )
        .expect("reference json");
        assert_eq!(r.from_position, 3);
        assert_eq!(r.to_position, 900);
        assert_eq!(r.sources, vec!["x".to_string()]);
        assert_eq!(r.votes, Some(4));
        assert_eq!(r.direction(), Some(Direction::Forward));
    }

    #[test]
    fn section_round_trips_through_tags() {
        for s in [
            Section::Intro,
            Section::LowRegionFocus,
            Section::HighRegionFocus,
            Section::Timeline,
            Section::TransitionEvent,
        ] {
            assert_eq!(s.as_str().parse::<Section>().unwrap(), s);
        }
        assert!(matches!(
            "outro".parse::<Section>().unwrap_err(),
            Error::UnknownSection { .. }
        ));
    }
}
