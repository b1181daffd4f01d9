use crate::domain::{Direction, Position};
use crate::scale::LinearScale;

/// Which side of the baseline an arc bulges toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSide {
    Above,
    Below,
}

/// Geometry of a single reference arc: a horizontal chord on the baseline plus
/// the half-ellipse spanning it.
///
/// Endpoints are normalized into `(left_x, right_x)` order at construction.
/// The baseline side and the sweep flag come from the forward/backward
/// classification alone: the underlying elliptical-arc primitive's sweep
/// convention depends on draw order, so emitters must always draw from
/// `left_x` to `right_x` and take [`ArcCurve::sweep_flag`] as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCurve {
    left_x: f64,
    right_x: f64,
    direction: Direction,
}

impl ArcCurve {
    pub fn left_x(&self) -> f64 {
        self.left_x
    }

    pub fn right_x(&self) -> f64 {
        self.right_x
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Semi-major axis: half the chord length.
    pub fn rx(&self) -> f64 {
        (self.right_x - self.left_x) / 2.0
    }

    /// Semi-minor axis for the given height ratio.
    pub fn ry(&self, arc_height_ratio: f64) -> f64 {
        self.rx() * arc_height_ratio
    }

    /// Forward references bulge above the baseline, backward ones below,
    /// regardless of which endpoint is geometrically left.
    pub fn side(&self) -> ArcSide {
        match self.direction {
            Direction::Forward => ArcSide::Above,
            Direction::Backward => ArcSide::Below,
        }
    }

    /// SVG elliptical-arc sweep flag for a left-to-right draw. With the
    /// screen's y axis pointing down, sweep `1` passes over the top of the
    /// chord and sweep `0` under it.
    pub fn sweep_flag(&self) -> u8 {
        match self.side() {
            ArcSide::Above => 1,
            ArcSide::Below => 0,
        }
    }
}

/// Builds the curve for a directed reference, or `None` when the chord is
/// degenerate (`from == to`), which has no defined arc.
pub fn arc_between(scale: &LinearScale, from: Position, to: Position) -> Option<ArcCurve> {
    let direction = Direction::classify(from, to)?;
    let from_x = scale.map(from);
    let to_x = scale.map(to);
    let (left_x, right_x) = if from_x <= to_x {
        (from_x, to_x)
    } else {
        (to_x, from_x)
    };
    Some(ArcCurve {
        left_x,
        right_x,
        direction,
    })
}
