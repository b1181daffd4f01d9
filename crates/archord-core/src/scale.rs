use crate::domain::Position;
use crate::error::{Error, Result};

/// Monotonic linear map from the position domain onto a pixel range.
///
/// `map(0) == 0.0` and `map(domain_size) == width`; everything in between is
/// proportional. The scale is a pure value; resize handling simply builds a
/// new one for the new width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_size: u32,
    width: f64,
}

impl LinearScale {
    pub fn new(domain_size: u32, width: f64) -> Result<Self> {
        if domain_size == 0 {
            return Err(Error::InvalidDomainSize { size: domain_size });
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidScaleWidth { width });
        }
        Ok(Self { domain_size, width })
    }

    pub fn domain_size(&self) -> u32 {
        self.domain_size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pixel x for an integer position.
    pub fn map(&self, position: Position) -> f64 {
        self.map_f64(f64::from(position))
    }

    /// Pixel x for a fractional position (entity midpoints fall between
    /// integer coordinates for even span lengths).
    pub fn map_f64(&self, position: f64) -> f64 {
        position / f64::from(self.domain_size) * self.width
    }
}
