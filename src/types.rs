//! Core types shared by every module.
//!
//! - [`LatLng`] - a geographic coordinate (degrees)
//! - [`LatLngBounds`] - an axis-aligned coordinate rectangle
//! - [`ZIndex`] - marker stacking order
//! - [`Lerp`] - linear interpolation used by transitions

use std::fmt;

// =============================================================================
// Lerp
// =============================================================================

/// Linear interpolation between two values.
///
/// `t` is the already-eased fraction, 0.0 = `self`, 1.0 = `other`. Both
/// ends are hit exactly.
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t as f32;
        self * (1.0 - t) + other * t
    }
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }
}

// =============================================================================
// LatLng
// =============================================================================

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Bit-exact comparison, used for matching clusters across passes.
    ///
    /// Unlike `==`, this treats `0.0` and `-0.0` as different and a NaN as
    /// equal to itself, which keeps it consistent with [`LatLng::bits`].
    #[inline]
    pub fn same_bits(&self, other: &LatLng) -> bool {
        self.bits() == other.bits()
    }

    /// Raw bit pattern of both components. Hashable.
    #[inline]
    pub fn bits(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng {
            latitude: self.latitude.lerp(&other.latitude, t),
            longitude: self.longitude.lerp(&other.longitude, t),
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

// =============================================================================
// LatLngBounds
// =============================================================================

/// An axis-aligned rectangle of coordinates.
///
/// Bounds whose `west` is greater than `east` wrap across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Create bounds from the south-west and north-east corners.
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Bounds of a single point (zero area).
    pub const fn point(position: LatLng) -> Self {
        Self::new(position, position)
    }

    /// Smallest bounds enclosing every given position.
    ///
    /// Returns `None` for an empty iterator. Never wraps the antimeridian.
    pub fn enclosing<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::point(first);
        for p in iter {
            bounds.south_west.latitude = bounds.south_west.latitude.min(p.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(p.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(p.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(p.longitude);
        }
        Some(bounds)
    }

    /// Inclusive containment test.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let in_lat =
            self.south_west.latitude <= latitude && latitude <= self.north_east.latitude;
        if !in_lat {
            return false;
        }
        let west = self.south_west.longitude;
        let east = self.north_east.longitude;
        if west <= east {
            west <= longitude && longitude <= east
        } else {
            // Wraps the antimeridian
            longitude >= west || longitude <= east
        }
    }

    /// Grow the rectangle by `degrees` on every side.
    pub fn padded(&self, degrees: f64) -> Self {
        Self {
            south_west: LatLng::new(
                self.south_west.latitude - degrees,
                self.south_west.longitude - degrees,
            ),
            north_east: LatLng::new(
                self.north_east.latitude + degrees,
                self.north_east.longitude + degrees,
            ),
        }
    }
}

// =============================================================================
// ZIndex
// =============================================================================

/// Marker stacking order. Higher values draw on top.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ZIndex(pub f32);

impl ZIndex {
    /// Stacking order for markers leaving the map.
    pub const BACKGROUND: ZIndex = ZIndex(0.0);
    /// Stacking order for markers entering the map.
    pub const FOREGROUND: ZIndex = ZIndex(1.0);
}

// =============================================================================
// Tests
// =============================================================================
