//! # Ephemeris Boundary
//!
//! Interface to the foreign celestial-position computation engine.
//!
//! The core never computes positions itself; this module only defines the
//! validated boundary types and the [`Ephemeris`] trait an adapter over the
//! native engine implements. Failures at this boundary (bad data path,
//! out-of-range inputs, uninitialized engine) surface as explicit errors,
//! never silent defaults.
//!
//! # Extension Point
//!
//! This trait is intentionally defined without an in-crate implementation.
//! Adapters wrap the native engine outside the core and hand back validated
//! [`Chart`] values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// INPUT
// =============================================================================

/// House division scheme requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HouseSystem {
    Placidus,
    Koch,
    Equal,
    WholeSign,
}

/// A fully validated chart request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMoment {
    /// Seconds since the Unix epoch, UTC.
    pub timestamp_utc: i64,
    /// Geographic latitude, degrees in `[-90, 90]`.
    pub latitude: f64,
    /// Geographic longitude, degrees in `[-180, 180]`.
    pub longitude: f64,
    /// Requested house division scheme.
    pub house_system: HouseSystem,
}

impl ChartMoment {
    /// Validate coordinates and build a chart request.
    pub fn new(
        timestamp_utc: i64,
        latitude: f64,
        longitude: f64,
        house_system: HouseSystem,
    ) -> Result<Self, EphemerisError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EphemerisError::OutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EphemerisError::OutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            timestamp_utc,
            latitude,
            longitude,
            house_system,
        })
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Celestial bodies the engine reports positions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

/// Position of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude, degrees in `[0, 360)`.
    pub longitude: f64,
    /// Ecliptic latitude, degrees in `[-90, 90]`.
    pub latitude: f64,
    /// Distance from Earth, astronomical units, strictly positive.
    pub distance: f64,
}

impl BodyPosition {
    /// Validate ranges and build a position.
    pub fn new(longitude: f64, latitude: f64, distance: f64) -> Result<Self, EphemerisError> {
        if !(0.0..360.0).contains(&longitude) {
            return Err(EphemerisError::OutOfRange {
                field: "body longitude",
                value: longitude,
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EphemerisError::OutOfRange {
                field: "body latitude",
                value: latitude,
            });
        }
        if distance <= 0.0 {
            return Err(EphemerisError::OutOfRange {
                field: "distance",
                value: distance,
            });
        }
        Ok(Self {
            longitude,
            latitude,
            distance,
        })
    }
}

/// House boundary angles for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Houses {
    /// Ascendant angle, degrees in `[0, 360)`.
    pub ascendant: f64,
    /// Midheaven angle, degrees in `[0, 360)`.
    pub midheaven: f64,
    /// The twelve house-cusp angles, each in `[0, 360)`.
    pub cusps: [f64; 12],
}

impl Houses {
    /// Validate every angle and build the house set.
    pub fn new(ascendant: f64, midheaven: f64, cusps: [f64; 12]) -> Result<Self, EphemerisError> {
        for (field, value) in [("ascendant", ascendant), ("midheaven", midheaven)] {
            if !(0.0..360.0).contains(&value) {
                return Err(EphemerisError::OutOfRange { field, value });
            }
        }
        for &cusp in &cusps {
            if !(0.0..360.0).contains(&cusp) {
                return Err(EphemerisError::OutOfRange {
                    field: "house cusp",
                    value: cusp,
                });
            }
        }
        Ok(Self {
            ascendant,
            midheaven,
            cusps,
        })
    }
}

/// A complete computed chart: per-body positions plus house boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Per-body positions, deterministically ordered.
    pub bodies: BTreeMap<CelestialBody, BodyPosition>,
    /// House boundary angles.
    pub houses: Houses,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Adapter over the native ephemeris computation engine.
pub trait Ephemeris {
    /// Compute a chart for the given moment and location.
    fn chart(&self, moment: &ChartMoment) -> Result<Chart, EphemerisError>;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced at the ephemeris boundary.
#[derive(Debug, Error)]
pub enum EphemerisError {
    /// The engine's data files could not be located.
    #[error("ephemeris data path not usable: {0}")]
    DataPath(String),

    /// An input or computed value fell outside its documented range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// The engine was used before initialization.
    #[error("ephemeris engine not initialized")]
    Uninitialized,

    /// The engine reported a computation failure.
    #[error("ephemeris computation failed: {0}")]
    Computation(String),
}

// =============================================================================
// TESTS
// =============================================================================
