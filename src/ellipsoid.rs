// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference ellipsoids.
//!
//! An ellipsoid is described by its equatorial radius `ae` and first
//! eccentricity squared `ee`.  Lengths come out of the conversions in the
//! same unit as `ae` (metres for every preset here).
//!
//! | Preset | ae (m) | 1/f |
//! |--------|--------|-----|
//! | [`Ellipsoid::WGS84`] | 6 378 137.0 | 298.257 223 563 |
//! | [`Ellipsoid::GRS80`] | 6 378 137.0 | 298.257 222 101 |
//! | [`Ellipsoid::WGS72`] | 6 378 135.0 | 298.26 |

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FrameError, FrameResult};

fn ecc_squared(inv_flattening: f64) -> f64 {
    let f = 1.0 / inv_flattening;
    f * (2.0 - f)
}

/// Equatorial radius and eccentricity squared of a reference ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Ellipsoid {
    ae: f64,
    ee: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Self {
        ae: 6_378_137.0,
        ee: (2.0 - 1.0 / 298.257_223_563) / 298.257_223_563,
    };

    /// Geodetic Reference System 1980.
    pub const GRS80: Self = Self {
        ae: 6_378_137.0,
        ee: (2.0 - 1.0 / 298.257_222_101) / 298.257_222_101,
    };

    /// World Geodetic System 1972.
    pub const WGS72: Self = Self {
        ae: 6_378_135.0,
        ee: (2.0 - 1.0 / 298.26) / 298.26,
    };

    /// Build a custom ellipsoid.
    ///
    /// Fails unless `ae > 0` and `0 <= ee < 1`.
    pub fn new(ae: f64, ee: f64) -> FrameResult<Self> {
        let valid = ae.is_finite() && ae > 0.0 && ee.is_finite() && (0.0..1.0).contains(&ee);
        if !valid {
            return Err(FrameError::InvalidEllipsoid {
                radius: ae,
                ecc_squared: ee,
            });
        }
        Ok(Self { ae, ee })
    }

    /// Build from equatorial radius and inverse flattening.
    pub fn from_inverse_flattening(ae: f64, inv_flattening: f64) -> FrameResult<Self> {
        Self::new(ae, ecc_squared(inv_flattening))
    }

    /// Equatorial radius.
    #[inline]
    pub const fn equatorial_radius(&self) -> f64 {
        self.ae
    }

    /// First eccentricity squared.
    #[inline]
    pub const fn ecc_squared(&self) -> f64 {
        self.ee
    }

    #[inline]
    pub fn flattening(&self) -> f64 {
        1.0 - (1.0 - self.ee).sqrt()
    }

    /// Semi-minor (polar) radius.
    #[inline]
    pub fn polar_radius(&self) -> f64 {
        self.ae * (1.0 - self.ee).sqrt()
    }

    /// Prime-vertical radius of curvature `N = ae / sqrt(1 − ee·sin²φ)`.
    #[inline]
    pub fn prime_vertical_radius(&self, sin_lat: f64) -> f64 {
        self.ae / (1.0 - self.ee * sin_lat * sin_lat).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Ellipsoid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            ae: f64,
            ee: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.ae, raw.ee).map_err(serde::de::Error::custom)
    }
}
