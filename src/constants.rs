// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Named constants consumed by the frame conversions.

/// π.
pub const PI: f64 = std::f64::consts::PI;

/// Seconds in one UT1 day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Ratio of a UT1 day to a sidereal day.
pub const SIDEREAL_DAY_RATIO: f64 = 1.002_737_811_906;

/// Earth sidereal rotation rate in rad/s.
pub const EARTH_ROTATION_RATE: f64 = SIDEREAL_DAY_RATIO * 2.0 * PI / SECONDS_PER_DAY;

/// J2000.0 epoch as a Julian Day (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// J2000.0 epoch as UT1 seconds since 1970-01-01.
pub const J2000_UNIX_SECONDS: f64 = 946_728_000.0;

/// Days in one Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian Day of 1970-01-01T00:00:00, the zero of [`crate::Epoch`].
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Default convergence tolerance of the ECEF → geodetic solver.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration cap of the ECEF → geodetic solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;
