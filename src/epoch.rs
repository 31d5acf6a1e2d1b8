// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observation instants.
//!
//! An [`Epoch`] stores a [`Seconds`] quantity counted on the **UT1** axis
//! from 1970-01-01T00:00:00.  The true-of-date inertial frame is only
//! meaningful together with the instant it was observed at, so every
//! ECEF ↔ ECI conversion and every interpolation takes one of these.
//!
//! UTC timestamps are accepted as UT1 directly (|UT1 − UTC| < 0.9 s),
//! which is well inside the accuracy of the 1982 sidereal-time model used
//! by default.

use chrono::{DateTime, Utc};
use qtty::{Day, Days, Seconds};
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{DAYS_PER_JULIAN_CENTURY, J2000_UNIX_SECONDS, SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// A point on the UT1 time axis, in seconds since 1970-01-01T00:00:00.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Epoch {
    seconds: Seconds,
}

impl Epoch {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw number of UT1 seconds since 1970-01-01.
    #[inline]
    pub const fn new(seconds: f64) -> Self {
        Self {
            seconds: Seconds::new(seconds),
        }
    }

    /// Create from a [`Seconds`] quantity.
    #[inline]
    pub const fn from_seconds(seconds: Seconds) -> Self {
        Self { seconds }
    }

    /// Build an epoch from an absolute Julian Day (UT1).
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_seconds((jd - Days::new(UNIX_EPOCH_JD)).to::<qtty::Second>())
    }

    /// Build an epoch from a `chrono::DateTime<Utc>`, read as UT1.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let whole = datetime.timestamp() as f64;
        let nanos = datetime.timestamp_subsec_nanos() as f64 / 1e9;
        Self::new(whole + nanos)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in seconds.
    #[inline]
    pub const fn seconds(&self) -> Seconds {
        self.seconds
    }

    /// The underlying scalar value in seconds.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.seconds.value()
    }

    /// Absolute Julian Day (UT1) of this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        Days::new(UNIX_EPOCH_JD) + self.seconds.to::<Day>()
    }

    /// Julian centuries of UT1 elapsed since J2000.0.
    ///
    /// Counted from the seconds value rather than [`Epoch::julian_day`]; an
    /// absolute Julian Day in `f64` only resolves ~40 µs.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        (self.value() - J2000_UNIX_SECONDS) / (SECONDS_PER_DAY * DAYS_PER_JULIAN_CENTURY)
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = self.value();
        if !seconds.is_finite() {
            return None;
        }
        let secs = seconds.floor() as i64;
        let nanos = ((seconds - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UT1 {}", self.seconds)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Epoch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Epoch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for Epoch {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.seconds + rhs)
    }
}

impl AddAssign<Seconds> for Epoch {
    #[inline]
    fn add_assign(&mut self, rhs: Seconds) {
        self.seconds = self.seconds + rhs;
    }
}

impl Sub<Seconds> for Epoch {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.seconds - rhs)
    }
}

impl SubAssign<Seconds> for Epoch {
    #[inline]
    fn sub_assign(&mut self, rhs: Seconds) {
        self.seconds = self.seconds - rhs;
    }
}

impl Sub for Epoch {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.seconds - rhs.seconds
    }
}

impl From<Seconds> for Epoch {
    #[inline]
    fn from(seconds: Seconds) -> Self {
        Self::from_seconds(seconds)
    }
}

impl From<DateTime<Utc>> for Epoch {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000_JD;

    #[test]
    fn zero_is_unix_epoch() {
        let epoch = Epoch::new(0.0);
        assert_eq!(epoch.julian_day(), Days::new(UNIX_EPOCH_JD));
        let utc = epoch.to_utc().expect("to_utc");
        assert_eq!(utc.timestamp(), 0);
    }

    #[test]
    fn j2000_julian_centuries_is_zero() {
        // 2000-01-01 12:00:00 → JD 2451545.0
        let epoch = Epoch::new(946_728_000.0);
        assert!((epoch.julian_day().value() - J2000_JD).abs() < 1e-9);
        assert!(epoch.julian_centuries().abs() < 1e-12);
    }

    #[test]
    fn utc_roundtrip_keeps_subsecond_precision() {
        let datetime = DateTime::from_timestamp(1_700_000_000, 250_000_000).unwrap();
        let epoch = Epoch::from_utc(datetime);
        assert!((epoch.value() - 1_700_000_000.25).abs() < 1e-6);
        let back = epoch.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 1_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn julian_day_roundtrip() {
        let epoch = Epoch::from_julian_day(Days::new(J2000_JD));
        assert!((epoch.value() - 946_728_000.0).abs() < 1e-3);
    }

    #[test]
    fn arithmetic_with_seconds() {
        let mut epoch = Epoch::new(100.0);
        epoch += Seconds::new(20.0);
        assert_eq!(epoch.value(), 120.0);
        epoch -= Seconds::new(50.0);
        assert_eq!(epoch.value(), 70.0);
        let later = epoch + Seconds::new(30.0);
        assert_eq!((later - epoch).value(), 30.0);
        assert_eq!((later - Seconds::new(30.0)), epoch);
    }

    #[test]
    fn non_finite_epoch_has_no_utc() {
        assert!(Epoch::new(f64::NAN).to_utc().is_none());
    }
}
