// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Greenwich Mean Sidereal Time.
//!
//! The ECEF ↔ true-of-date rotation only needs one thing from the outside
//! world: the sidereal time at the observation instant.  That query is the
//! [`SiderealTime`] trait.  [`Gmst1982`] is the default source; any closure
//! `Fn(Epoch) -> Seconds` can stand in for it (e.g. one backed by IERS data).
//!
//! Sources:
//! - GMST polynomial: Aoki et al. 1982, as given in AIAA 2006-6753.

use qtty::Seconds;

use crate::constants::SECONDS_PER_DAY;
use crate::epoch::Epoch;

/// Source of Greenwich mean sidereal time.
pub trait SiderealTime {
    /// GMST at `epoch`, as seconds of sidereal time into the sidereal day.
    fn gmst(&self, epoch: Epoch) -> Seconds;
}

impl<F> SiderealTime for F
where
    F: Fn(Epoch) -> Seconds,
{
    #[inline]
    fn gmst(&self, epoch: Epoch) -> Seconds {
        self(epoch)
    }
}

/// IAU 1982 GMST model.
///
/// GMST = 67310.54841 + (876600 h + 8640184.812866) T + 0.093104 T² − 6.2e-6 T³
///
/// where T is Julian centuries of UT1 from J2000.0.  Result is reduced to
/// `[0, 86400)` seconds.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Gmst1982;

impl Gmst1982 {
    const C0: f64 = 67_310.548_41;
    const C1: f64 = 876_600.0 * 3_600.0 + 8_640_184.812_866;
    const C2: f64 = 0.093_104;
    const C3: f64 = -6.2e-6;
}

impl SiderealTime for Gmst1982 {
    fn gmst(&self, epoch: Epoch) -> Seconds {
        let t = epoch.julian_centuries();
        let g = Self::C0 + ((Self::C3 * t + Self::C2) * t + Self::C1) * t;
        Seconds::new(g.rem_euclid(SECONDS_PER_DAY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmst_j2000_midnight() {
        // 2000-01-01 00:00 UT1: GMST ≈ 6h 39m 52.27s = 23 992.27 s
        let gmst = Gmst1982.gmst(Epoch::new(946_684_800.0));
        assert!(
            (gmst.value() - 23_992.27).abs() < 0.1,
            "GMST at J2000 midnight = {} s",
            gmst.value()
        );
    }

    #[test]
    fn gmst_advances_one_sidereal_excess_per_day() {
        // One solar day later GMST is ≈ 236.555 s ahead.
        let a = Gmst1982.gmst(Epoch::new(946_684_800.0)).value();
        let b = Gmst1982.gmst(Epoch::new(946_684_800.0 + SECONDS_PER_DAY)).value();
        let advance = (b - a).rem_euclid(SECONDS_PER_DAY);
        assert!((advance - 236.555).abs() < 0.01, "advance = {advance} s");
    }

    #[test]
    fn gmst_range() {
        for &s in &[0.0, -1.0e9, 946_728_000.0, 1.7e9, 4.0e9] {
            let g = Gmst1982.gmst(Epoch::new(s)).value();
            assert!((0.0..SECONDS_PER_DAY).contains(&g), "GMST out of range: {g}");
        }
    }

    #[test]
    fn closures_are_sidereal_sources() {
        let fixed = |_: Epoch| Seconds::new(21_600.0);
        assert_eq!(fixed.gmst(Epoch::new(123.0)).value(), 21_600.0);
    }
}
