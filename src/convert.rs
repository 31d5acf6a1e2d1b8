// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Frame-to-frame conversion.
//!
//! Two entry points share one implementation:
//!
//! - **Typed**: [`Converter::convert`] picks the conversion from the source
//!   and target types, e.g. `conv.convert::<EcefPosition, _>(&geodetic)`.
//!   Every pair is an impl of [`ConvertFrom`].
//! - **Dynamic**: [`Converter::convert_value`] (or the free [`convert`])
//!   takes a [`FrameValue`] and a target [`FrameTag`] and dispatches on the
//!   `(source, target)` pair.
//!
//! # Parameters per pair
//!
//! | From → To | Needs |
//! |-----------|-------|
//! | any frame → itself | nothing (identity) |
//! | Geodetic → ECEF, ECEF-vel | ellipsoid |
//! | ECEF, ECEF-vel → Geodetic | ellipsoid, solver tolerance |
//! | ECEF-vel → ECEF | nothing (velocity dropped) |
//! | ECI ↔ ECEF, ECI-vel ↔ ECEF-vel | epoch |
//! | ECI, ECI-vel → Geodetic | epoch, ellipsoid, solver tolerance |
//! | Geodetic → ECI, ECI-vel | epoch, ellipsoid |
//!
//! The ellipsoid and solver settings always have defaults (WGS84, 1e-10);
//! the epoch does not, and a pair that needs one fails with
//! [`FrameError::MissingEpoch`] when [`ConversionParams`] carries none.
//!
//! Going from a state to a position-only frame drops the velocity *after*
//! the state has been carried through the same rotation chain the
//! velocity-aware path uses.  Going from a position to a state frame lifts
//! the position to a state at rest in its **source** frame first.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;
use crate::epoch::Epoch;
use crate::error::{FrameError, FrameResult};
use crate::frames::{
    EcefPosition, EcefState, EciPosition, EciState, FrameTag, FrameValue, Geodetic,
};
use crate::geodesy::{self, SolverConfig};
use crate::rotation::{EcefToEci, EciToEcef, RotationMatrix};
use crate::sidereal::{Gmst1982, SiderealTime};

/// Whether converting `from → to` needs an observation epoch.
///
/// True exactly when one side is a true-of-date inertial frame and the other
/// is not.
#[inline]
pub const fn requires_epoch(from: FrameTag, to: FrameTag) -> bool {
    from.is_inertial() != to.is_inertial()
}

// ═══════════════════════════════════════════════════════════════════════════
// ConversionParams
// ═══════════════════════════════════════════════════════════════════════════

/// Extra inputs a conversion may need.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionParams {
    pub ellipsoid: Ellipsoid,
    pub epoch: Option<Epoch>,
    pub solver: SolverConfig,
}

impl ConversionParams {
    /// WGS84, default solver, no epoch.
    pub fn new() -> Self {
        Self::default()
    }

    /// WGS84, default solver, observed at `epoch`.
    pub fn at(epoch: Epoch) -> Self {
        Self::default().with_epoch(epoch)
    }

    pub fn with_epoch(self, epoch: Epoch) -> Self {
        Self {
            epoch: Some(epoch),
            ..self
        }
    }

    pub fn with_ellipsoid(self, ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid, ..self }
    }

    pub fn with_solver(self, solver: SolverConfig) -> Self {
        Self { solver, ..self }
    }

    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self {
            solver: self.solver.with_tolerance(tolerance),
            ..self
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Converter
// ═══════════════════════════════════════════════════════════════════════════

/// Conversion parameters bound to a sidereal-time source.
///
/// `Converter` is `Send + Sync`; one instance can serve any number of
/// threads.
#[derive(Copy, Clone)]
pub struct Converter<'a> {
    params: ConversionParams,
    sidereal: &'a (dyn SiderealTime + Sync),
}

impl Converter<'static> {
    /// Converter using the [`Gmst1982`] sidereal time.
    pub fn new(params: ConversionParams) -> Self {
        Self {
            params,
            sidereal: &Gmst1982,
        }
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(ConversionParams::default())
    }
}

impl<'a> Converter<'a> {
    /// Converter using a caller-supplied sidereal-time source.
    pub fn with_sidereal(
        params: ConversionParams,
        sidereal: &'a (dyn SiderealTime + Sync),
    ) -> Self {
        Self { params, sidereal }
    }

    #[inline]
    pub const fn params(&self) -> &ConversionParams {
        &self.params
    }

    /// Typed conversion: the pair is chosen by `S` and `T`.
    #[inline]
    pub fn convert<T, S>(&self, source: &S) -> FrameResult<T>
    where
        T: ConvertFrom<S>,
    {
        T::convert_from(source, self)
    }

    /// Dynamic conversion of a tagged value to the frame named by `target`.
    pub fn convert_value(&self, value: &FrameValue, target: FrameTag) -> FrameResult<FrameValue> {
        log::debug!("converting {} -> {}", value.tag(), target);
        match value {
            FrameValue::Geodetic(v) => self.dispatch(v, target),
            FrameValue::Ecef(v) => self.dispatch(v, target),
            FrameValue::EcefVel(v) => self.dispatch(v, target),
            FrameValue::TodEci(v) => self.dispatch(v, target),
            FrameValue::TodEciVel(v) => self.dispatch(v, target),
        }
    }

    fn dispatch<S>(&self, source: &S, target: FrameTag) -> FrameResult<FrameValue>
    where
        Geodetic: ConvertFrom<S>,
        EcefPosition: ConvertFrom<S>,
        EcefState: ConvertFrom<S>,
        EciPosition: ConvertFrom<S>,
        EciState: ConvertFrom<S>,
    {
        Ok(match target {
            FrameTag::Geodetic => FrameValue::Geodetic(self.convert(source)?),
            FrameTag::Ecef => FrameValue::Ecef(self.convert(source)?),
            FrameTag::EcefVel => FrameValue::EcefVel(self.convert(source)?),
            FrameTag::TodEci => FrameValue::TodEci(self.convert(source)?),
            FrameTag::TodEciVel => FrameValue::TodEciVel(self.convert(source)?),
        })
    }

    fn epoch_for(&self, from: FrameTag, to: FrameTag) -> FrameResult<Epoch> {
        self.params
            .epoch
            .ok_or(FrameError::MissingEpoch { from, to })
    }

    // ── primitive steps ───────────────────────────────────────────────

    fn to_ecef(&self, g: &Geodetic) -> EcefPosition {
        geodesy::geodetic_to_ecef(g, &self.params.ellipsoid)
    }

    fn to_geodetic(&self, p: &EcefPosition) -> FrameResult<Geodetic> {
        geodesy::ecef_to_geodetic(p, &self.params.ellipsoid, &self.params.solver)
    }

    fn eci_to_ecef(&self, p: &EciPosition, epoch: Epoch) -> EcefPosition {
        let m = EciToEcef::with_sidereal(epoch, self.sidereal).matrix();
        EcefPosition::from_vector(m * p.xyz())
    }

    fn ecef_to_eci(&self, p: &EcefPosition, epoch: Epoch) -> EciPosition {
        let m = EcefToEci::with_sidereal(epoch, self.sidereal).matrix();
        EciPosition::from_vector(m * p.xyz())
    }

    fn eci_state_to_ecef(&self, s: &EciState, epoch: Epoch) -> EcefState {
        let m = EciToEcef::with_sidereal(epoch, self.sidereal).state_matrix();
        EcefState::from_vector(m * s.vector())
    }

    fn ecef_state_to_eci(&self, s: &EcefState, epoch: Epoch) -> EciState {
        let m = EcefToEci::with_sidereal(epoch, self.sidereal).state_matrix();
        EciState::from_vector(m * s.vector())
    }
}

impl std::fmt::Debug for Converter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Convert a tagged value with the default [`Gmst1982`] sidereal time.
pub fn convert(
    value: &FrameValue,
    target: FrameTag,
    params: &ConversionParams,
) -> FrameResult<FrameValue> {
    Converter::new(*params).convert_value(value, target)
}

// ═══════════════════════════════════════════════════════════════════════════
// ConvertFrom: one impl per (source, target) pair
// ═══════════════════════════════════════════════════════════════════════════

/// Conversion from a value in frame `S` into `Self`.
pub trait ConvertFrom<S>: Sized {
    fn convert_from(source: &S, conv: &Converter<'_>) -> FrameResult<Self>;
}

/// Source-side view of [`ConvertFrom`], implemented for every pair.
///
/// ```
/// use geoframes::{ConvertInto, Converter, EcefPosition, Geodetic};
///
/// let conv = Converter::default();
/// let ecef: EcefPosition = Geodetic::new(0.0, 0.0, 0.0).convert_into(&conv)?;
/// assert_eq!(ecef.x(), 6_378_137.0);
/// # Ok::<(), geoframes::FrameError>(())
/// ```
pub trait ConvertInto<T> {
    fn convert_into(&self, conv: &Converter<'_>) -> FrameResult<T>;
}

impl<S, T> ConvertInto<T> for S
where
    T: ConvertFrom<S>,
{
    #[inline]
    fn convert_into(&self, conv: &Converter<'_>) -> FrameResult<T> {
        T::convert_from(self, conv)
    }
}

// ── → Geodetic ────────────────────────────────────────────────────────────

impl ConvertFrom<Geodetic> for Geodetic {
    fn convert_from(source: &Geodetic, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(*source)
    }
}

impl ConvertFrom<EcefPosition> for Geodetic {
    fn convert_from(source: &EcefPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        conv.to_geodetic(source)
    }
}

impl ConvertFrom<EcefState> for Geodetic {
    fn convert_from(source: &EcefState, conv: &Converter<'_>) -> FrameResult<Self> {
        conv.to_geodetic(&source.drop_velocity())
    }
}

impl ConvertFrom<EciPosition> for Geodetic {
    fn convert_from(source: &EciPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEci, FrameTag::Geodetic)?;
        conv.to_geodetic(&conv.eci_to_ecef(source, epoch))
    }
}

impl ConvertFrom<EciState> for Geodetic {
    fn convert_from(source: &EciState, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEciVel, FrameTag::Geodetic)?;
        let ecef = conv.eci_state_to_ecef(source, epoch);
        conv.to_geodetic(&ecef.drop_velocity())
    }
}

// ── → ECEF ────────────────────────────────────────────────────────────────

impl ConvertFrom<Geodetic> for EcefPosition {
    fn convert_from(source: &Geodetic, conv: &Converter<'_>) -> FrameResult<Self> {
        Ok(conv.to_ecef(source))
    }
}

impl ConvertFrom<EcefPosition> for EcefPosition {
    fn convert_from(source: &EcefPosition, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(*source)
    }
}

impl ConvertFrom<EcefState> for EcefPosition {
    fn convert_from(source: &EcefState, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(source.drop_velocity())
    }
}

impl ConvertFrom<EciPosition> for EcefPosition {
    fn convert_from(source: &EciPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEci, FrameTag::Ecef)?;
        Ok(conv.eci_to_ecef(source, epoch))
    }
}

impl ConvertFrom<EciState> for EcefPosition {
    fn convert_from(source: &EciState, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEciVel, FrameTag::Ecef)?;
        Ok(conv.eci_state_to_ecef(source, epoch).drop_velocity())
    }
}

// ── → ECEF-vel ────────────────────────────────────────────────────────────

impl ConvertFrom<Geodetic> for EcefState {
    fn convert_from(source: &Geodetic, conv: &Converter<'_>) -> FrameResult<Self> {
        Ok(conv.to_ecef(source).at_rest())
    }
}

impl ConvertFrom<EcefPosition> for EcefState {
    fn convert_from(source: &EcefPosition, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(source.at_rest())
    }
}

impl ConvertFrom<EcefState> for EcefState {
    fn convert_from(source: &EcefState, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(*source)
    }
}

impl ConvertFrom<EciPosition> for EcefState {
    fn convert_from(source: &EciPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEci, FrameTag::EcefVel)?;
        Ok(conv.eci_state_to_ecef(&source.at_rest(), epoch))
    }
}

impl ConvertFrom<EciState> for EcefState {
    fn convert_from(source: &EciState, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::TodEciVel, FrameTag::EcefVel)?;
        Ok(conv.eci_state_to_ecef(source, epoch))
    }
}

// ── → TOD-ECI ─────────────────────────────────────────────────────────────

impl ConvertFrom<Geodetic> for EciPosition {
    fn convert_from(source: &Geodetic, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::Geodetic, FrameTag::TodEci)?;
        Ok(conv.ecef_to_eci(&conv.to_ecef(source), epoch))
    }
}

impl ConvertFrom<EcefPosition> for EciPosition {
    fn convert_from(source: &EcefPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::Ecef, FrameTag::TodEci)?;
        Ok(conv.ecef_to_eci(source, epoch))
    }
}

impl ConvertFrom<EcefState> for EciPosition {
    fn convert_from(source: &EcefState, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::EcefVel, FrameTag::TodEci)?;
        Ok(conv.ecef_state_to_eci(source, epoch).drop_velocity())
    }
}

impl ConvertFrom<EciPosition> for EciPosition {
    fn convert_from(source: &EciPosition, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(*source)
    }
}

impl ConvertFrom<EciState> for EciPosition {
    fn convert_from(source: &EciState, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(source.drop_velocity())
    }
}

// ── → TOD-ECI-vel ─────────────────────────────────────────────────────────

impl ConvertFrom<Geodetic> for EciState {
    fn convert_from(source: &Geodetic, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::Geodetic, FrameTag::TodEciVel)?;
        Ok(conv.ecef_state_to_eci(&conv.to_ecef(source).at_rest(), epoch))
    }
}

impl ConvertFrom<EcefPosition> for EciState {
    fn convert_from(source: &EcefPosition, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::Ecef, FrameTag::TodEciVel)?;
        Ok(conv.ecef_state_to_eci(&source.at_rest(), epoch))
    }
}

impl ConvertFrom<EcefState> for EciState {
    fn convert_from(source: &EcefState, conv: &Converter<'_>) -> FrameResult<Self> {
        let epoch = conv.epoch_for(FrameTag::EcefVel, FrameTag::TodEciVel)?;
        Ok(conv.ecef_state_to_eci(source, epoch))
    }
}

impl ConvertFrom<EciPosition> for EciState {
    fn convert_from(source: &EciPosition, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(source.at_rest())
    }
}

impl ConvertFrom<EciState> for EciState {
    fn convert_from(source: &EciState, _: &Converter<'_>) -> FrameResult<Self> {
        Ok(*source)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EARTH_ROTATION_RATE;
    use nalgebra::Vector3;
    use qtty::Seconds;

    const DENVER: Geodetic = Geodetic::new(39.75, 104.87, 1609.344);

    fn denver_ecef() -> EcefPosition {
        EcefPosition::new(-1_260_484.206_487, 4_747_249.668_167, 4_057_711.884_932)
    }

    fn samples() -> [FrameValue; 5] {
        [
            DENVER.into(),
            denver_ecef().into(),
            EcefState::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).into(),
            EciPosition::new(7.0e6, -1.0e6, 2.0e5).into(),
            EciState::from_components(7.0e6, -1.0e6, 2.0e5, 100.0, 7_500.0, 10.0).into(),
        ]
    }

    #[test]
    fn requires_epoch_table() {
        use FrameTag::*;
        assert!(!requires_epoch(Geodetic, Ecef));
        assert!(!requires_epoch(EcefVel, Geodetic));
        assert!(!requires_epoch(TodEciVel, TodEci));
        assert!(requires_epoch(TodEci, Ecef));
        assert!(requires_epoch(EcefVel, TodEciVel));
        assert!(requires_epoch(TodEciVel, Geodetic));
        assert!(requires_epoch(Geodetic, TodEci));
        for tag in FrameTag::ALL {
            assert!(!requires_epoch(tag, tag));
        }
    }

    #[test]
    fn self_conversion_is_identity() {
        let bare = Converter::default();
        let full = Converter::new(
            ConversionParams::at(Epoch::new(1.0e9))
                .with_ellipsoid(Ellipsoid::GRS80)
                .with_tolerance(1e-6),
        );
        for value in samples() {
            for conv in [&bare, &full] {
                let same = conv.convert_value(&value, value.tag()).unwrap();
                assert_eq!(same, value);
            }
        }
    }

    #[test]
    fn every_pair_dispatches_with_epoch() {
        let conv = Converter::new(ConversionParams::at(Epoch::new(0.0)));
        for value in samples() {
            for target in FrameTag::ALL {
                let out = conv.convert_value(&value, target).unwrap_or_else(|e| {
                    panic!("{} -> {target} failed: {e}", value.tag());
                });
                assert_eq!(out.tag(), target);
            }
        }
    }

    #[test]
    fn missing_epoch_is_reported_for_inertial_pairs() {
        let conv = Converter::default();
        for value in samples() {
            for target in FrameTag::ALL {
                let result = conv.convert_value(&value, target);
                if requires_epoch(value.tag(), target) {
                    assert_eq!(
                        result,
                        Err(FrameError::MissingEpoch {
                            from: value.tag(),
                            to: target
                        })
                    );
                } else {
                    assert!(result.is_ok(), "{} -> {target}", value.tag());
                }
            }
        }
    }

    #[test]
    fn denver_geodetic_ecef() {
        let conv = Converter::default();
        let ecef: EcefPosition = conv.convert(&DENVER).unwrap();
        assert!((ecef.xyz() - denver_ecef().xyz()).abs().max() < 1e-3);

        let back: Geodetic = conv.convert(&denver_ecef()).unwrap();
        assert!((back.lat() - DENVER.lat()).abs() < 1e-6);
        assert!((back.lon() - DENVER.lon()).abs() < 1e-6);
        assert!((back.alt() - DENVER.alt()).abs() < 1e-6);
    }

    #[test]
    fn ellipsoid_parameter_is_used() {
        let wgs84: EcefPosition = Converter::default().convert(&DENVER).unwrap();
        let sphere = Ellipsoid::new(6_371_000.0, 0.0).unwrap();
        let conv = Converter::new(ConversionParams::new().with_ellipsoid(sphere));
        let on_sphere: EcefPosition = conv.convert(&DENVER).unwrap();
        assert!((on_sphere.norm() - (6_371_000.0 + DENVER.alt())).abs() < 1e-6);
        assert!((on_sphere.xyz() - wgs84.xyz()).norm() > 1_000.0);
    }

    #[test]
    fn ecef_eci_roundtrip_denver_at_zero() {
        let conv = Converter::new(ConversionParams::at(Epoch::new(0.0)));
        let eci: EciPosition = conv.convert(&denver_ecef()).unwrap();
        let back: EcefPosition = conv.convert(&eci).unwrap();
        assert!((back.xyz() - denver_ecef().xyz()).abs().max() < 1e-6);
        assert!((eci.norm() - denver_ecef().norm()).abs() < 1e-6);
    }

    #[test]
    fn state_roundtrip_through_eci() {
        let state = EcefState::from_components(
            4_000_000.0,
            -3_000_000.0,
            4_500_000.0,
            1_200.0,
            6_800.0,
            -250.0,
        );
        for &t in &[0.0, 5.0e8, 1.7e9] {
            let conv = Converter::new(ConversionParams::at(Epoch::new(t)));
            let eci: EciState = conv.convert(&state).unwrap();
            let back: EcefState = conv.convert(&eci).unwrap();
            let err = back.vector() - state.vector();
            assert!(err.fixed_rows::<3>(0).abs().max() < 1e-6, "position at t={t}");
            assert!(err.fixed_rows::<3>(3).abs().max() < 1e-9, "velocity at t={t}");
        }
    }

    #[test]
    fn fixed_ground_point_moves_with_earth_rotation() {
        let conv = Converter::new(ConversionParams::at(Epoch::new(1.0e9)));
        let ground = denver_ecef().at_rest();
        let eci: EciState = conv.convert(&ground).unwrap();
        let expected = Vector3::z().cross(&eci.position().xyz()) * EARTH_ROTATION_RATE;
        assert!(
            (eci.velocity() - expected).norm() < 1e-9,
            "{} vs {expected}",
            eci.velocity()
        );
    }

    #[test]
    fn velocity_loss_matches_position_only_path() {
        let epoch = Epoch::new(7.5e8);
        let conv = Converter::new(ConversionParams::at(epoch));
        let state = EciState::from_components(6.9e6, 1.1e6, -2.0e5, -900.0, 7_400.0, 120.0);

        let via_state: Geodetic = conv.convert(&state).unwrap();
        let via_position: Geodetic = conv.convert(&state.drop_velocity()).unwrap();
        assert!((via_state.lat() - via_position.lat()).abs() < 1e-12);
        assert!((via_state.lon() - via_position.lon()).abs() < 1e-12);
        assert!((via_state.alt() - via_position.alt()).abs() < 1e-6);

        let ecef_state = EcefState::from(denver_ecef());
        let g: Geodetic = conv.convert(&ecef_state).unwrap();
        let g_pos: Geodetic = conv.convert(&denver_ecef()).unwrap();
        assert_eq!(g, g_pos);

        let dropped: EcefPosition = conv.convert(&ecef_state).unwrap();
        assert_eq!(dropped, denver_ecef());
    }

    #[test]
    fn ecef_vel_to_geodetic_needs_no_epoch() {
        let conv = Converter::default();
        let state = EcefState::new(denver_ecef(), Vector3::new(10.0, 20.0, 30.0));
        let g: Geodetic = conv.convert(&state).unwrap();
        assert!((g.lat() - DENVER.lat()).abs() < 1e-6);
    }

    #[test]
    fn custom_sidereal_source_is_used() {
        let frozen = |_: Epoch| Seconds::new(0.0);
        let conv = Converter::with_sidereal(ConversionParams::at(Epoch::new(123_456.0)), &frozen);
        // Zero hour angle: the frames coincide.
        let eci: EciPosition = conv.convert(&denver_ecef()).unwrap();
        assert!((eci.xyz() - denver_ecef().xyz()).abs().max() < 1e-9);
    }

    #[test]
    fn free_function_uses_params() {
        let out = convert(
            &FrameValue::from(denver_ecef()),
            FrameTag::Geodetic,
            &ConversionParams::new(),
        )
        .unwrap();
        let g = out.as_geodetic().unwrap();
        assert!((g.lon() - DENVER.lon()).abs() < 1e-6);
    }

    #[test]
    fn convert_into_matches_convert_from() {
        let conv = Converter::new(ConversionParams::at(Epoch::new(3.0e8)));
        let from: EciState = conv.convert(&DENVER).unwrap();
        let into: EciState = DENVER.convert_into(&conv).unwrap();
        assert_eq!(from, into);

        let err = ConvertInto::<EcefPosition>::convert_into(
            &EciPosition::new(7.0e6, 0.0, 0.0),
            &Converter::default(),
        );
        assert!(matches!(err, Err(FrameError::MissingEpoch { .. })));
    }

    #[test]
    fn converter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter<'static>>();

        let conv = Converter::new(ConversionParams::at(Epoch::new(1.0e9)));
        let expected: EciPosition = conv.convert(&denver_ecef()).unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| conv.convert::<EciPosition, _>(&denver_ecef())))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }

    #[test]
    fn solver_errors_propagate_through_dispatch() {
        let origin = FrameValue::from(EcefPosition::new(0.0, 0.0, 0.0));
        let err = convert(&origin, FrameTag::Geodetic, &ConversionParams::new()).unwrap_err();
        assert!(matches!(err, FrameError::DegenerateGeometry { .. }));
    }
}
