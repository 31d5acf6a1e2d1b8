// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Trajectory interpolation between two time-tagged samples.
//!
//! Direction and magnitude are blended separately:
//!
//! 1. the unit direction of the first sample is rotated toward the second
//!    about `v0 × v1`, through the fraction `(t − t0) / (t1 − t0)` of the
//!    angle between them;
//! 2. the magnitude is interpolated linearly with the same fraction.
//!
//! Radius and angular position along an orbit arc therefore evolve
//! independently, and a uniform circular arc is reproduced exactly.
//! `t` is not restricted to `[t0, t1]`; outside it the same formula
//! extrapolates.
//!
//! Position + velocity states interpolate the two vectors independently.

use nalgebra::{Unit, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::epoch::Epoch;
use crate::error::{FrameError, FrameResult};
use crate::frames::{Frame, Position, State};

/// Below this `|sin θ|` the endpoints are treated as collinear.
const COLLINEAR_SIN: f64 = 1e-12;

/// Interpolate a 3-vector observed as `v0` at `t0` and `v1` at `t1` to `t`.
///
/// # Errors
///
/// - [`FrameError::ZeroTimeSpan`] if `t1 == t0`.
/// - [`FrameError::NonFinite`] for NaN or infinite inputs.
/// - [`FrameError::DegenerateGeometry`] if either vector is zero, or the two
///   point in opposite directions (no unique rotation axis).
pub fn interpolate_vector(
    v0: &Vector3<f64>,
    t0: Epoch,
    v1: &Vector3<f64>,
    t1: Epoch,
    t: Epoch,
) -> FrameResult<Vector3<f64>> {
    let span = (t1 - t0).value();
    if !(span.is_finite() && t.value().is_finite()) {
        return Err(FrameError::non_finite("interpolation epoch"));
    }
    if span == 0.0 {
        return Err(FrameError::ZeroTimeSpan);
    }
    if !(v0.iter().all(|c| c.is_finite()) && v1.iter().all(|c| c.is_finite())) {
        return Err(FrameError::non_finite("interpolation sample component"));
    }

    let m0 = magnitude_of(v0);
    let m1 = magnitude_of(v1);
    if m0 == 0.0 || m1 == 0.0 {
        return Err(FrameError::degenerate("zero-length interpolation sample"));
    }
    let u0 = v0 / m0;
    let u1 = v1 / m1;

    let fraction = (t - t0).value() / span;
    let magnitude = m0 + (m1 - m0) * fraction;

    let cos_theta = u0.dot(&u1).clamp(-1.0, 1.0);
    let cross = u0.cross(&u1);
    if cross.norm() < COLLINEAR_SIN {
        if cos_theta < 0.0 {
            return Err(FrameError::degenerate(
                "opposite interpolation samples have no rotation axis",
            ));
        }
        return finite_result(u0 * magnitude);
    }

    let theta = cos_theta.acos();
    let axis = Unit::new_normalize(cross);
    let rotation = UnitQuaternion::from_axis_angle(&axis, theta * fraction);
    finite_result(rotation * (u0 * magnitude))
}

/// Euclidean length without squaring the components.
fn magnitude_of(v: &Vector3<f64>) -> f64 {
    v.x.hypot(v.y).hypot(v.z)
}

fn finite_result(v: Vector3<f64>) -> FrameResult<Vector3<f64>> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(v)
    } else {
        Err(FrameError::non_finite("interpolated vector"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Interpolate trait
// ═══════════════════════════════════════════════════════════════════════════

/// Values that can be blended between two observation epochs.
pub trait Interpolate: Sized {
    /// Interpolate between `self` at `t0` and `other` at `t1`, evaluated at `t`.
    fn interpolate(&self, t0: Epoch, other: &Self, t1: Epoch, t: Epoch) -> FrameResult<Self>;
}

impl<F: Frame> Interpolate for Position<F> {
    fn interpolate(&self, t0: Epoch, other: &Self, t1: Epoch, t: Epoch) -> FrameResult<Self> {
        interpolate_vector(&self.xyz(), t0, &other.xyz(), t1, t).map(Self::from_vector)
    }
}

impl<F: Frame> Interpolate for State<F> {
    fn interpolate(&self, t0: Epoch, other: &Self, t1: Epoch, t: Epoch) -> FrameResult<Self> {
        let position = self.position().interpolate(t0, &other.position(), t1, t)?;
        let velocity = interpolate_vector(&self.velocity(), t0, &other.velocity(), t1, t)?;
        Ok(State::new(position, velocity))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sample<T>
// ═══════════════════════════════════════════════════════════════════════════

/// A value together with the epoch it was observed at.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample<T> {
    pub value: T,
    pub epoch: Epoch,
}

impl<T> Sample<T> {
    pub const fn new(value: T, epoch: Epoch) -> Self {
        Self { value, epoch }
    }
}

impl<T: Interpolate> Sample<T> {
    /// Interpolate between `self` and `next` at `epoch`.
    pub fn interpolate_to(&self, next: &Sample<T>, epoch: Epoch) -> FrameResult<Sample<T>> {
        let value = self
            .value
            .interpolate(self.epoch, &next.value, next.epoch, epoch)?;
        Ok(Sample::new(value, epoch))
    }
}
