// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ECEF ↔ true-of-date ECI rotation matrices.
//!
//! At an epoch `t` the Greenwich hour angle is
//!
//! ```text
//! gha = GMST(t) · 2π / 86400
//! ```
//!
//! and the ECI → ECEF rotation about the polar axis is
//!
//! ```text
//!        ⎡  cos gha   sin gha   0 ⎤          ⎡ −sin gha   cos gha   0 ⎤
//! R(t) = ⎢ −sin gha   cos gha   0 ⎥   Ṙ(t) = ω⎢ −cos gha  −sin gha   0 ⎥
//!        ⎣     0         0      1 ⎦          ⎣     0         0      0 ⎦
//! ```
//!
//! with ω the sidereal rotation rate.  ECEF → ECI is the transpose of both.
//!
//! Position and velocity are transformed together by the block matrix
//! `[[R, 0], [Ṙ, R]]`; the lower-left `Ṙ` block is the rotating-frame
//! (transport) term and cannot be dropped.

use nalgebra::{Matrix3, Matrix6};

use crate::constants::{EARTH_ROTATION_RATE, PI, SECONDS_PER_DAY};
use crate::epoch::Epoch;
use crate::sidereal::{Gmst1982, SiderealTime};

/// A time-dependent frame rotation and its derivative.
pub trait RotationMatrix {
    /// 3×3 rotation applied to position vectors.
    fn matrix(&self) -> Matrix3<f64>;

    /// Time derivative of [`RotationMatrix::matrix`], per second.
    fn matrix_dot(&self) -> Matrix3<f64>;

    /// 6×6 `[[R, 0], [Ṙ, R]]` applied to stacked `[position; velocity]`.
    fn state_matrix(&self) -> Matrix6<f64> {
        let r = self.matrix();
        let r_dot = self.matrix_dot();
        let mut m = Matrix6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(&r_dot);
        m.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        m
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ECI → ECEF
// ═══════════════════════════════════════════════════════════════════════════

/// ECI → ECEF rotation at a fixed epoch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EciToEcef {
    epoch: Epoch,
    gha: f64,
    sin_gha: f64,
    cos_gha: f64,
    omega: f64,
}

impl EciToEcef {
    /// Rotation at `epoch` using the [`Gmst1982`] sidereal time.
    pub fn new(epoch: Epoch) -> Self {
        Self::with_sidereal(epoch, &Gmst1982)
    }

    /// Rotation at `epoch` using a caller-supplied sidereal-time source.
    pub fn with_sidereal<S: SiderealTime + ?Sized>(epoch: Epoch, sidereal: &S) -> Self {
        let gmst = sidereal.gmst(epoch).value();
        let gha = gmst * 2.0 * PI / SECONDS_PER_DAY;
        let (sin_gha, cos_gha) = gha.sin_cos();
        Self {
            epoch,
            gha,
            sin_gha,
            cos_gha,
            omega: EARTH_ROTATION_RATE,
        }
    }

    #[inline]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Greenwich hour angle in radians.
    #[inline]
    pub const fn hour_angle(&self) -> f64 {
        self.gha
    }

    /// Earth rotation rate in rad/s.
    #[inline]
    pub const fn rotation_rate(&self) -> f64 {
        self.omega
    }
}

impl RotationMatrix for EciToEcef {
    fn matrix(&self) -> Matrix3<f64> {
        let (s, c) = (self.sin_gha, self.cos_gha);
        Matrix3::new(
            c, s, 0.0, //
            -s, c, 0.0, //
            0.0, 0.0, 1.0,
        )
    }

    fn matrix_dot(&self) -> Matrix3<f64> {
        let (s, c, w) = (self.sin_gha, self.cos_gha, self.omega);
        Matrix3::new(
            -w * s, w * c, 0.0, //
            -w * c, -w * s, 0.0, //
            0.0, 0.0, 0.0,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ECEF → ECI
// ═══════════════════════════════════════════════════════════════════════════

/// ECEF → ECI rotation at a fixed epoch: the transpose of [`EciToEcef`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EcefToEci {
    inner: EciToEcef,
}

impl EcefToEci {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            inner: EciToEcef::new(epoch),
        }
    }

    pub fn with_sidereal<S: SiderealTime + ?Sized>(epoch: Epoch, sidereal: &S) -> Self {
        Self {
            inner: EciToEcef::with_sidereal(epoch, sidereal),
        }
    }

    #[inline]
    pub const fn epoch(&self) -> Epoch {
        self.inner.epoch()
    }

    /// The forward (ECI → ECEF) rotation this is the inverse of.
    #[inline]
    pub const fn inverse(&self) -> EciToEcef {
        self.inner
    }
}

impl RotationMatrix for EcefToEci {
    fn matrix(&self) -> Matrix3<f64> {
        self.inner.matrix().transpose()
    }

    fn matrix_dot(&self) -> Matrix3<f64> {
        self.inner.matrix_dot().transpose()
    }
}

impl From<EciToEcef> for EcefToEci {
    fn from(inner: EciToEcef) -> Self {
        Self { inner }
    }
}
