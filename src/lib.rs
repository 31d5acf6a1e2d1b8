// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geodetic, Earth-fixed and true-of-date inertial frames.
//!
//! This crate converts positions (and optionally velocities) between
//! geodetic latitude/longitude/altitude, Earth-Centred-Earth-Fixed (ECEF)
//! Cartesian and True-of-Date Earth-Centred-Inertial (ECI) Cartesian
//! coordinates, and interpolates along a trajectory between two
//! time-tagged samples.
//!
//! # Core types
//!
//! - [`Geodetic`]: latitude°, longitude°, altitude above the ellipsoid.
//! - [`Position<F>`] / [`State<F>`]: Cartesian position (+ velocity) tagged
//!   by a [`Frame`] marker ([`Ecef`], [`TodEci`]).
//! - [`Ellipsoid`]: reference ellipsoid; [`Ellipsoid::WGS84`] is the default.
//! - [`Epoch`]: observation instant (UT1 seconds since 1970-01-01).
//! - [`EciToEcef`] / [`EcefToEci`]: the time-dependent rotation and its
//!   derivative, via the [`RotationMatrix`] trait.
//! - [`Converter`]: frame-to-frame conversion, typed through
//!   [`ConvertFrom`] / [`ConvertInto`] or dynamic through [`FrameValue`] /
//!   [`FrameTag`].
//! - [`Interpolate`]: direction-slerp / magnitude-lerp between samples.
//!
//! # Frames
//!
//! | Tag | Value type | Components |
//! |-----|------------|------------|
//! | [`FrameTag::Geodetic`] | [`Geodetic`] | lat°, lon°, alt |
//! | [`FrameTag::Ecef`] | [`EcefPosition`] | x, y, z |
//! | [`FrameTag::EcefVel`] | [`EcefState`] | x, y, z, dx, dy, dz |
//! | [`FrameTag::TodEci`] | [`EciPosition`] | x, y, z |
//! | [`FrameTag::TodEciVel`] | [`EciState`] | x, y, z, dx, dy, dz |
//!
//! ```
//! use geoframes::{ConversionParams, Converter, EcefPosition, EciPosition, Epoch, Geodetic};
//!
//! let denver = Geodetic::new(39.75, 104.87, 1609.344);
//! let conv = Converter::new(ConversionParams::at(Epoch::new(0.0)));
//!
//! let ecef: EcefPosition = conv.convert(&denver)?;
//! let eci: EciPosition = conv.convert(&ecef)?;
//! let back: Geodetic = conv.convert(&eci)?;
//! assert!((back.lat() - denver.lat()).abs() < 1e-6);
//! # Ok::<(), geoframes::FrameError>(())
//! ```
//!
//! # Sidereal time
//!
//! The ECEF ↔ ECI rotation depends on Greenwich mean sidereal time.  The
//! default source is [`Gmst1982`]; any `Sync` [`SiderealTime`] implementation
//! (including a closure `Fn(Epoch) -> Seconds`) can be supplied through
//! [`Converter::with_sidereal`].
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: solver iterations at `trace`,
//! dispatched conversions and solver convergence at `debug`, an exhausted
//! iteration budget at `warn`.

pub mod constants;
mod convert;
mod ellipsoid;
mod epoch;
mod error;
mod frames;
pub mod geodesy;
mod interpolate;
mod rotation;
mod sidereal;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use convert::{
    convert, requires_epoch, ConversionParams, ConvertFrom, ConvertInto, Converter,
};
pub use ellipsoid::Ellipsoid;
pub use epoch::Epoch;
pub use error::{FrameError, FrameResult};
pub use frames::{
    Ecef, EcefPosition, EcefState, EciPosition, EciState, Frame, FrameTag, FrameValue, Geodetic,
    Position, State, TodEci,
};
pub use geodesy::SolverConfig;
pub use interpolate::{interpolate_vector, Interpolate, Sample};
pub use rotation::{EcefToEci, EciToEcef, RotationMatrix};
pub use sidereal::{Gmst1982, SiderealTime};
