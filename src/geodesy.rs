// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geodetic ↔ ECEF conversion on a reference ellipsoid.
//!
//! The forward direction is closed form.  The inverse iterates on the
//! auxiliary quantity `t = N·ee·sinφ` (the offset between the equatorial
//! plane crossing of the ellipsoid normal and the origin) until it moves by
//! less than the solver tolerance.  Longitude does not depend on the
//! iteration and is computed once.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::ellipsoid::Ellipsoid;
use crate::error::{FrameError, FrameResult};
use crate::frames::{EcefPosition, Geodetic};

/// Stopping rule of the ECEF → geodetic iteration.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Stop once the auxiliary term changes by less than this (length units).
    pub tolerance: f64,
    /// Give up with [`FrameError::NotConverged`] after this many iterations.
    pub max_iterations: usize,
}

impl SolverConfig {
    pub const fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    pub const fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    pub const fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    pub fn validate(&self) -> FrameResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FrameError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        if self.max_iterations == 0 {
            return Err(FrameError::InvalidIterationLimit);
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

/// Geodetic → ECEF.
///
/// ```text
/// N = ae / sqrt(1 − ee·sin²φ)
/// x = (N + h)·cosφ·cosλ
/// y = (N + h)·cosφ·sinλ
/// z = (N·(1 − ee) + h)·sinφ
/// ```
pub fn geodetic_to_ecef(geodetic: &Geodetic, ellipsoid: &Ellipsoid) -> EcefPosition {
    let (sin_lat, cos_lat) = geodetic.lat().to_radians().sin_cos();
    let (sin_lon, cos_lon) = geodetic.lon().to_radians().sin_cos();
    let n = ellipsoid.prime_vertical_radius(sin_lat);
    let h = geodetic.alt();
    EcefPosition::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - ellipsoid.ecc_squared()) + h) * sin_lat,
    )
}

/// ECEF → geodetic.
///
/// Latitude comes back in `[-90, 90]`, longitude in `(-180, 180]`.
///
/// # Errors
///
/// - [`FrameError::NonFinite`] for NaN or infinite components.
/// - [`FrameError::DegenerateGeometry`] for the origin, where the ellipsoid
///   normal is undefined.
/// - [`FrameError::NotConverged`] when `config.max_iterations` is exhausted.
/// - [`FrameError::InvalidTolerance`] / [`FrameError::InvalidIterationLimit`]
///   for a bad `config`.
pub fn ecef_to_geodetic(
    position: &EcefPosition,
    ellipsoid: &Ellipsoid,
    config: &SolverConfig,
) -> FrameResult<Geodetic> {
    config.validate()?;

    let (x, y, z) = (position.x(), position.y(), position.z());
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(FrameError::non_finite("ECEF position component"));
    }
    if x == 0.0 && y == 0.0 && z == 0.0 {
        return Err(FrameError::degenerate("ECEF position at the origin"));
    }

    let ae = ellipsoid.equatorial_radius();
    let ee = ellipsoid.ecc_squared();
    let lon = y.atan2(x);
    let rho = x.hypot(y);

    let mut t = ee * z;
    let mut n = ae;
    let mut nph = 0.0;
    let mut sin_phi = 0.0;
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let zt = z + t;
        nph = rho.hypot(zt);
        if nph == 0.0 {
            return Err(FrameError::degenerate("ellipsoid normal through the origin"));
        }
        sin_phi = zt / nph;
        n = ae / (1.0 - ee * sin_phi * sin_phi).sqrt();
        let previous = t;
        t = n * ee * sin_phi;
        residual = (t - previous).abs();
        log::trace!("geodetic solver iteration {iteration}: delta {residual:e}");

        if residual < config.tolerance {
            log::debug!("geodetic solver converged after {iteration} iterations");
            let geodetic = Geodetic::new(sin_phi.asin().to_degrees(), lon.to_degrees(), nph - n);
            if !geodetic.vector().iter().all(|c| c.is_finite()) {
                return Err(FrameError::non_finite("geodetic solver result"));
            }
            return Ok(geodetic);
        }
    }

    log::warn!(
        "geodetic solver stopped at {} iterations, residual {residual:e} (sinφ {sin_phi}, N+h {nph}, N {n})",
        config.max_iterations
    );
    Err(FrameError::NotConverged {
        iterations: config.max_iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENVER: Geodetic = Geodetic::new(39.75, 104.87, 1609.344);

    fn denver_ecef() -> EcefPosition {
        EcefPosition::new(-1_260_484.206_487, 4_747_249.668_167, 4_057_711.884_932)
    }

    #[test]
    fn denver_to_ecef() {
        let ecef = geodetic_to_ecef(&DENVER, &Ellipsoid::WGS84);
        let expected = denver_ecef();
        assert!((ecef.xyz() - expected.xyz()).abs().max() < 1e-3, "{ecef}");
    }

    #[test]
    fn denver_from_ecef() {
        let g = ecef_to_geodetic(&denver_ecef(), &Ellipsoid::WGS84, &SolverConfig::default())
            .unwrap();
        assert!((g.lat() - DENVER.lat()).abs() < 1e-6, "lat {}", g.lat());
        assert!((g.lon() - DENVER.lon()).abs() < 1e-6, "lon {}", g.lon());
        assert!((g.alt() - DENVER.alt()).abs() < 1e-6, "alt {}", g.alt());
    }

    #[test]
    fn roundtrip_grid() {
        let e = Ellipsoid::WGS84;
        let config = SolverConfig::default();
        for &lat in &[-89.9, -45.0, -12.5, 0.0, 33.3, 60.0, 89.9] {
            for &lon in &[-179.0, -90.0, 0.0, 45.0, 135.0] {
                for &alt in &[-1_000.0, 0.0, 8_848.0, 400_000.0, 3.6e7] {
                    let g = Geodetic::new(lat, lon, alt);
                    let back = ecef_to_geodetic(&geodetic_to_ecef(&g, &e), &e, &config).unwrap();
                    assert!((back.lat() - lat).abs() < 1e-6, "{g} -> {back}");
                    assert!((back.lon() - lon).abs() < 1e-6, "{g} -> {back}");
                    assert!((back.alt() - alt).abs() < 1e-4, "{g} -> {back}");
                }
            }
        }
    }

    #[test]
    fn poles_and_equator() {
        let e = Ellipsoid::WGS84;
        let config = SolverConfig::default();

        let north = EcefPosition::new(0.0, 0.0, e.polar_radius());
        let g = ecef_to_geodetic(&north, &e, &config).unwrap();
        assert!((g.lat() - 90.0).abs() < 1e-9);
        assert!(g.alt().abs() < 1e-6);

        let equator = EcefPosition::new(e.equatorial_radius() + 10.0, 0.0, 0.0);
        let g = ecef_to_geodetic(&equator, &e, &config).unwrap();
        assert!(g.lat().abs() < 1e-12);
        assert!(g.lon().abs() < 1e-12);
        assert!((g.alt() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn sphere_altitude_is_radial_distance() {
        let sphere = Ellipsoid::new(1_000.0, 0.0).unwrap();
        let p = EcefPosition::new(600.0, 800.0, 0.0);
        let g = ecef_to_geodetic(&p, &sphere, &SolverConfig::default()).unwrap();
        assert!(g.alt().abs() < 1e-9);
        assert!((g.lon() - 800f64.atan2(600.0).to_degrees()).abs() < 1e-12);
    }

    #[test]
    fn origin_is_degenerate() {
        let err = ecef_to_geodetic(
            &EcefPosition::new(0.0, 0.0, 0.0),
            &Ellipsoid::WGS84,
            &SolverConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::DegenerateGeometry { .. }));
    }

    #[test]
    fn nan_is_rejected() {
        let err = ecef_to_geodetic(
            &EcefPosition::new(f64::NAN, 1.0, 1.0),
            &Ellipsoid::WGS84,
            &SolverConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::NonFinite { .. }));
    }

    #[test]
    fn huge_components_do_not_overflow() {
        let p = EcefPosition::new(1e200, 1e200, 1e200);
        let g = ecef_to_geodetic(&p, &Ellipsoid::WGS84, &SolverConfig::default()).unwrap();
        let expected_lat = (1.0 / 3f64.sqrt()).asin().to_degrees();
        assert!((g.lat() - expected_lat).abs() < 1e-9, "{g}");
        assert!((g.lon() - 45.0).abs() < 1e-12, "{g}");
        assert!(g.alt().is_finite(), "{g}");
        assert!((g.alt() / (3f64.sqrt() * 1e200) - 1.0).abs() < 1e-12, "{g}");
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let config = SolverConfig::default().with_max_iterations(1);
        let err = ecef_to_geodetic(&denver_ecef(), &Ellipsoid::WGS84, &config).unwrap_err();
        match err {
            FrameError::NotConverged {
                iterations,
                residual,
            } => {
                assert_eq!(iterations, 1);
                assert!(residual > config.tolerance);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let e = Ellipsoid::WGS84;
        let p = denver_ecef();
        let zero_tol = SolverConfig::default().with_tolerance(0.0);
        assert_eq!(
            ecef_to_geodetic(&p, &e, &zero_tol),
            Err(FrameError::InvalidTolerance { tolerance: 0.0 })
        );
        let no_iter = SolverConfig::default().with_max_iterations(0);
        assert_eq!(
            ecef_to_geodetic(&p, &e, &no_iter),
            Err(FrameError::InvalidIterationLimit)
        );
    }
}
