// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for frame conversions and interpolation.

use thiserror::Error;

use crate::frames::FrameTag;

pub type FrameResult<T> = Result<T, FrameError>;

/// Failures reported by conversions, the geodetic solver and the interpolator.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// Ellipsoid radius not positive, or eccentricity² outside `[0, 1)`.
    #[error("invalid ellipsoid: radius {radius}, eccentricity squared {ecc_squared}")]
    InvalidEllipsoid { radius: f64, ecc_squared: f64 },

    #[error("invalid solver tolerance: {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("iteration limit must be at least 1")]
    InvalidIterationLimit,

    /// Interpolation between two samples observed at the same instant.
    #[error("interpolation samples share the same epoch")]
    ZeroTimeSpan,

    /// The requested frame pair needs an observation epoch.
    #[error("conversion {from} -> {to} requires an observation epoch")]
    MissingEpoch { from: FrameTag, to: FrameTag },

    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: &'static str },

    #[error("non-finite input: {what}")]
    NonFinite { what: &'static str },

    /// The geodetic solver ran out of iterations before meeting its tolerance.
    #[error("geodetic solver did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },
}

impl FrameError {
    pub(crate) fn degenerate(reason: &'static str) -> Self {
        Self::DegenerateGeometry { reason }
    }

    pub(crate) fn non_finite(what: &'static str) -> Self {
        Self::NonFinite { what }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_frames() {
        let err = FrameError::MissingEpoch {
            from: FrameTag::TodEci,
            to: FrameTag::Geodetic,
        };
        assert_eq!(
            err.to_string(),
            "conversion TOD-ECI -> Geodetic requires an observation epoch"
        );
    }

    #[test]
    fn not_converged_reports_iterations() {
        let err = FrameError::NotConverged {
            iterations: 3,
            residual: 1.5e-3,
        };
        assert!(err.to_string().contains("after 3 iterations"));
    }
}
