// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Frame-tagged coordinate values.
//!
//! Cartesian values are parameterised by a zero-sized [`Frame`] marker, so
//! an ECEF position and a true-of-date ECI position are distinct types even
//! though both are three `f64`s:
//!
//! | Alias | Type | Frame |
//! |-------|------|-------|
//! | [`EcefPosition`] | `Position<Ecef>` | Earth-centred, Earth-fixed |
//! | [`EcefState`] | `State<Ecef>` | ECEF position + velocity |
//! | [`EciPosition`] | `Position<TodEci>` | true-of-date Earth-centred inertial |
//! | [`EciState`] | `State<TodEci>` | ECI position + velocity |
//!
//! A [`State`] *contains* a [`Position`]; dropping the velocity is an
//! explicit [`State::drop_velocity`] call, never an implicit conversion.
//!
//! ECI values carry no timestamp.  The caller keeps track of the epoch the
//! value was observed at and passes it wherever a conversion needs it.
//!
//! For dynamic dispatch the closed set of frames is also available as the
//! [`FrameTag`] enum and the [`FrameValue`] tagged union.

use nalgebra::{Vector3, Vector6};
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Frame markers
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for Cartesian reference frames.
pub trait Frame: Copy + Clone + fmt::Debug + PartialEq + 'static {
    /// Tag of a position expressed in this frame.
    const POSITION_TAG: FrameTag;
    /// Tag of a position + velocity state expressed in this frame.
    const STATE_TAG: FrameTag;
}

/// Earth-centred, Earth-fixed frame; rotates with the Earth.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ecef;

impl Frame for Ecef {
    const POSITION_TAG: FrameTag = FrameTag::Ecef;
    const STATE_TAG: FrameTag = FrameTag::EcefVel;
}

/// True-of-date Earth-centred inertial frame (true equator, true equinox).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TodEci;

impl Frame for TodEci {
    const POSITION_TAG: FrameTag = FrameTag::TodEci;
    const STATE_TAG: FrameTag = FrameTag::TodEciVel;
}

// ═══════════════════════════════════════════════════════════════════════════
// Position<F>
// ═══════════════════════════════════════════════════════════════════════════

/// Cartesian position in frame `F`, in the length unit of the ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position<F: Frame> {
    xyz: Vector3<f64>,
    _frame: PhantomData<F>,
}

pub type EcefPosition = Position<Ecef>;
pub type EciPosition = Position<TodEci>;

impl<F: Frame> Position<F> {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_vector(Vector3::new(x, y, z))
    }

    #[inline]
    pub const fn from_vector(xyz: Vector3<f64>) -> Self {
        Self {
            xyz,
            _frame: PhantomData,
        }
    }

    /// The raw position vector.
    #[inline]
    pub fn xyz(&self) -> Vector3<f64> {
        self.xyz
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.xyz.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.xyz.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.xyz.z
    }

    /// Distance from the frame origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.xyz.norm()
    }

    /// Lift to a state with zero velocity in the same frame.
    #[inline]
    pub fn at_rest(self) -> State<F> {
        State::new(self, Vector3::zeros())
    }
}

impl<F: Frame> From<[f64; 3]> for Position<F> {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<F: Frame> From<Vector3<f64>> for Position<F> {
    #[inline]
    fn from(xyz: Vector3<f64>) -> Self {
        Self::from_vector(xyz)
    }
}

impl<F: Frame> fmt::Display for Position<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            F::POSITION_TAG,
            self.xyz.x,
            self.xyz.y,
            self.xyz.z
        )
    }
}

#[cfg(feature = "serde")]
impl<F: Frame> Serialize for Position<F> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.xyz.x, self.xyz.y, self.xyz.z].serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, F: Frame> Deserialize<'de> for Position<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xyz = <[f64; 3]>::deserialize(deserializer)?;
        Ok(Self::from(xyz))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// State<F>
// ═══════════════════════════════════════════════════════════════════════════

/// Position and velocity in frame `F`.
///
/// Velocity is in ellipsoid length units per second.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct State<F: Frame> {
    position: Position<F>,
    velocity: Vector3<f64>,
}

pub type EcefState = State<Ecef>;
pub type EciState = State<TodEci>;

impl<F: Frame> State<F> {
    #[inline]
    pub const fn new(position: Position<F>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// Build from the six components `x, y, z, dx, dy, dz`.
    #[inline]
    pub fn from_components(x: f64, y: f64, z: f64, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(Position::new(x, y, z), Vector3::new(dx, dy, dz))
    }

    /// Build from a stacked `[position; velocity]` vector.
    #[inline]
    pub fn from_vector(v: Vector6<f64>) -> Self {
        Self::from_components(v[0], v[1], v[2], v[3], v[4], v[5])
    }

    #[inline]
    pub const fn position(&self) -> Position<F> {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// The stacked `[x, y, z, dx, dy, dz]` vector.
    pub fn vector(&self) -> Vector6<f64> {
        let p = self.position.xyz();
        let v = self.velocity;
        Vector6::new(p.x, p.y, p.z, v.x, v.y, v.z)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x()
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y()
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.position.z()
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.velocity.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.velocity.y
    }

    #[inline]
    pub fn dz(&self) -> f64 {
        self.velocity.z
    }

    /// Discard the velocity and keep the position.
    #[inline]
    pub const fn drop_velocity(self) -> Position<F> {
        self.position
    }
}

impl<F: Frame> From<Position<F>> for State<F> {
    #[inline]
    fn from(position: Position<F>) -> Self {
        position.at_rest()
    }
}

impl<F: Frame> fmt::Display for State<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position.xyz();
        let v = self.velocity;
        write!(
            f,
            "{} ({}, {}, {}) vel ({}, {}, {})",
            F::STATE_TAG,
            p.x,
            p.y,
            p.z,
            v.x,
            v.y,
            v.z
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Geodetic
// ═══════════════════════════════════════════════════════════════════════════

/// Latitude and longitude in degrees, altitude above the ellipsoid.
///
/// No range is enforced on construction: the conversion formulas are
/// well defined for any real angle.  Use [`Geodetic::normalized`] to bring a
/// value into the canonical ranges.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geodetic {
    lat_deg: f64,
    lon_deg: f64,
    alt: f64,
}

impl Geodetic {
    #[inline]
    pub const fn new(lat_deg: f64, lon_deg: f64, alt: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            alt,
        }
    }

    /// A point on the ellipsoid surface (altitude 0).
    #[inline]
    pub const fn on_surface(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg, lon_deg, 0.0)
    }

    #[inline]
    pub const fn lat(&self) -> f64 {
        self.lat_deg
    }

    #[inline]
    pub const fn lon(&self) -> f64 {
        self.lon_deg
    }

    #[inline]
    pub const fn alt(&self) -> f64 {
        self.alt
    }

    /// The raw `[lat°, lon°, alt]` vector.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.lat_deg, self.lon_deg, self.alt)
    }

    /// Same point with latitude in `[-90, 90]` and longitude in `[-180, 180)`.
    ///
    /// Latitudes past a pole are folded back over it, which moves the
    /// longitude by 180°.
    pub fn normalized(&self) -> Self {
        let mut lat = (self.lat_deg + 180.0).rem_euclid(360.0) - 180.0;
        let mut lon = self.lon_deg;
        if lat > 90.0 {
            lat = 180.0 - lat;
            lon += 180.0;
        } else if lat < -90.0 {
            lat = -180.0 - lat;
            lon += 180.0;
        }
        let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
        Self::new(lat, lon, self.alt)
    }
}

impl fmt::Display for Geodetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {}°, lon {}°, alt {}",
            self.lat_deg, self.lon_deg, self.alt
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Dynamic tagging
// ═══════════════════════════════════════════════════════════════════════════

/// The closed set of supported frames.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameTag {
    Geodetic,
    Ecef,
    EcefVel,
    TodEci,
    TodEciVel,
}

impl FrameTag {
    pub const ALL: [FrameTag; 5] = [
        FrameTag::Geodetic,
        FrameTag::Ecef,
        FrameTag::EcefVel,
        FrameTag::TodEci,
        FrameTag::TodEciVel,
    ];

    /// Whether values in this frame carry a velocity.
    #[inline]
    pub const fn has_velocity(self) -> bool {
        matches!(self, FrameTag::EcefVel | FrameTag::TodEciVel)
    }

    /// Whether this is one of the true-of-date inertial frames.
    #[inline]
    pub const fn is_inertial(self) -> bool {
        matches!(self, FrameTag::TodEci | FrameTag::TodEciVel)
    }

    pub const fn label(self) -> &'static str {
        match self {
            FrameTag::Geodetic => "Geodetic",
            FrameTag::Ecef => "ECEF",
            FrameTag::EcefVel => "ECEF-vel",
            FrameTag::TodEci => "TOD-ECI",
            FrameTag::TodEciVel => "TOD-ECI-vel",
        }
    }
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A coordinate value in any of the supported frames.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameValue {
    Geodetic(Geodetic),
    Ecef(EcefPosition),
    EcefVel(EcefState),
    TodEci(EciPosition),
    TodEciVel(EciState),
}

impl FrameValue {
    pub const fn tag(&self) -> FrameTag {
        match self {
            FrameValue::Geodetic(_) => FrameTag::Geodetic,
            FrameValue::Ecef(_) => FrameTag::Ecef,
            FrameValue::EcefVel(_) => FrameTag::EcefVel,
            FrameValue::TodEci(_) => FrameTag::TodEci,
            FrameValue::TodEciVel(_) => FrameTag::TodEciVel,
        }
    }

    pub const fn as_geodetic(&self) -> Option<Geodetic> {
        match self {
            FrameValue::Geodetic(g) => Some(*g),
            _ => None,
        }
    }

    pub const fn as_ecef(&self) -> Option<EcefPosition> {
        match self {
            FrameValue::Ecef(p) => Some(*p),
            _ => None,
        }
    }

    pub const fn as_ecef_state(&self) -> Option<EcefState> {
        match self {
            FrameValue::EcefVel(s) => Some(*s),
            _ => None,
        }
    }

    pub const fn as_eci(&self) -> Option<EciPosition> {
        match self {
            FrameValue::TodEci(p) => Some(*p),
            _ => None,
        }
    }

    pub const fn as_eci_state(&self) -> Option<EciState> {
        match self {
            FrameValue::TodEciVel(s) => Some(*s),
            _ => None,
        }
    }
}

impl From<Geodetic> for FrameValue {
    fn from(v: Geodetic) -> Self {
        FrameValue::Geodetic(v)
    }
}

impl From<EcefPosition> for FrameValue {
    fn from(v: EcefPosition) -> Self {
        FrameValue::Ecef(v)
    }
}

impl From<EcefState> for FrameValue {
    fn from(v: EcefState) -> Self {
        FrameValue::EcefVel(v)
    }
}

impl From<EciPosition> for FrameValue {
    fn from(v: EciPosition) -> Self {
        FrameValue::TodEci(v)
    }
}

impl From<EciState> for FrameValue {
    fn from(v: EciState) -> Self {
        FrameValue::TodEciVel(v)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
