use std::f64::consts::{FRAC_PI_2, PI};

use tracing::{debug, trace, warn};

use crate::error::{CoordError, FitError, Result};
use crate::geometry::TrackPoint;
use crate::math::{Bearing, Point2, TOLERANCE};
use crate::section::{Orientation, Section};

use super::{Curve, FitLength, FitPoint, FitRadius};

/// Decimal places to which two track bearings must agree to count as parallel.
pub(crate) const PARALLEL_PLACES: i32 = 7;

/// Shortest `max_static_length` accepted when splitting static arcs.
pub const MIN_STATIC_LENGTH: f64 = 1.0;

/// Most sections a single static arc is split into. Longer arcs are divided
/// evenly instead.
const MAX_STATIC_PIECES: usize = 10_000;

/// Parameters controlling how curves are fitted and assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSettings {
    /// Split static arcs longer than `max_static_length` into several sections.
    pub split_static: bool,
    /// Longest static section when `split_static` is set.
    pub max_static_length: f64,
    /// Decimal places of the distance between a point-fitted curve and the
    /// target track.
    pub tolerance_places: i32,
    /// Iteration budget of point fitting.
    pub point_iterations: usize,
    /// Decimal places to which a length-fitted static arc must match.
    pub length_places: i32,
    /// Iteration budget of length fitting.
    pub length_iterations: usize,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            split_static: false,
            max_static_length: 500.0,
            tolerance_places: 4,
            point_iterations: 100,
            length_places: 4,
            length_iterations: 50,
        }
    }
}

/// Fits easement curves from a start point to other tracks.
///
/// Every fitting call works on its own copy of the start, so a fitter can be
/// reused for any number of targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFitter {
    section: Section,
    settings: FitSettings,
}

impl CurveFitter {
    /// Creates a fitter for curves starting at `start`.
    ///
    /// `speed_tolerance` is in km/h.
    ///
    /// # Errors
    ///
    /// Returns an error if `minimum_radius` or `speed_tolerance` is not
    /// positive, or the start curvature is sharper than the minimum radius.
    pub fn new(start: TrackPoint, minimum_radius: f64, speed_tolerance: f64) -> Result<Self> {
        Ok(Self {
            section: Section::new(start, minimum_radius, speed_tolerance)?,
            settings: FitSettings::default(),
        })
    }

    /// Replaces the fitting settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_static_length` is not finite or is shorter
    /// than [`MIN_STATIC_LENGTH`].
    pub fn with_settings(mut self, settings: FitSettings) -> Result<Self> {
        let max = settings.max_static_length;
        if !max.is_finite() {
            return Err(CoordError::InvalidNumber {
                what: "maximum static length",
                value: max,
            }
            .into());
        }
        if max < MIN_STATIC_LENGTH {
            return Err(FitError::MaxStaticLengthTooShort {
                length: max,
                minimum: MIN_STATIC_LENGTH,
            }
            .into());
        }
        self.settings = settings;
        Ok(self)
    }

    #[must_use]
    pub fn start(&self) -> &TrackPoint {
        self.section.start()
    }

    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }

    #[must_use]
    pub fn settings(&self) -> &FitSettings {
        &self.settings
    }

    pub(crate) fn is_parallel(&self, other: &TrackPoint) -> bool {
        self.start()
            .bearing()
            .nearly_equal(other.bearing(), PARALLEL_PLACES, false)
    }

    pub(crate) fn is_anti_parallel(&self, other: &TrackPoint) -> bool {
        self.start()
            .bearing()
            .nearly_equal(other.bearing().flip(), PARALLEL_PLACES, false)
    }

    /// Bearing change needed to turn from the start onto `other`'s bearing,
    /// with the orientation of that turn.
    ///
    /// With `Orientation::Unresolved` the shorter turn is chosen. A forced
    /// orientation that disagrees with it yields the longer way round. For
    /// anti-parallel tracks the turn is always half a revolution towards the
    /// side `other` lies on.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracks are parallel, `other` lies on the start
    /// alignment in the opposite direction, or a forced orientation turns away
    /// from an anti-parallel track.
    pub fn directed_difference(
        &self,
        other: &TrackPoint,
        orientation: Orientation,
    ) -> Result<(Bearing, Orientation)> {
        if self.is_parallel(other) {
            return Err(FitError::Parallel.into());
        }
        let start = self.start();
        let (a, b) = (start.bearing(), other.bearing());

        let anti_parallel = self.is_anti_parallel(other);
        let (diff, natural) = if anti_parallel {
            let line = start.tangent();
            if line.distance(other.position()) < TOLERANCE {
                return Err(FitError::SameAlignment.into());
            }
            let (dx, dz) = (a + FRAC_PI_2).direction();
            let right = Point2::new(start.x() + dx, start.z() + dz);
            let natural = if line.same_side(other.position(), &right) {
                Orientation::Clockwise
            } else {
                Orientation::CounterClockwise
            };
            (Bearing::wrap(PI), natural)
        } else if a - b > b - a {
            (b - a, Orientation::Clockwise)
        } else {
            (a - b, Orientation::CounterClockwise)
        };

        match orientation {
            Orientation::Unresolved => Ok((diff, natural)),
            forced if forced == natural => Ok((diff, natural)),
            _ if anti_parallel => Err(FitError::CurvedAway.into()),
            forced => Ok((-diff, forced)),
        }
    }

    /// Checks whether the start heads towards `other`, i.e. whether carrying
    /// on past the crossing of the two alignments leads to the far side of
    /// `other`.
    ///
    /// Anti-parallel tracks never count as aligned.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracks are parallel.
    pub fn check_start_alignment(&self, other: &TrackPoint) -> Result<bool> {
        if self.is_parallel(other) {
            return Err(FitError::Parallel.into());
        }
        if self.is_anti_parallel(other) {
            return Ok(false);
        }
        let start = self.start();
        let first = other.tangent();
        let crossing = first.intersect(&start.tangent())?;
        let (dx, dz) = start.bearing().direction();
        let beyond = Point2::new(crossing.x + dx, crossing.y + dz);
        Ok(!first.same_side(&beyond, start.position()))
    }

    /// Fits a curve with a static arc of `radius` between the start and
    /// `other`, both straight.
    ///
    /// # Errors
    ///
    /// See [`FitRadius::execute`].
    pub fn fit_by_radius(
        &self,
        other: &TrackPoint,
        radius: f64,
        orientation: Orientation,
    ) -> Result<Curve> {
        FitRadius::new(*other, radius)
            .with_orientation(orientation)
            .execute(self)
    }

    /// Fits a curve whose static arcs total `length` between the start and
    /// `other`, both straight.
    ///
    /// # Errors
    ///
    /// See [`FitLength::execute`].
    pub fn fit_by_length(
        &self,
        other: &TrackPoint,
        length: f64,
        orientation: Orientation,
    ) -> Result<Curve> {
        FitLength::new(*other, length)
            .with_orientation(orientation)
            .execute(self)
    }

    /// Extends a curve from the start, which may be curved, until it joins
    /// the straight track `other`.
    ///
    /// If `add_point` is given the start curvature is first set to the arc
    /// through the start and `add_point`.
    ///
    /// # Errors
    ///
    /// See [`FitPoint::execute`].
    pub fn fit_to_point(&self, other: &TrackPoint, add_point: Option<&TrackPoint>) -> Result<Curve> {
        let mut fit = FitPoint::new(*other);
        if let Some(add_point) = add_point {
            fit = fit.with_add_point(*add_point);
        }
        fit.execute(self)
    }

    /// Builds `easement → static arc(s) → easement` from the start of
    /// `section`.
    ///
    /// The leading easement is skipped when the start already has
    /// `curvature`. The static arc turns through `static_angle` radians.
    pub(crate) fn assemble(
        &self,
        section: &Section,
        curvature: f64,
        static_angle: f64,
    ) -> Result<Curve> {
        let start = *section.start();
        let mut sections = Vec::new();
        let mut last = start;

        if start.curvature() != curvature {
            last = section.easement(curvature)?;
            sections.push(last);
        }
        for angle in self.static_angles(curvature, static_angle) {
            last = section.continue_from(last).static_arc(angle)?;
            sections.push(last);
        }
        sections.push(section.continue_from(last).easement(0.0)?);

        trace!(curvature, static_angle, sections = sections.len(), "assembled curve");
        Ok(Curve::new(start, sections))
    }

    fn static_angles(&self, curvature: f64, angle: f64) -> Vec<f64> {
        let max = self.settings.max_static_length;
        let length = angle / curvature.abs();
        if !self.settings.split_static || length <= max {
            return vec![angle];
        }

        let whole = (length / max).floor();
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_STATIC_PIECES as f64;
        if whole >= limit {
            warn!(length, max, pieces = MAX_STATIC_PIECES, "static arc split evenly");
            return vec![angle / limit; MAX_STATIC_PIECES];
        }

        let step = max * curvature.abs();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut angles = vec![step; whole as usize];
        let remaining = angle - whole * step;
        if remaining > TOLERANCE {
            angles.push(remaining);
        }
        debug!(length, pieces = angles.len(), "split static arc");
        angles
    }
}
