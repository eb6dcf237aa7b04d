use thiserror::Error;

/// Top-level error type for easement curve calculations.
#[derive(Debug, Error)]
pub enum EasementError {
    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Section(#[from] SectionError),

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Errors raised while building points and other input values.
#[derive(Debug, Error)]
pub enum CoordError {
    #[error("{what} must be a finite number, got {value}")]
    InvalidNumber { what: &'static str, value: f64 },

    #[error("the y-axis rotation {0} must be in the range [-90, 90]")]
    RotationOutOfRange(f64),

    #[error("{0:?} is not a valid quadrant")]
    InvalidQuadrant(String),

    #[error("{0:?} is not a valid speed; expected a value followed by mph, kph, kmh or km/h")]
    InvalidSpeed(String),
}

/// Errors related to single track sections.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("the minimum radius of curvature must be positive, got {0}")]
    NonPositiveMinimumRadius(f64),

    #[error("the speed tolerance must be positive, got {0}")]
    NonPositiveSpeed(f64),

    #[error("curvature {curvature} exceeds the bound set by the minimum radius {minimum_radius}")]
    CurvatureExceedsMinimum { curvature: f64, minimum_radius: f64 },

    #[error("the ending curvature is the same as the starting curvature")]
    SameCurvature,

    #[error("starting and ending curvature must both be >= 0 or <= 0 (start {start}, end {end})")]
    OppositeCurvature { start: f64, end: f64 },

    #[error("a curve cannot be formed from a pair of points already on the same line")]
    CollinearPoints,

    #[error("cannot build a static curve from a straight track")]
    StraightStaticArc,

    #[error("the starting curvature must be zero to build a straight section")]
    CurvedStraight,

    #[error("the arc orientation has not been resolved")]
    OrientationUnresolved,
}

/// Errors related to fitting multi-section curves between tracks.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("both tracks must be straight")]
    NotStraight,

    #[error("the end track must be straight")]
    EndNotStraight,

    #[error("lines cannot be parallel")]
    Parallel,

    #[error("this method does not work with tracks parallel in opposite directions")]
    AntiParallel,

    #[error("the starting track is curved away from the other track, cannot fit a curve")]
    CurvedAway,

    #[error("the curved starting track is not aligned with the target track")]
    CurvedTrackNotAligned,

    #[error("the other track is on the same alignment as the starting track")]
    SameAlignment,

    #[error("the easement curves are too long to fit within the curve; consider increasing the radius")]
    EasementsTooLong,

    #[error("the starting point is too close to the target track for this curve")]
    TooClose,

    #[error("radius {radius} must be at least the minimum radius of curvature {minimum_radius}")]
    RadiusBelowMinimum { radius: f64, minimum_radius: f64 },

    #[error("the required radius of curvature is smaller than the minimum")]
    RequiredRadiusBelowMinimum,

    #[error("static length {length} is shorter than the arc at the minimum radius")]
    LengthBelowMinimumRadius { length: f64 },

    #[error("maximum static length {length} must be at least {minimum}")]
    MaxStaticLengthTooShort { length: f64, minimum: f64 },

    #[error("no suitable alignment found after {iterations} iterations")]
    NoAlignment { iterations: usize },
}

/// Convenience type alias for results using [`EasementError`].
pub type Result<T> = std::result::Result<T, EasementError>;
