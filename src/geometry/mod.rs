mod track_point;

pub use track_point::{Direction, Quadrant, SegmentKind, TrackPoint};
