use std::iter;

use crate::geometry::{SegmentKind, TrackPoint};

/// A fitted curve: the start point followed by the end point of every section
/// built from it, in order.
///
/// Each section end records the curvature and length of its section, so the
/// chain can be read back as `easement → static → … → easement`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    start: TrackPoint,
    sections: Vec<TrackPoint>,
}

impl Curve {
    pub(crate) fn new(start: TrackPoint, sections: Vec<TrackPoint>) -> Self {
        Self { start, sections }
    }

    #[must_use]
    pub fn start(&self) -> &TrackPoint {
        &self.start
    }

    /// The last point of the chain, which joins the target track.
    #[must_use]
    pub fn end(&self) -> &TrackPoint {
        self.sections.last().unwrap_or(&self.start)
    }

    /// Section end points, excluding the start.
    #[must_use]
    pub fn sections(&self) -> &[TrackPoint] {
        &self.sections
    }

    /// Iterates over the start and every section end.
    pub fn iter(&self) -> impl Iterator<Item = &TrackPoint> {
        iter::once(&self.start).chain(&self.sections)
    }

    /// Section ends of the constant-radius arcs.
    pub fn static_sections(&self) -> impl Iterator<Item = &TrackPoint> {
        self.sections
            .iter()
            .filter(|p| p.kind() == SegmentKind::Static)
    }

    /// Total arc length of the static sections.
    #[must_use]
    pub fn static_length(&self) -> f64 {
        self.static_sections()
            .filter_map(TrackPoint::origin_length)
            .sum()
    }

    /// Total arc length of every section.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.sections
            .iter()
            .filter_map(TrackPoint::origin_length)
            .sum()
    }

    /// Radius of the static arc, or `None` if the chain has none.
    #[must_use]
    pub fn static_radius(&self) -> Option<f64> {
        self.static_sections().next().map(TrackPoint::radius)
    }

    /// Moves every point of the chain by `(dx, dz)`.
    pub fn translate(&mut self, dx: f64, dz: f64) {
        self.start.translate(dx, dz);
        for point in &mut self.sections {
            point.translate(dx, dz);
        }
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a TrackPoint;
    type IntoIter = iter::Chain<iter::Once<&'a TrackPoint>, std::slice::Iter<'a, TrackPoint>>;

    fn into_iter(self) -> Self::IntoIter {
        iter::once(&self.start).chain(self.sections.iter())
    }
}
