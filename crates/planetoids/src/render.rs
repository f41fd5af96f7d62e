//! Frame sinks.
//!
//! Entities describe themselves to a [`FrameSink`] one primitive at a
//! time; what the sink does with them is its own business. The
//! simulation ships with [`RecordingSink`], which simply keeps the
//! primitives of the current frame so drivers can report them and
//! tests can assert on them. A windowed front end would implement the
//! same trait against its graphics API.

use sim_core::math::Point2;

/// Receiver for one frame's worth of draw primitives.
pub trait FrameSink {
    /// A circle outline.
    fn circle(&mut self, center: Point2, radius: f32);

    /// A closed hull through `vertices` in order.
    fn hull(&mut self, vertices: &[Point2]);

    /// A line segment.
    fn segment(&mut self, start: Point2, end: Point2);

    /// A single point marker.
    fn point(&mut self, position: Point2);

    /// A text label anchored at `anchor`.
    fn text(&mut self, anchor: Point2, content: &str);
}

/// One recorded draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Circle outline.
    Circle {
        /// Centre position.
        center: Point2,
        /// Circle radius.
        radius: f32,
    },
    /// Closed hull.
    Hull {
        /// Hull vertices in draw order.
        vertices: Vec<Point2>,
    },
    /// Line segment.
    Segment {
        /// Segment start.
        start: Point2,
        /// Segment end.
        end: Point2,
    },
    /// Point marker.
    Point {
        /// Marker position.
        position: Point2,
    },
    /// Text label.
    Text {
        /// Anchor position.
        anchor: Point2,
        /// Label contents.
        content: String,
    },
}

/// Sink that records every primitive it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Vec<DrawOp>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives recorded since the last [`clear`](Self::clear).
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Contents of every recorded text label, in draw order.
    #[must_use]
    pub fn text_contents(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl FrameSink for RecordingSink {
    fn circle(&mut self, center: Point2, radius: f32) {
        self.ops.push(DrawOp::Circle { center, radius });
    }

    fn hull(&mut self, vertices: &[Point2]) {
        self.ops.push(DrawOp::Hull {
            vertices: vertices.to_vec(),
        });
    }

    fn segment(&mut self, start: Point2, end: Point2) {
        self.ops.push(DrawOp::Segment { start, end });
    }

    fn point(&mut self, position: Point2) {
        self.ops.push(DrawOp::Point { position });
    }

    fn text(&mut self, anchor: Point2, content: &str) {
        self.ops.push(DrawOp::Text {
            anchor,
            content: content.to_string(),
        });
    }
}
