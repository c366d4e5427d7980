// src/bsp/bsp_node.rs

use serde::Serialize;

use crate::bsp::{Point2D, Rectangle, SplitOrientation};

/// Index of a `SplitNode` inside its partition's node arena.
pub type NodeId = usize;

/// A street: one split of the partition tree. Each node has:
/// - the `orientation` and `coordinate` of the cut,
/// - the street's endpoints, spanning the rectangle it divides,
/// - optionally a `smaller` child (toward the minimum corner) and a `larger`
///   child (toward the maximum corner). A missing child means that side is
///   an undivided block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitNode {
    pub orientation: SplitOrientation,
    pub coordinate: f64,
    pub segment_start: Point2D,
    pub segment_end: Point2D,
    pub smaller: Option<NodeId>,
    pub larger: Option<NodeId>,
}

impl SplitNode {
    /// Create a childless split of `bounds` at `coordinate`.
    pub fn new(orientation: SplitOrientation, coordinate: f64, bounds: &Rectangle) -> Self {
        let (segment_start, segment_end) = match orientation {
            SplitOrientation::Horizontal => (
                Point2D::new(bounds.min.x, coordinate),
                Point2D::new(bounds.max.x, coordinate),
            ),
            SplitOrientation::Vertical => (
                Point2D::new(coordinate, bounds.min.z),
                Point2D::new(coordinate, bounds.max.z),
            ),
        };
        SplitNode {
            orientation,
            coordinate,
            segment_start,
            segment_end,
            smaller: None,
            larger: None,
        }
    }

    /// Bounds of the smaller side, given the bounds this node splits.
    pub fn smaller_bounds(&self, parent: &Rectangle) -> Rectangle {
        Rectangle::new(parent.min, self.segment_end)
    }

    /// Bounds of the larger side, given the bounds this node splits.
    pub fn larger_bounds(&self, parent: &Rectangle) -> Rectangle {
        Rectangle::new(self.segment_start, parent.max)
    }
}
