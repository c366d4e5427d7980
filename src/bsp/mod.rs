// src/bsp/mod.rs
pub mod bsp_node;
pub mod bsp_partition;
mod bsp_util;
pub use bsp_node::{NodeId, SplitNode};
pub use bsp_partition::{PartitionLimits, StreetPartition, StreetSegment};
pub use bsp_util::{Point2D, Rectangle}; // Re-export geometry types

use serde::{Deserialize, Serialize};

/// Probability threshold for the axis draw when both sides of a rectangle
/// exceed the maximum block size.
pub const LONG_SIDE_THRESHOLD: f64 = 0.8;
pub const EPSILON: f64 = 1e-6; // For floating-point comparisons

/// Direction of a street.
///
/// `Horizontal` streets run parallel to the x-axis (constant z) and cut the
/// rectangle's depth; `Vertical` streets run parallel to the z-axis
/// (constant x) and cut its width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    Horizontal,
    Vertical,
}

impl SplitOrientation {
    pub fn other(self) -> Self {
        match self {
            SplitOrientation::Horizontal => SplitOrientation::Vertical,
            SplitOrientation::Vertical => SplitOrientation::Horizontal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SplitOrientation::Horizontal => "horizontal",
            SplitOrientation::Vertical => "vertical",
        }
    }
}
