// src/city/traffic.rs

use rand::Rng;
use serde::Serialize;

use crate::bsp::{Point2D, Rectangle, SplitOrientation, StreetSegment};
use crate::city::lots::BlockPlan;

/// Spacing used to decide how many street lights fit along a block edge.
pub const STREET_LIGHT_SPACING: f64 = 5.0;
/// Inset of street lights from the edge of a block's usable area.
pub const STREET_LIGHT_INSET: f64 = 0.2;

/// Which lamps of a traffic light are lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Red,
    RedYellow,
    Yellow,
    Green,
}

impl Signal {
    /// Red 40%, green 40%, yellow 10%, red-yellow 10%.
    pub fn from_roll(roll: f64) -> Self {
        if roll > 0.6 {
            Signal::Red
        } else if roll > 0.2 {
            Signal::Green
        } else if roll > 0.1 {
            Signal::Yellow
        } else {
            Signal::RedYellow
        }
    }
}

/// Which end of its street a traffic light stands at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreetEnd {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrafficLight {
    pub position: Point2D,
    pub orientation: SplitOrientation,
    pub end: StreetEnd,
    pub signal: Signal,
}

/// Which side of its block a street light stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockEdge {
    Near,
    Far,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreetLight {
    pub block: usize,
    pub position: Point2D,
    pub edge: BlockEdge,
}

/// Places a traffic light at each end of every street, except where the end
/// meets the outer edge of the city: only junctions with another street get
/// one.
pub fn place_traffic_lights<R: Rng + ?Sized>(
    segments: &[StreetSegment],
    footprint: &Rectangle,
    rng: &mut R,
) -> Vec<TrafficLight> {
    let mut lights = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        // Both signals are drawn even when an end is skipped so the stream
        // stays aligned with the street order.
        let start_signal = Signal::from_roll(rng.random());
        let end_signal = Signal::from_roll(rng.random());
        // A street's coordinate lies strictly inside the city, so an end
        // can only touch the edge along the street's own direction.
        if !footprint.is_on_boundary(&segment.start) {
            lights.push(TrafficLight {
                position: segment.start,
                orientation: segment.orientation,
                end: StreetEnd::Start,
                signal: start_signal,
            });
        }
        if !footprint.is_on_boundary(&segment.end) {
            lights.push(TrafficLight {
                position: segment.end,
                orientation: segment.orientation,
                end: StreetEnd::End,
                signal: end_signal,
            });
        }
    }
    lights
}

/// Spreads street lights evenly around the usable area of every block.
pub fn place_street_lights(blocks: &[BlockPlan]) -> Vec<StreetLight> {
    let mut lights = Vec::new();
    for block in blocks {
        let half_w = block.width / 2.0;
        let half_d = block.depth / 2.0;
        let (cx, cz) = (block.center.x, block.center.z);

        let (along_width, width_step) = lights_along(block.width);
        for j in 0..along_width {
            let x = cx - half_w + (j + 1) as f64 * width_step;
            lights.push(StreetLight {
                block: block.index,
                position: Point2D::new(x, cz - half_d + STREET_LIGHT_INSET),
                edge: BlockEdge::Near,
            });
            lights.push(StreetLight {
                block: block.index,
                position: Point2D::new(x, cz + half_d - STREET_LIGHT_INSET),
                edge: BlockEdge::Far,
            });
        }

        let (along_depth, depth_step) = lights_along(block.depth);
        for j in 0..along_depth {
            let z = cz - half_d + (j + 1) as f64 * depth_step;
            lights.push(StreetLight {
                block: block.index,
                position: Point2D::new(cx - half_w + STREET_LIGHT_INSET, z),
                edge: BlockEdge::Left,
            });
            lights.push(StreetLight {
                block: block.index,
                position: Point2D::new(cx + half_w - STREET_LIGHT_INSET, z),
                edge: BlockEdge::Right,
            });
        }
    }
    lights
}

/// Number of lights along an edge of `length`, and the distance between them.
fn lights_along(length: f64) -> (usize, f64) {
    let count = (length / STREET_LIGHT_SPACING - 1.0).max(0.0) as usize;
    (count, length / (count + 1) as f64)
}
