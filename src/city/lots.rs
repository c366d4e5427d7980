// src/city/lots.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::bsp::{Point2D, Rectangle};
use crate::city::config::Range;
use crate::utils::util::{clamp, sub_seed, uniform_or_low};

/// Pavement margin between a block's bounds and its usable area.
pub const BLOCK_MARGIN: f64 = 4.0;
/// Setback between the usable area and a house.
pub const HOUSE_MARGIN: f64 = 4.0;
/// Setback between the usable area and a park.
pub const PARK_MARGIN: f64 = 3.0;
/// Number of concentric height zones.
pub const ZONE_COUNT: usize = 6;

const HOUSE_PROBABILITY: f64 = 0.8;
const FOUNTAIN_PARK_PROBABILITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum HouseShape {
    Box { width: f64, depth: f64 },
    Cylinder { radius: f64, sides: u32 },
    Pipe { radius: f64, sides: u32, thickness: f64 },
}

/// What a block is used for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LotKind {
    House { height: u32, shape: HouseShape },
    FountainPark { width: f64, depth: f64 },
    Park { width: f64, depth: f64 },
}

/// Placement plan for a single block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockPlan {
    pub index: usize,
    pub bounds: Rectangle,
    pub center: Point2D,
    /// Usable width once the pavement margin is removed.
    pub width: f64,
    /// Usable depth once the pavement margin is removed.
    pub depth: f64,
    /// Height zone, 0 at the city center.
    pub zone: usize,
    pub lot: LotKind,
}

/// Height range for each zone, from the center outwards. Houses get lower
/// the further they stand from the center.
pub fn zone_heights(house_height: Range) -> [Range; ZONE_COUNT] {
    let top = house_height.max;
    let step = (house_height.max - house_height.min) / 9.0;
    let at = |n: f64| top - step * n;
    [
        Range::new(at(2.0), top),
        Range::new(at(4.0), at(2.0)),
        Range::new(at(6.0), at(4.0)),
        Range::new(at(7.0), at(6.0)),
        Range::new(at(8.0), at(6.0)),
        Range::new(at(9.0), at(8.0)),
    ]
}

/// Zone of a point, from its distance to the center of `footprint`.
pub fn zone_of(point: &Point2D, footprint: &Rectangle) -> usize {
    let reach = (footprint.width() / 2.0).hypot(footprint.depth() / 2.0);
    if reach <= 0.0 {
        return 0;
    }
    let zone_width = reach / ZONE_COUNT as f64;
    let zone = (point.distance_to(&footprint.center()) / zone_width).floor();
    clamp(zone, 0.0, (ZONE_COUNT - 1) as f64) as usize
}

/// Plans every block. Each block draws from its own stream derived from
/// `seed`, so the result does not depend on how rayon schedules the work.
pub fn plan_blocks(
    blocks: &[Rectangle],
    footprint: &Rectangle,
    house_height: Range,
    seed: u64,
) -> Vec<BlockPlan> {
    let heights = zone_heights(house_height);
    blocks
        .par_iter()
        .enumerate()
        .map(|(index, bounds)| {
            let mut rng = StdRng::seed_from_u64(sub_seed(seed, index));
            plan_block(index, bounds, footprint, &heights, &mut rng)
        })
        .collect()
}

pub fn plan_block<R: Rng + ?Sized>(
    index: usize,
    bounds: &Rectangle,
    footprint: &Rectangle,
    heights: &[Range; ZONE_COUNT],
    rng: &mut R,
) -> BlockPlan {
    let center = bounds.center();
    let width = (bounds.width() - BLOCK_MARGIN).max(0.0);
    let depth = (bounds.depth() - BLOCK_MARGIN).max(0.0);
    let zone = zone_of(&center, footprint);

    let roll: f64 = rng.random();
    let lot = if roll < HOUSE_PROBABILITY {
        let range = heights[zone];
        let height = uniform_or_low(rng, range.min, range.max).floor().max(0.0) as u32;
        let shape = house_shape(
            (width - HOUSE_MARGIN).max(0.0),
            (depth - HOUSE_MARGIN).max(0.0),
            rng,
        );
        LotKind::House { height, shape }
    } else if roll < HOUSE_PROBABILITY + FOUNTAIN_PARK_PROBABILITY {
        LotKind::FountainPark {
            width: (width - PARK_MARGIN).max(0.0),
            depth: (depth - PARK_MARGIN).max(0.0),
        }
    } else {
        LotKind::Park {
            width: (width - PARK_MARGIN).max(0.0),
            depth: (depth - PARK_MARGIN).max(0.0),
        }
    };

    BlockPlan {
        index,
        bounds: *bounds,
        center,
        width,
        depth,
        zone,
        lot,
    }
}

fn house_shape<R: Rng + ?Sized>(width: f64, depth: f64, rng: &mut R) -> HouseShape {
    let radius = width.min(depth) / 2.0;
    match rng.random_range(0..3) {
        0 => HouseShape::Box { width, depth },
        1 => HouseShape::Cylinder {
            radius,
            sides: rng.random_range(3..=20),
        },
        _ => {
            let sides = rng.random_range(3..=20);
            let low = (radius - 0.2).min(1.0);
            let high = (radius - 2.0).max((radius - 0.5).min(1.1));
            let thickness = uniform_or_low(rng, low, high).max(0.0);
            HouseShape::Pipe {
                radius,
                sides,
                thickness,
            }
        }
    }
}
