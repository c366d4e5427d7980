// src/city/layout.rs

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::bsp::{PartitionLimits, Rectangle, StreetPartition, StreetSegment};
use crate::city::config::CityConfig;
use crate::city::lots::{plan_blocks, BlockPlan, LotKind};
use crate::city::traffic::{place_street_lights, place_traffic_lights, StreetLight, TrafficLight};
use crate::error::Result;

/// Everything the scene builder needs to populate a city.
#[derive(Debug, Clone, Serialize)]
pub struct CityLayout {
    pub name: String,
    pub seed: u64,
    pub footprint: Rectangle,
    pub limits: PartitionLimits,
    pub streets: Vec<StreetSegment>,
    pub blocks: Vec<BlockPlan>,
    pub traffic_lights: Vec<TrafficLight>,
    pub street_lights: Vec<StreetLight>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    pub streets: usize,
    pub blocks: usize,
    pub houses: usize,
    pub parks: usize,
    pub fountain_parks: usize,
    pub traffic_lights: usize,
    pub street_lights: usize,
}

impl CityLayout {
    /// Generates a layout using the config's seed, or a fresh one.
    pub fn generate(config: &CityConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with_rng(config, seed, &mut rng)
    }

    /// Generates a layout drawing streets and traffic lights from `rng`;
    /// block plans are derived from `seed`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        config: &CityConfig,
        seed: u64,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let footprint = config.footprint();
        let limits = config.partition_limits()?;
        info!(
            "Generating city '{}' ({}x{}, seed {})",
            config.name, config.width, config.depth, seed
        );

        let partition = StreetPartition::build_with_limits(footprint, limits, rng)?;
        let streets = partition.street_segments();
        let blocks = plan_blocks(&partition.blocks(), &footprint, config.house_height, seed);
        let traffic_lights = place_traffic_lights(&streets, &footprint, rng);
        let street_lights = place_street_lights(&blocks);
        debug!(
            "Partition depth {}, {} traffic lights, {} street lights",
            partition.depth(),
            traffic_lights.len(),
            street_lights.len()
        );

        let layout = CityLayout {
            name: config.name.clone(),
            seed,
            footprint,
            limits,
            streets,
            blocks,
            traffic_lights,
            street_lights,
        };
        info!("City '{}' generated: {:?}", layout.name, layout.summary());
        Ok(layout)
    }

    pub fn summary(&self) -> LayoutSummary {
        let mut summary = LayoutSummary {
            streets: self.streets.len(),
            blocks: self.blocks.len(),
            traffic_lights: self.traffic_lights.len(),
            street_lights: self.street_lights.len(),
            ..Default::default()
        };
        for block in &self.blocks {
            match block.lot {
                LotKind::House { .. } => summary.houses += 1,
                LotKind::Park { .. } => summary.parks += 1,
                LotKind::FountainPark { .. } => summary.fountain_parks += 1,
            }
        }
        summary
    }
}
