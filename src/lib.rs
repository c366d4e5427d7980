// src/lib.rs

pub mod bsp;
pub mod city;
pub mod error;
pub mod utils;

pub use bsp::{Point2D, Rectangle, SplitNode, SplitOrientation, StreetPartition, StreetSegment};
pub use city::{CityConfig, CityLayout};
pub use error::CityError;
