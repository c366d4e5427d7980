// src/city/mod.rs
pub mod config;
pub mod layout;
pub mod lots;
pub mod traffic;

pub use config::{CityConfig, Range};
pub use layout::{CityLayout, LayoutSummary};
pub use lots::{BlockPlan, HouseShape, LotKind};
pub use traffic::{Signal, StreetLight, TrafficLight};
