//! Core module - reliability computation, configuration and data loading

pub mod config;
pub mod forecast;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod reliability;

pub use config::{Config, ConfigError};
pub use forecast::{forecast, ForecastRecord};
pub use loader::LoadError;
pub use pipeline::{EventFilter, Pipeline, PipelineOutput, PipelineParams, Summary};
pub use reliability::{
    mtbf_by_ata, mtbf_by_component, Grouping, InsufficientData, ReliabilityRecord,
    ReliabilityTable, SortOrder,
};
