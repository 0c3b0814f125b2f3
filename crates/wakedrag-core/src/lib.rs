//! Wake-survey drag calculation.
//!
//! The pipeline runs in a fixed order: schema discovery -> normalization ->
//! interpolation at the reference position -> sign correction -> wake
//! integration -> drag coefficient. Every step is a plain synchronous
//! function; [`pipeline::calculate`] strings them together.

pub mod coefficient;
pub mod config;
pub mod correction;
pub mod error;
pub mod integrate;
pub mod interpolate;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod schema;

pub use config::{
    CalculationOptions, IntegrationRule, PhysicalConstants, SignCorrectionPolicy, WakeConfig,
};
pub use error::{CalculationError, ConfigError};
pub use normalize::{MeasurementRow, MeasurementTable};
pub use pipeline::{calculate, CalculationResult, WakeCalculator};
pub use profile::{WakeProfile, WakeSegment};
pub use schema::TableSchema;
