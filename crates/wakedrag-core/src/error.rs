// crates/wakedrag-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Structured failure of a drag calculation. Every variant is recoverable and
/// meant to be shown to the user; see [`CalculationError::message`] for the
/// short form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("no data uploaded: the measurement table has no rows")]
    EmptyInput,

    #[error("invalid constants: {} must be positive", .fields.join(", "))]
    InvalidConstants { fields: Vec<&'static str> },

    #[error("no total-pressure column found; expected a column starting with '{prefix}'")]
    MissingWakeColumn { prefix: &'static str },

    #[error(
        "wake pressure exceeds freestream: {column} = {wake_pressure} Pa at z = {position_mm} mm \
         is not below P_tot_stream = {freestream_pressure} Pa"
    )]
    PhysicallyInconsistentData {
        column: String,
        position_mm: f64,
        wake_pressure: f64,
        freestream_pressure: f64,
    },

    #[error("invalid coefficient: C_D evaluated to {value}")]
    NonFiniteResult { value: f64 },

    #[error("insufficient data: {rows} usable row(s), at least 2 are required")]
    InsufficientData { rows: usize },
}

impl CalculationError {
    pub fn message(&self) -> &'static str {
        match self {
            CalculationError::EmptyInput => "no data uploaded",
            CalculationError::InvalidConstants { .. } => "invalid constants",
            CalculationError::MissingWakeColumn { .. } => "missing wake pressure column",
            CalculationError::PhysicallyInconsistentData { .. } => {
                "wake pressure exceeds freestream"
            }
            CalculationError::NonFiniteResult { .. } => "invalid coefficient",
            CalculationError::InsufficientData { .. } => "insufficient data",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid option: {message}")]
    InvalidOption { message: String },

    #[error("config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CalculationError>;
