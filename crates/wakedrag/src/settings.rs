use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use wakedrag_core::{IntegrationRule, SignCorrectionPolicy, WakeConfig};

pub const CONFIG_ENV: &str = "WAKEDRAG_CONFIG";

/// Configuration flags shared by every subcommand that runs the pipeline.
/// Anything given here wins over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// TOML config file; falls back to $WAKEDRAG_CONFIG
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Test-section width (m)
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<f64>,
    /// Test-section height (m)
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<f64>,
    /// Reference area (m²)
    #[arg(long, allow_negative_numbers = true)]
    pub area: Option<f64>,
    /// Freestream velocity (m/s)
    #[arg(long, allow_negative_numbers = true)]
    pub u_stream: Option<f64>,
    /// Freestream total pressure (Pa)
    #[arg(long, allow_negative_numbers = true)]
    pub p_tot_stream: Option<f64>,
    /// Fluid density (kg/m³)
    #[arg(long, allow_negative_numbers = true)]
    pub rho: Option<f64>,
    /// Position (mm) of the canonical wake column and the interpolation target
    #[arg(long, allow_negative_numbers = true)]
    pub reference_position: Option<f64>,
    /// disabled, all-negative, or the fraction of negative wake readings that triggers it
    #[arg(long)]
    pub sign_correction: Option<SignCorrectionPolicy>,
    /// leading-edge or trapezoidal
    #[arg(long)]
    pub integration: Option<IntegrationRule>,
}

impl Overrides {
    /// Explicit `--config` first, then the environment (including `.env`).
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Defaults, then the config file if any, then flags.
    pub fn resolve(&self) -> Result<WakeConfig> {
        let base = match self.config_path() {
            Some(path) => WakeConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => WakeConfig::default(),
        };
        let config = self.apply(base);
        config
            .options
            .validate()
            .context("invalid calculation options")?;
        Ok(config)
    }

    pub fn apply(&self, mut config: WakeConfig) -> WakeConfig {
        let constants = &mut config.constants;
        if let Some(width) = self.width {
            constants.width = width;
        }
        if let Some(height) = self.height {
            constants.height = height;
        }
        if let Some(area) = self.area {
            constants.area = area;
        }
        if let Some(velocity) = self.u_stream {
            constants.freestream_velocity = velocity;
        }
        if let Some(pressure) = self.p_tot_stream {
            constants.freestream_total_pressure = pressure;
        }
        if let Some(density) = self.rho {
            constants.density = density;
        }

        let options = &mut config.options;
        if let Some(position) = self.reference_position {
            options.reference_position_mm = position;
        }
        if let Some(policy) = self.sign_correction {
            options.sign_correction = policy;
        }
        if let Some(rule) = self.integration {
            options.integration = rule;
        }
        config
    }
}
