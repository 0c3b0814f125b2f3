use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, ConfigError};

pub const DEFAULT_REFERENCE_POSITION_MM: f64 = 10.0;

/// Tunnel geometry and freestream state for one calculation. Field names on the
/// wire follow the labels used on measurement sheets (`U_stream`, `rho`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicalConstants {
    /// Test-section width (m).
    pub width: f64,
    /// Test-section height (m).
    pub height: f64,
    /// Reference area (m²).
    pub area: f64,
    /// Freestream velocity (m/s).
    #[serde(rename = "U_stream")]
    pub freestream_velocity: f64,
    /// Freestream total pressure (Pa).
    #[serde(rename = "P_tot_stream")]
    pub freestream_total_pressure: f64,
    /// Fluid density (kg/m³).
    #[serde(rename = "rho")]
    pub density: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            width: 0.1,
            height: 0.089,
            area: 0.0089,
            freestream_velocity: 10.0,
            freestream_total_pressure: 104_800.0,
            density: 1.225,
        }
    }
}

impl PhysicalConstants {
    /// Width, area, freestream velocity and density must be strictly positive.
    /// NaN counts as non-positive.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), CalculationError> {
        let checks = [
            ("width", self.width),
            ("area", self.area),
            ("U_stream", self.freestream_velocity),
            ("rho", self.density),
        ];
        let fields: Vec<&'static str> = checks
            .iter()
            .filter(|(_, value)| !(*value > 0.0))
            .map(|(name, _)| *name)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CalculationError::InvalidConstants { fields })
        }
    }

    /// `0.5 * rho * U_stream²`
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density * self.freestream_velocity.powi(2)
    }
}

/// When to repair total-pressure readings that were logged relative to
/// atmosphere instead of absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SignCorrectionPolicy {
    Disabled,
    /// Correct only when every wake reading is negative.
    #[default]
    AllNegative,
    /// Correct when at least this fraction of wake readings is negative.
    Threshold { min_negative_fraction: f64 },
}

impl SignCorrectionPolicy {
    /// Threshold policy; the fraction must lie in `(0, 1]`.
    pub fn threshold(min_negative_fraction: f64) -> Result<Self, String> {
        let policy = SignCorrectionPolicy::Threshold {
            min_negative_fraction,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), String> {
        if let SignCorrectionPolicy::Threshold {
            min_negative_fraction,
        } = self
        {
            let fraction = *min_negative_fraction;
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(format!("negative fraction {fraction} must lie in (0, 1]"));
            }
        }
        Ok(())
    }

    /// Never fires without at least one negative reading.
    pub fn triggers(&self, negative: usize, total: usize) -> bool {
        if total == 0 || negative == 0 {
            return false;
        }
        match self {
            SignCorrectionPolicy::Disabled => false,
            SignCorrectionPolicy::AllNegative => negative == total,
            SignCorrectionPolicy::Threshold {
                min_negative_fraction,
            } => negative as f64 / total as f64 >= *min_negative_fraction,
        }
    }
}

impl fmt::Display for SignCorrectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignCorrectionPolicy::Disabled => f.write_str("disabled"),
            SignCorrectionPolicy::AllNegative => f.write_str("all-negative"),
            SignCorrectionPolicy::Threshold {
                min_negative_fraction,
            } => write!(f, "threshold({min_negative_fraction})"),
        }
    }
}

impl FromStr for SignCorrectionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Ok(SignCorrectionPolicy::Disabled),
            "all-negative" | "all_negative" | "on" => Ok(SignCorrectionPolicy::AllNegative),
            other => {
                let fraction: f64 = other.parse().map_err(|_| {
                    format!(
                        "unknown sign correction '{other}'; expected disabled, all-negative or a fraction in (0, 1]"
                    )
                })?;
                SignCorrectionPolicy::threshold(fraction)
            }
        }
    }
}

/// How a segment between two traverse points is integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationRule {
    /// The segment takes the momentum flux of its lower-z row.
    #[default]
    LeadingEdge,
    /// The segment takes the mean momentum flux of both rows.
    Trapezoidal,
}

impl fmt::Display for IntegrationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationRule::LeadingEdge => f.write_str("leading-edge"),
            IntegrationRule::Trapezoidal => f.write_str("trapezoidal"),
        }
    }
}

impl FromStr for IntegrationRule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leading-edge" | "leading_edge" | "leading" => Ok(IntegrationRule::LeadingEdge),
            "trapezoidal" | "trapezoid" => Ok(IntegrationRule::Trapezoidal),
            other => Err(format!(
                "unknown integration rule '{other}'; expected leading-edge or trapezoidal"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationOptions {
    pub reference_position_mm: f64,
    pub integration: IntegrationRule,
    pub sign_correction: SignCorrectionPolicy,
}

impl CalculationOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference_position_mm.is_finite() {
            return Err(ConfigError::InvalidOption {
                message: format!(
                    "reference_position_mm must be finite, got {}",
                    self.reference_position_mm
                ),
            });
        }
        self.sign_correction
            .validate()
            .map_err(|message| ConfigError::InvalidOption { message })
    }
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            reference_position_mm: DEFAULT_REFERENCE_POSITION_MM,
            integration: IntegrationRule::default(),
            sign_correction: SignCorrectionPolicy::default(),
        }
    }
}

/// On-disk configuration: a `[constants]` table and an `[options]` table, both
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WakeConfig {
    pub constants: PhysicalConstants,
    pub options: CalculationOptions,
}

impl WakeConfig {
    /// Parses and validates; a threshold outside `(0, 1]` is rejected here
    /// rather than silently never (or always) firing.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.options.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
