use crate::ambiguity::DensityNormalization;
use crate::error::{QcError, Result};
use crate::metrics::CoverageThresholdPolicy;
use crate::primers::PrimerNaming;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub primers: PrimerNaming,
    pub coverage: CoverageConfig,
    pub ambiguity: AmbiguityConfig,
    pub plot: PlotConfig,
    pub policy: CoverageThresholdPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub min_depth: u32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { min_depth: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityConfig {
    pub density_window: usize,
    pub density_normalization: DensityNormalization,
}

impl Default for AmbiguityConfig {
    fn default() -> Self {
        Self {
            density_window: 10,
            density_normalization: DensityNormalization::Nominal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub moving_average_window: usize,
    pub max_y_axis_exponent: i32,
    /// Figure width in inches.
    pub width: f64,
    /// Figure height in inches.
    pub height: f64,
    pub pixels_per_inch: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            moving_average_window: 200,
            max_y_axis_exponent: 4,
            width: 36.0,
            height: 6.0,
            pixels_per_inch: 50.0,
        }
    }
}

impl Config {
    /// Loads `explicit` if given, otherwise the per-user config file if one exists,
    /// otherwise the defaults.
    ///
    /// Errors in an explicitly named file are fatal; a broken per-user file is reported
    /// and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Ignoring unusable config file: {}", e),
                }
            }
        }
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| QcError::io(path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| QcError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "amplicon-qc", "amplicon-qc")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Checks values that would otherwise surface as silent nonsense downstream.
    pub fn validate(&self) -> Result<()> {
        if self.primers.delimiter.is_empty() {
            return Err(QcError::Config("primer name delimiter must not be empty".into()));
        }
        if self.ambiguity.density_window == 0 {
            return Err(QcError::Config("N-density window must be at least 1".into()));
        }
        if self.plot.moving_average_window == 0 {
            return Err(QcError::Config("moving-average window must be at least 1".into()));
        }
        if !(1..=12).contains(&self.plot.max_y_axis_exponent) {
            return Err(QcError::Config(format!(
                "max y-axis exponent {} is outside 1..=12",
                self.plot.max_y_axis_exponent
            )));
        }
        for (name, value) in [
            ("width", self.plot.width),
            ("height", self.plot.height),
            ("pixels_per_inch", self.plot.pixels_per_inch),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(QcError::Config(format!("plot {} must be a positive number, got {}", name, value)));
            }
        }

        let percent = |name: &str, value: f64| {
            if (0.0..=100.0).contains(&value) {
                Ok(())
            } else {
                Err(QcError::Config(format!("{} must be within 0-100, got {}", name, value)))
            }
        };
        percent("min_pct_covered_bases", self.policy.min_pct_covered_bases)?;
        if let Some(max_n) = self.policy.max_pct_n_bases {
            percent("max_pct_n_bases", max_n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.coverage.min_depth, 10);
        assert_eq!(config.ambiguity.density_window, 10);
        assert_eq!(config.plot.moving_average_window, 200);
        assert_eq!(config.primers.amplicon_field, 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[primers]\ndelimiter = \"-\"\n\n[policy]\nmax_pct_n_bases = 5.0").unwrap();
        file.flush().unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.primers.delimiter, "-");
        assert_eq!(config.primers.amplicon_field, 2);
        assert_eq!(config.policy.max_pct_n_bases, Some(5.0));
        assert_eq!(config.policy.min_pct_covered_bases, 90.0);
        assert_eq!(config.ambiguity.density_normalization, DensityNormalization::Nominal);
    }

    #[test]
    fn test_density_normalization_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[ambiguity]\ndensity_normalization = \"truncated\"").unwrap();
        file.flush().unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.ambiguity.density_normalization, DensityNormalization::Truncated);
    }

    #[test]
    fn test_explicit_broken_file_is_fatal() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[coverage]\nmin_depth = \"ten\"").unwrap();
        file.flush().unwrap();

        assert!(matches!(Config::load(Some(file.path())), Err(QcError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.ambiguity.density_window = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plot.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.policy.min_pct_covered_bases = 120.0;
        assert!(config.validate().is_err());
    }
}
