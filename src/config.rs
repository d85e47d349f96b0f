//! # Run configuration
//!
//! [`PipelineConfig`] gathers every knob of a run: where the input files live, which
//! quantity is extracted, how extrema collisions are handled, and how the trend chart
//! is drawn. It is built either with [`PipelineConfig::default`] or with the validating
//! [`PipelineConfigBuilder`].
//!
//! ## Defaults
//! -----------------
//! | Field | Default |
//! |---|---|
//! | `input_dir` | `plot_input_files` |
//! | `quantity` | [`Quantity::SemiMajorAxis`] |
//! | `collision_policy` | [`CollisionPolicy::Overwrite`] |
//! | `reject_degenerate_orbits` | `false` |
//! | `scatter` | `false` |
//! | `start_aligned` | `true` |
//! | `title` | derived from the file names |
//! | `output` | `orbit_trend.svg` |
//! | `plot_size` | `1440 × 480` px |

use camino::Utf8PathBuf;

use crate::{
    apsis_errors::ApsisError, formats::ReadOptions, quantity::Quantity, series::CollisionPolicy,
};

pub const DEFAULT_INPUT_DIR: &str = "plot_input_files";
pub const DEFAULT_OUTPUT: &str = "orbit_trend.svg";
pub const DEFAULT_PLOT_SIZE: (u32, u32) = (1440, 480);

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the input files. Never derived from the working directory of
    /// the library caller.
    pub input_dir: Utf8PathBuf,
    pub quantity: Quantity,
    pub collision_policy: CollisionPolicy,
    /// Abort on a GPS state with a non-positive or non-finite semi-major axis.
    pub reject_degenerate_orbits: bool,

    /// Draw the extrema as markers on top of the fitted lines.
    pub scatter: bool,
    /// Give every trend line the same intercept: the mean first value of the
    /// predicted (non-GPS) series.
    pub start_aligned: bool,
    /// Chart title; `None` derives it from the file names.
    pub title: Option<String>,
    /// SVG file written by the renderer.
    pub output: Utf8PathBuf,
    /// Chart size in pixels (width, height).
    pub plot_size: (u32, u32),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_dir: Utf8PathBuf::from(DEFAULT_INPUT_DIR),
            quantity: Quantity::default(),
            collision_policy: CollisionPolicy::default(),
            reject_degenerate_orbits: false,
            scatter: false,
            start_aligned: true,
            title: None,
            output: Utf8PathBuf::from(DEFAULT_OUTPUT),
            plot_size: DEFAULT_PLOT_SIZE,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Options forwarded to the record readers.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            quantity: self.quantity,
            collision_policy: self.collision_policy,
            reject_degenerate_orbits: self.reject_degenerate_orbits,
        }
    }
}

/// Builder for [`PipelineConfig`], with validation.
///
/// ```
/// use apsis::config::PipelineConfig;
/// use apsis::quantity::Quantity;
///
/// let config = PipelineConfig::builder()
///     .input_dir("data/day_032")
///     .quantity(Quantity::Altitude)
///     .scatter(true)
///     .output("day_032.svg")
///     .build()
///     .unwrap();
/// assert_eq!(config.quantity, Quantity::Altitude);
/// assert!(config.start_aligned);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    pub fn input_dir(mut self, v: impl Into<Utf8PathBuf>) -> Self {
        self.config.input_dir = v.into();
        self
    }
    pub fn quantity(mut self, v: Quantity) -> Self {
        self.config.quantity = v;
        self
    }
    pub fn collision_policy(mut self, v: CollisionPolicy) -> Self {
        self.config.collision_policy = v;
        self
    }
    pub fn reject_degenerate_orbits(mut self, v: bool) -> Self {
        self.config.reject_degenerate_orbits = v;
        self
    }
    pub fn scatter(mut self, v: bool) -> Self {
        self.config.scatter = v;
        self
    }
    pub fn start_aligned(mut self, v: bool) -> Self {
        self.config.start_aligned = v;
        self
    }
    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.config.title = Some(v.into());
        self
    }
    pub fn output(mut self, v: impl Into<Utf8PathBuf>) -> Self {
        self.config.output = v.into();
        self
    }
    pub fn plot_size(mut self, width: u32, height: u32) -> Self {
        self.config.plot_size = (width, height);
        self
    }

    /// Validate and return the configuration.
    ///
    /// Errors
    /// ----------
    /// * [`ApsisError::InvalidConfig`] if the input directory is empty, a plot dimension
    ///   is zero, or the output path does not end in `.svg`.
    pub fn build(self) -> Result<PipelineConfig, ApsisError> {
        let c = &self.config;

        if c.input_dir.as_str().is_empty() {
            return Err(ApsisError::InvalidConfig(
                "input_dir must not be empty".into(),
            ));
        }
        if c.plot_size.0 == 0 || c.plot_size.1 == 0 {
            return Err(ApsisError::InvalidConfig(
                "plot_size must be non-zero in both dimensions".into(),
            ));
        }
        if !c
            .output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            return Err(ApsisError::InvalidConfig(format!(
                "output must be an .svg file, got `{}`",
                c.output
            )));
        }

        Ok(self.config)
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.input_dir.as_str(), "plot_input_files");
        assert_eq!(config.quantity, Quantity::SemiMajorAxis);
        assert!(config.start_aligned);
        assert!(!config.scatter);
    }

    #[test]
    fn test_read_options_follow_config() {
        let config = PipelineConfig::builder()
            .quantity(Quantity::Altitude)
            .collision_policy(CollisionPolicy::KeepFirst)
            .reject_degenerate_orbits(true)
            .build()
            .unwrap();
        assert_eq!(
            config.read_options(),
            ReadOptions {
                quantity: Quantity::Altitude,
                collision_policy: CollisionPolicy::KeepFirst,
                reject_degenerate_orbits: true,
            }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            PipelineConfig::builder().input_dir("").build(),
            Err(ApsisError::InvalidConfig(_))
        ));
        assert!(matches!(
            PipelineConfig::builder().plot_size(0, 480).build(),
            Err(ApsisError::InvalidConfig(_))
        ));
        assert!(matches!(
            PipelineConfig::builder().output("trend.png").build(),
            Err(ApsisError::InvalidConfig(_))
        ));
        assert!(PipelineConfig::builder().output("out/Trend.SVG").build().is_ok());
    }
}
