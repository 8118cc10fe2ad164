use std::path::PathBuf;

use clap::Parser;
use xform_engine::logging::LoggingConfig;
use xform_engine::window::RuntimeConfig;

use crate::preset::Preset;

/// Draws a triangle through one of four preset 4x4 transform matrices.
#[derive(Debug, Parser)]
#[command(name = "xform-demo", version)]
pub struct Args {
    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    #[arg(long, default_value = "xform")]
    pub title: String,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Preset applied before the first draw.
    #[arg(long, value_enum, default_value_t = Preset::Reset)]
    pub preset: Preset,

    /// Font for button labels and the matrix readout; a system font otherwise.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,
}

impl Args {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::new(self.title.clone(), self.width, self.height)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["xform-demo"]).unwrap();
        assert_eq!(args.preset, Preset::Reset);
        assert_eq!(args.log, None);
        assert_eq!(args.font, None);

        let config = args.runtime_config();
        assert_eq!(config.title, "xform");
        assert_eq!(config.initial_size.width, 800.0);
        assert_eq!(config.initial_size.height, 600.0);
    }

    #[test]
    fn preset_names_are_kebab_case() {
        let args = Args::try_parse_from(["xform-demo", "--preset", "key-solution"]).unwrap();
        assert_eq!(args.preset, Preset::KeySolution);

        let args = Args::try_parse_from(["xform-demo", "--preset", "center-scale"]).unwrap();
        assert_eq!(args.preset, Preset::CenterScale);

        assert!(Args::try_parse_from(["xform-demo", "--preset", "rotate"]).is_err());
    }

    #[test]
    fn log_flag_feeds_the_logger() {
        let args = Args::try_parse_from(["xform-demo", "--log", "debug", "--width", "1024"]).unwrap();
        assert_eq!(args.logging_config().env_filter.as_deref(), Some("debug"));
        assert_eq!(args.runtime_config().initial_size.width, 1024.0);
    }

    #[test]
    fn font_path_is_kept() {
        let args = Args::try_parse_from(["xform-demo", "--font", "/tmp/mono.ttf"]).unwrap();
        assert_eq!(args.font, Some(PathBuf::from("/tmp/mono.ttf")));
    }
}
