//! Configuration loading for the byeol space scene.
//!
//! Reads `config.toml` from the platform config directory. A missing
//! file means defaults; a malformed file is reported to the caller.

use std::fs;
use std::path::PathBuf;

use byeol_core::{Density, ResetPolicy, Tier};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fidelity tier to start in.
    pub tier: Tier,
    /// Entity density preset.
    pub density: Density,
    /// Target frames per second for the animation loop.
    pub target_fps: u16,
    /// Capture mouse movement for the parallax effect.
    pub mouse_parallax: bool,
    /// Override the tier's particle reset policy.
    pub reset_policy: Option<ResetPolicy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tier: Tier::default(),
            density: Density::default(),
            target_fps: 30,
            mouse_parallax: true,
            reset_policy: None,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Frames per second clamped to a sane range.
    pub fn fps(&self) -> u16 {
        self.target_fps.clamp(1, 120)
    }
}

/// Path of the config file, if a home directory can be determined.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "byeol", "byeol").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config file, falling back to defaults when it is absent.
/// Malformed TOML is an error so typos don't silently vanish.
pub fn load() -> Result<Config, String> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    match fs::read_to_string(&path) {
        Ok(text) => Config::parse(&text).map_err(|e| format!("{}: {e}", path.display())),
        Err(_) => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            tier = "cinematic"
            density = "dense"
            target_fps = 60
            mouse_parallax = false
            reset_policy = "wrap-only"
            "#,
        )
        .unwrap();
        assert_eq!(config.tier, Tier::Cinematic);
        assert_eq!(config.density, Density::Dense);
        assert_eq!(config.target_fps, 60);
        assert!(!config.mouse_parallax);
        assert_eq!(config.reset_policy, Some(ResetPolicy::WrapOnly));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::parse("tier = \"lightweight\"").unwrap();
        assert_eq!(config.tier, Tier::Lightweight);
        assert_eq!(config.target_fps, 30);
        assert!(config.mouse_parallax);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Config::parse("tier = \"ultra\"").is_err());
        assert!(Config::parse("tier = = =").is_err());
    }

    #[test]
    fn test_fps_is_clamped() {
        let mut config = Config::default();
        config.target_fps = 0;
        assert_eq!(config.fps(), 1);
        config.target_fps = 500;
        assert_eq!(config.fps(), 120);
    }
}
