//! Viewer configuration.
//!
//! Loaded from a JSON file when `--config` is given; command-line flags
//! override individual fields afterwards.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use spaceview_core::{DEFAULT_MOVE_DISTANCE, DEFAULT_ROTATION_DEGREES};

/// Virtual screen the camera projects onto, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Mesh asset to load. The built-in cube is shown when unset.
    #[serde(default)]
    pub mesh: Option<PathBuf>,
    #[serde(default)]
    pub screen: ScreenSize,
    #[serde(default = "default_move_distance")]
    pub move_distance: f64,
    #[serde(default = "default_rotation_degrees")]
    pub rotation_degrees: f64,
    /// Steps per move or rotate command; each step redraws.
    #[serde(default = "default_steps_per_command")]
    pub steps_per_command: u32,
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Log destination. Logging is off when unset so the alternate screen
    /// stays clean.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_move_distance() -> f64 {
    DEFAULT_MOVE_DISTANCE
}

fn default_rotation_degrees() -> f64 {
    DEFAULT_ROTATION_DEGREES
}

fn default_steps_per_command() -> u32 {
    10
}

fn default_step_delay_ms() -> u64 {
    200
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mesh: None,
            screen: ScreenSize::default(),
            move_distance: default_move_distance(),
            rotation_degrees: default_rotation_degrees(),
            steps_per_command: default_steps_per_command(),
            step_delay_ms: default_step_delay_ms(),
            log_file: None,
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}

/// How the binary was asked to run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Interactive,
    /// Replays key characters without a terminal and prints every frame.
    Headless { script: String, cols: u16, rows: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub config: ViewerConfig,
    pub mode: RunMode,
}

/// Parses command-line flags. `args` excludes the program name.
pub fn parse_args<I>(args: I) -> anyhow::Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let mut config = match flag_value(&args, "--config") {
        Some(path) => ViewerConfig::load(Path::new(path))?,
        None => ViewerConfig::default(),
    };
    let mut headless = false;
    let mut script = String::new();
    let mut cols = 80;
    let mut rows = 24;

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config", Some(_)) => i += 2,
            ("--mesh", Some(path)) => {
                config.mesh = Some(PathBuf::from(path));
                i += 2;
            }
            ("--steps", Some(steps)) => {
                config.steps_per_command = steps.parse().context("--steps")?;
                i += 2;
            }
            ("--delay-ms", Some(delay)) => {
                config.step_delay_ms = delay.parse().context("--delay-ms")?;
                i += 2;
            }
            ("--log-file", Some(path)) => {
                config.log_file = Some(PathBuf::from(path));
                i += 2;
            }
            ("--script", Some(keys)) => {
                script = keys.clone();
                i += 2;
            }
            ("--cols", Some(n)) => {
                cols = n.parse().context("--cols")?;
                i += 2;
            }
            ("--rows", Some(n)) => {
                rows = n.parse().context("--rows")?;
                i += 2;
            }
            ("--headless", _) => {
                headless = true;
                i += 1;
            }
            (flag, _) => bail!("unrecognized or incomplete argument `{flag}`"),
        }
    }

    let mode = if headless {
        RunMode::Headless { script, cols, rows }
    } else {
        RunMode::Interactive
    };
    Ok(Options { config, mode })
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.move_distance, 0.1);
        assert_eq!(config.rotation_degrees, 1.5);
        assert_eq!(config.steps_per_command, 10);
        assert_eq!(config.step_delay_ms, 200);
        assert_eq!(config.screen, ScreenSize { width: 800, height: 600 });
        assert!(config.mesh.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ViewerConfig::from_json_str(r#"{ "mesh": "assets/ship.bin", "steps_per_command": 4 }"#)
                .unwrap();
        assert_eq!(config.mesh, Some(PathBuf::from("assets/ship.bin")));
        assert_eq!(config.steps_per_command, 4);
        assert_eq!(config.rotation_degrees, 1.5);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = ViewerConfig::default();
        config.screen = ScreenSize { width: 320, height: 200 };
        config.log_file = Some(PathBuf::from("viewer.log"));
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(ViewerConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_flags_override() {
        let options = parse_args(args(&[
            "--mesh", "cube.bin", "--steps", "3", "--delay-ms", "0", "--log-file", "out.log",
        ]))
        .unwrap();
        assert_eq!(options.mode, RunMode::Interactive);
        assert_eq!(options.config.mesh, Some(PathBuf::from("cube.bin")));
        assert_eq!(options.config.steps_per_command, 3);
        assert_eq!(options.config.step_delay_ms, 0);
        assert_eq!(options.config.log_file, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn test_headless_flags() {
        let options = parse_args(args(&["--headless", "--script", "wwd", "--cols", "40"])).unwrap();
        assert_eq!(
            options.mode,
            RunMode::Headless {
                script: "wwd".to_string(),
                cols: 40,
                rows: 24
            }
        );
    }

    #[test]
    fn test_config_file_then_flags() {
        let path =
            std::env::temp_dir().join(format!("spaceview-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "steps_per_command": 7, "step_delay_ms": 50 }"#).unwrap();
        let options =
            parse_args(args(&["--steps", "2", "--config", path.to_str().unwrap()])).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(options.config.steps_per_command, 2);
        assert_eq!(options.config.step_delay_ms, 50);
    }

    #[test]
    fn test_bad_flags() {
        assert!(parse_args(args(&["--steps", "many"])).is_err());
        assert!(parse_args(args(&["--fly"])).is_err());
        assert!(parse_args(args(&["--config", "/nonexistent/spaceview.json"])).is_err());
    }
}
