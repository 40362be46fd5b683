//! Configuration for the netwatch dashboard.
//!
//! Defaults, an optional TOML file, and `NETWATCH_`-prefixed environment
//! variables are merged with figment, validated, and translated into a
//! [`ProbeRegistry`] for the collectors. Which metrics exist is fixed; the
//! file only tunes each probe's command, cadence, and timeout.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netwatch_core::{CommandProbe, Metric, ProbeRegistry};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Target time between dashboard frames, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Per-metric probe settings.
    #[serde(default)]
    pub probes: Probes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            probes: Probes::default(),
        }
    }
}

fn default_frame_interval_ms() -> u64 {
    100
}

/// Upper bound for `frame_interval_ms`: one frame per minute.
const MAX_FRAME_INTERVAL_MS: u64 = 60_000;

/// One [`ProbeConfig`] per metric.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Probes {
    #[serde(default = "default_bandwidth")]
    pub bandwidth: ProbeConfig,
    #[serde(default = "default_latency")]
    pub latency: ProbeConfig,
    #[serde(default)]
    pub stability: ProbeConfig,
    #[serde(default)]
    pub routing: ProbeConfig,
    #[serde(default)]
    pub protocol: ProbeConfig,
}

impl Default for Probes {
    fn default() -> Self {
        Self {
            bandwidth: default_bandwidth(),
            latency: default_latency(),
            stability: ProbeConfig::default(),
            routing: ProbeConfig::default(),
            protocol: ProbeConfig::default(),
        }
    }
}

impl Probes {
    pub fn get(&self, metric: Metric) -> &ProbeConfig {
        match metric {
            Metric::Bandwidth => &self.bandwidth,
            Metric::Latency => &self.latency,
            Metric::Stability => &self.stability,
            Metric::Routing => &self.routing,
            Metric::Protocol => &self.protocol,
        }
    }
}

fn default_bandwidth() -> ProbeConfig {
    ProbeConfig {
        command: vec!["speedtest-cli".into(), "--simple".into()],
        interval_secs: 300,
        timeout_secs: None,
    }
}

fn default_latency() -> ProbeConfig {
    ProbeConfig {
        command: ["ping", "-c", "3", "8.8.8.8"].map(String::from).to_vec(),
        interval_secs: 5,
        timeout_secs: None,
    }
}

/// How one metric's collector runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// argv of the probe command. Empty means the panel is a placeholder
    /// and no collector runs for it.
    #[serde(default)]
    pub command: Vec<String>,

    /// Seconds to sleep between the end of one probe and the next.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Kill the probe after this many seconds. No limit when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            interval_secs: default_interval_secs(),
            timeout_secs: None,
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}

impl ProbeConfig {
    pub fn is_placeholder(&self) -> bool {
        self.command.is_empty()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ── Validation and translation ──────────────────────────────────────

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Reject values the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "frame_interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.frame_interval_ms > MAX_FRAME_INTERVAL_MS {
            return Err(ConfigError::Validation {
                field: "frame_interval_ms".into(),
                reason: format!("must be at most {MAX_FRAME_INTERVAL_MS}"),
            });
        }

        for metric in Metric::ALL {
            let probe = self.probes.get(metric);
            if probe.interval_secs == 0 {
                return Err(ConfigError::Validation {
                    field: format!("probes.{metric}.interval_secs"),
                    reason: "must be greater than zero".into(),
                });
            }
            if probe.timeout_secs == Some(0) {
                return Err(ConfigError::Validation {
                    field: format!("probes.{metric}.timeout_secs"),
                    reason: "must be greater than zero when set".into(),
                });
            }
            if probe.command.first().is_some_and(|p| p.trim().is_empty()) {
                return Err(ConfigError::Validation {
                    field: format!("probes.{metric}.command"),
                    reason: "program name is empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Bind a [`CommandProbe`] to every metric that has a command.
    pub fn probe_registry(&self) -> Result<ProbeRegistry, ConfigError> {
        self.validate()?;

        let mut registry = ProbeRegistry::new();
        for metric in Metric::ALL {
            let cfg = self.probes.get(metric);
            if cfg.is_placeholder() {
                continue;
            }
            let probe = CommandProbe::from_argv(&cfg.command)
                .map_err(|e| ConfigError::Validation {
                    field: format!("probes.{metric}.command"),
                    reason: e.to_string(),
                })?
                .with_timeout(cfg.timeout());
            registry.bind(metric, Arc::new(probe), cfg.interval());
        }
        Ok(registry)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "netwatch", "netwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the config from defaults, file, and environment.
///
/// `path` overrides the platform config location. A missing file is not an
/// error; defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("NETWATCH_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Render the effective configuration as TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_bind_bandwidth_and_latency_only() {
        let registry = Config::default().probe_registry().unwrap();
        let bound: Vec<Metric> = registry.metrics().collect();
        assert_eq!(bound, vec![Metric::Bandwidth, Metric::Latency]);

        let bandwidth = registry.get(Metric::Bandwidth).unwrap();
        assert_eq!(bandwidth.interval, Duration::from_secs(300));
        assert_eq!(bandwidth.probe.describe(), "speedtest-cli --simple");

        let latency = registry.get(Metric::Latency).unwrap();
        assert_eq!(latency.interval, Duration::from_secs(5));
        assert_eq!(latency.probe.describe(), "ping -c 3 8.8.8.8");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.frame_interval(), Duration::from_millis(100));
    }

    #[test]
    fn file_overrides_merge_with_defaults() {
        let file = write_config(
            r#"
frame_interval_ms = 250

[probes.latency]
interval_secs = 10
timeout_secs = 20

[probes.routing]
command = ["traceroute", "-n", "8.8.8.8"]
"#,
        );

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.frame_interval_ms, 250);
        assert_eq!(cfg.probes.latency.interval_secs, 10);
        assert_eq!(cfg.probes.latency.timeout(), Some(Duration::from_secs(20)));
        // Command not repeated in the file, so the default survives.
        assert_eq!(cfg.probes.latency.command[0], "ping");
        assert_eq!(cfg.probes.routing.interval_secs, 60);

        let registry = cfg.probe_registry().unwrap();
        assert!(registry.is_bound(Metric::Routing));
        assert!(!registry.is_bound(Metric::Stability));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let file = write_config("[probes.bandwidth]\ninterval_secs = 0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(
            err.to_string().contains("probes.bandwidth.interval_secs"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let cfg = Config {
            frame_interval_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "frame_interval_ms"
        ));
    }

    #[test]
    fn huge_frame_interval_is_rejected() {
        let file = write_config("frame_interval_ms = 3600000\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(
            err.to_string().contains("frame_interval_ms"),
            "unexpected error: {err}"
        );

        let at_limit = Config {
            frame_interval_ms: MAX_FRAME_INTERVAL_MS,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn blank_program_is_rejected() {
        let mut cfg = Config::default();
        cfg.probes.stability.command = vec![String::new(), "-c".into()];
        assert!(cfg.probe_registry().is_err());
    }

    #[test]
    fn toml_output_reloads_identically() {
        let mut cfg = Config::default();
        cfg.probes.protocol.command = vec!["ss".into(), "-s".into()];
        cfg.probes.protocol.timeout_secs = Some(5);

        let rendered = to_toml(&cfg).unwrap();
        let file = write_config(&rendered);
        assert_eq!(load_config(Some(file.path())).unwrap(), cfg);
    }
}
