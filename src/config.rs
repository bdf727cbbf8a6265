use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub hooks: HookConfig,
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookConfig {
    /// Interval of the unconditional hook re-arm. Windows can silently drop
    /// low-level hooks under load, so the guard reinstalls them on a timer
    /// rather than waiting for a detectable failure.
    pub guard_interval_secs: u64,
    /// Interval of the no-op heartbeat that keeps the event loop scheduled.
    pub heartbeat_interval_ms: u64,
    /// Depth of the hook-thread -> switcher event queue.
    pub event_queue_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverlayConfig {
    /// "list" or "grid"; a sizing hint consumed by the overlay renderer.
    pub layout_mode: String,
    /// Max rows (list mode) or columns (grid mode) the overlay lays out.
    pub max_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
            hooks: HookConfig {
                guard_interval_secs: 30 * 60,
                heartbeat_interval_ms: 1000,
                event_queue_depth: 64,
            },
            overlay: OverlayConfig {
                layout_mode: "grid".to_string(),
                max_items: 6,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TABSWITCH_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("invalid log format: {}", self.logging.format),
        }

        if self.hooks.guard_interval_secs < 60 {
            anyhow::bail!("guard_interval_secs must be at least 60");
        }

        if self.hooks.heartbeat_interval_ms < 100 {
            anyhow::bail!("heartbeat_interval_ms must be at least 100");
        }

        if self.hooks.event_queue_depth == 0 {
            anyhow::bail!("event_queue_depth must be greater than 0");
        }

        match self.overlay.layout_mode.as_str() {
            "list" | "grid" => {}
            _ => anyhow::bail!("invalid layout mode: {}", self.overlay.layout_mode),
        }

        if self.overlay.max_items == 0 || self.overlay.max_items > 50 {
            anyhow::bail!("max_items must be between 1 and 50");
        }

        Ok(())
    }

    pub fn guard_interval(&self) -> Duration {
        Duration::from_secs(self.hooks.guard_interval_secs)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.hooks.heartbeat_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_guard_interval_rejected() {
        let mut config = Config::default();
        config.hooks.guard_interval_secs = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_layout_mode_rejected() {
        let mut config = Config::default();
        config.overlay.layout_mode = "carousel".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_items_bounds() {
        let mut config = Config::default();
        config.overlay.max_items = 0;
        assert!(config.validate().is_err());
        config.overlay.max_items = 51;
        assert!(config.validate().is_err());
        config.overlay.max_items = 6;
        assert!(config.validate().is_ok());
    }
}
