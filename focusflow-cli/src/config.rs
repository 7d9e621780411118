use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use focusflow_core::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::state::config_path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub engine: SchedulerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA name like "America/Chicago"; unset means the system local zone.
    pub timezone: Option<String>,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Calendar date that counts as "today" for planning.
    pub fn today(&self) -> Result<NaiveDate> {
        match self.general.timezone.as_deref() {
            Some(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))?;
                Ok(Utc::now().with_timezone(&tz).date_naive())
            }
            None => Ok(Local::now().date_naive()),
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).context("parse config.toml")?;
    if let Err(e) = cfg.engine.validate() {
        bail!("invalid [engine] section in {}: {e}", p.display());
    }
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn saved_defaults_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        save_config(&Config::default(), &p).unwrap();

        let text = fs::read_to_string(&p).unwrap();
        assert!(text.contains("[engine]"));
        assert!(text.contains("day_start = \"09:00\""));
        assert_eq!(load_config_from(&p).unwrap(), Config::default());
    }

    #[test]
    fn partial_engine_section_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            "[general]\ntimezone = \"America/Chicago\"\n\n[engine]\nhorizon_days = 7\nmax_work_block = 60\n",
        )
        .unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.general.timezone.as_deref(), Some("America/Chicago"));
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.engine.horizon_days, 7);
        assert_eq!(cfg.engine.max_work_block, 60);
        assert_eq!(cfg.engine.break_minutes, 15);
        cfg.today().unwrap();
    }

    #[test]
    fn invalid_engine_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[engine]\nday_start = \"18:00\"\nday_end = \"09:00\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn bad_timezone_is_an_error() {
        let cfg = Config {
            general: GeneralSection {
                timezone: Some("Mars/Olympus".to_string()),
                ..GeneralSection::default()
            },
            ..Config::default()
        };
        assert!(cfg.today().is_err());
    }
}
