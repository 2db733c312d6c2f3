use crate::recorder::RecordOptions;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub recorder: RecorderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory whose filesystem is measured. Unset = home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queried_path: Option<PathBuf>,
    /// Where the daily CSV files go. Unset = ~/disk_reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Take an exclusive advisory lock on the daily file while appending.
    #[serde(default)]
    pub lock: bool,
}

const BANNER: &str = "\
# dulog configuration
# Generated by --init-config, edit freely
#
# [paths]
# queried_path = \"/home/me\"
# output_dir   = \"/home/me/disk_reports\"

";

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load from the default location. Never fails: a missing file is the
    /// normal case, a broken one is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("no config dir on this platform, using defaults");
            return Config::default();
        };
        if !path.exists() {
            debug!("{} not found, using defaults", path.display());
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                warn!("ignoring config: {:#}", e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dulog").join("dulog.toml"))
    }

    /// Write the defaults to `path`. Refuses to overwrite an existing file.
    pub fn write_defaults(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(&Config::default())?;
        fs::write(path, format!("{}{}", BANNER, text))?;
        Ok(())
    }

    /// Merge command-line overrides over the file's values.
    pub fn options(
        &self,
        queried_path: Option<PathBuf>,
        output_dir:   Option<PathBuf>,
        lock:         bool,
    ) -> RecordOptions {
        RecordOptions {
            queried_path: queried_path.or_else(|| self.paths.queried_path.clone()),
            output_dir:   output_dir.or_else(|| self.paths.output_dir.clone()),
            lock:         lock || self.recorder.lock,
        }
    }
}
