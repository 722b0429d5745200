//! Configuration loaded from a TOML file.
//!
//! The file is optional; every key has a default. The default location is
//! `$XDG_CONFIG_HOME/padcalc/config.toml` (or the platform equivalent).
//!
//! ```toml
//! prompt = "Write!"
//! error = "Error"
//! banner = "Pad Calculator"
//!
//! [window]
//! width = 350
//! height = 450
//! line = 1
//! ```

use crate::calculator::Texts;
use crate::keypad::Layout;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shown before any input.
    pub prompt: String,
    /// Shown after a failed evaluation.
    pub error: String,
    /// Initial result line.
    pub banner: String,
    pub window: WindowConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Separator line width in pixels.
    pub line: u32,
}

impl Default for Config {
    fn default() -> Self {
        let texts = Texts::default();
        Self {
            prompt: texts.prompt,
            error: texts.error,
            banner: texts.banner,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 350,
            height: 450,
            line: 1,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padcalc").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => {
                    debug!("no config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, text) in [("prompt", &self.prompt), ("error", &self.error)] {
            if text.trim().is_empty() {
                anyhow::bail!("{name} text must not be blank");
            }
            // Placeholders must never look like an evaluated value.
            if text
                .trim()
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
            {
                anyhow::bail!("{name} text must not be a number: {text:?}");
            }
        }

        if self.prompt == self.error {
            anyhow::bail!("prompt and error texts must differ");
        }

        Layout::new(self.window.width, self.window.height, self.window.line)
            .context("Invalid window size")?;

        Ok(())
    }

    /// Placeholder texts for a [`crate::calculator::Calculator`].
    pub fn texts(&self) -> Texts {
        Texts {
            prompt: self.prompt.clone(),
            error: self.error.clone(),
            banner: self.banner.clone(),
        }
    }
}
