//! Resolved job configuration.
//!
//! Values come from command-line flags with environment variables as a
//! fallback; [`Config::from_matches`] turns the merged result into a
//! `Config` or reports which value is still missing.

use std::path::PathBuf;

use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no {what} given: pass {flag} or set {env}")]
    Missing {
        what: &'static str,
        flag: &'static str,
        env: &'static str,
    },
}

/// Everything a single run needs to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The programme audio to wrap.
    pub main_audio: PathBuf,
    /// The station tag placed before and after the programme.
    pub tag_audio: PathBuf,
    /// Where the wrapped file is written.
    pub output: PathBuf,
    /// Root under which the per-run scratch directory is created.
    pub temp_root: PathBuf,
}

impl Config {
    /// Build a `Config` from parsed arguments.
    ///
    /// Flags and their environment fallbacks are already merged by the
    /// parser; anything still absent here was supplied through neither.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let main_audio =
            require_path(matches, cli::ARG_MAIN, "main audio", "--main", cli::ENV_MAIN)?;
        let tag_audio = require_path(matches, cli::ARG_TAG, "tag audio", "--tag", cli::ENV_TAG)?;
        let output = require_path(
            matches,
            cli::ARG_OUTPUT,
            "output path",
            "--output",
            cli::ENV_OUTPUT,
        )?;
        let temp_root = matches
            .get_one::<PathBuf>(cli::ARG_TEMP_DIR)
            .cloned()
            .unwrap_or_else(std::env::temp_dir);
        Ok(Self {
            main_audio,
            tag_audio,
            output,
            temp_root,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            main_audio: PathBuf::from("/tmp/main.wav"),
            tag_audio: PathBuf::from("/tmp/tag.wav"),
            output: PathBuf::from("/tmp/wrapped.wav"),
            temp_root: std::env::temp_dir(),
        }
    }
}

fn require_path(
    matches: &ArgMatches,
    id: &str,
    what: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<PathBuf, ConfigError> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .ok_or(ConfigError::Missing { what, flag, env })
}
