//! Loading of heuristic overrides from TOML files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use hypersonic_core::Tuning;
use thiserror::Error;

/// Errors raised while loading tuning overrides.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read tuning file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse tuning file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads tuning from `path`, or the built-in defaults when no path is given.
///
/// Keys missing from the file keep their default values.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning, ConfigError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_tuning(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn parse_tuning(contents: &str) -> Result<Tuning, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load_tuning(None).expect("defaults"), Tuning::default());
    }

    #[test]
    fn partial_file_overrides_named_keys_only() {
        let tuning = parse_tuning("scan_range = 6\nbonus_utility = 9\n").expect("valid toml");
        assert_eq!(
            tuning,
            Tuning {
                scan_range: 6,
                bonus_utility: 9,
                ..Tuning::default()
            }
        );
    }

    #[test]
    fn wrongly_typed_value_is_rejected() {
        assert!(parse_tuning("scan_range = \"wide\"\n").is_err());
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let path = Path::new("/nonexistent/hypersonic/tuning.toml");
        let error = load_tuning(Some(path)).expect_err("file is missing");
        assert!(error.to_string().contains("tuning.toml"));
    }
}
