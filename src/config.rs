use std::collections::BTreeMap;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::Deserialize;

use crate::error::{Result, TrackerError};

/// Config file layout:
///
/// ```yaml
/// General:
///   APIKey: "0123abcd"
///   Me: "Alice"
///   DefaultProject: website
/// Projects:
///   website: 42
///   backend: 77
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default, rename = "General")]
    pub general: General,
    #[serde(default, rename = "Projects")]
    pub projects: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct General {
    #[serde(rename = "APIKey")]
    pub api_key: Option<String>,
    #[serde(rename = "Me")]
    pub me: Option<String>,
    #[serde(rename = "DefaultProject")]
    pub default_project: Option<String>,
}

impl Config {
    /// Read `~/.tracker.yml`, fresh on every invocation. A missing file is an
    /// empty config, not an error.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| TrackerError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::from_yaml(&contents, &config_path)
    }

    fn from_yaml(contents: &str, path: &std::path::Path) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(contents).map_err(|e| TrackerError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        // DefaultProject must name a key of Projects.
        if let Some(default) = &config.general.default_project {
            if !config.projects.contains_key(default) {
                return Err(TrackerError::UnknownDefaultProject(default.clone()));
            }
        }

        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".tracker.yml"))
            .ok_or(TrackerError::NoHomeDir)
    }

    /// Get the API token with env var taking precedence over the config file.
    pub fn token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("TRACKER_TOKEN") {
            return Ok(token);
        }

        self.general
            .api_key
            .clone()
            .ok_or(TrackerError::MissingToken)
    }

    /// Resolve a project to its numeric ID string. Precedence: explicit ID,
    /// then explicit name looked up in `Projects`, then `DefaultProject`.
    pub fn resolve_project(&self, name: Option<&str>, id: Option<&str>) -> Result<String> {
        if let Some(id) = id {
            return Ok(id.to_string());
        }

        let name = name
            .or(self.general.default_project.as_deref())
            .ok_or(TrackerError::NoProject)?;

        self.projects
            .get(name)
            .map(|id| id.to_string())
            .ok_or_else(|| TrackerError::UnknownProject(name.to_string()))
    }
}
