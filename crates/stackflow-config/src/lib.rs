pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";
pub const DEFAULT_STACK: &str = "dev";

const CANDIDATES: [&str; 3] = ["stackflow.local.yaml", "stackflow.yaml", ".stackflow.yaml"];

/// Contents of `stackflow.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name, part of every resource URN
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Stack selected when none is given on the command line
    #[serde(default)]
    pub stack: Option<String>,
}

impl ProjectConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ProjectConfig = serde_yaml::from_str(content)?;
        if config.name.trim().is_empty() {
            return Err(ConfigError::Invalid("`name` must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!("Loaded project {} from {}", config.name, path.display());
        Ok(config)
    }

    /// Stack name, falling back to [`DEFAULT_STACK`]
    pub fn stack_name(&self) -> &str {
        self.stack.as_deref().unwrap_or(DEFAULT_STACK)
    }
}

/// Locate the project file
///
/// Search order:
/// 1. `STACKFLOW_CONFIG_PATH` (direct path)
/// 2. current directory: stackflow.local.yaml, stackflow.yaml, .stackflow.yaml
/// 3. `./.stackflow/` with the same names
/// 4. `~/.config/stackflow/stackflow.yaml` (global)
pub fn find_project_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points at a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_in(&current_dir) {
        return Ok(path);
    }

    let stack_dir = current_dir.join(".stackflow");
    if stack_dir.is_dir()
        && let Some(path) = find_in(&stack_dir)
    {
        return Ok(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("stackflow").join("stackflow.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ProjectFileNotFound)
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Discover and load the project file
pub fn load_project() -> Result<(PathBuf, ProjectConfig)> {
    let path = find_project_file()?;
    let config = ProjectConfig::load(&path)?;
    Ok((path, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_parse_minimal() {
        let config = ProjectConfig::from_yaml("name: gcp-instance\n").unwrap();
        assert_eq!(config.name, "gcp-instance");
        assert_eq!(config.description, None);
        assert_eq!(config.stack_name(), "dev");
    }

    #[test]
    fn test_parse_full() {
        let config = ProjectConfig::from_yaml(
            "name: gcp-instance\ndescription: web server\nstack: prod\n",
        )
        .unwrap();
        assert_eq!(config.description.as_deref(), Some("web server"));
        assert_eq!(config.stack_name(), "prod");
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let result = ProjectConfig::from_yaml("name: \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_name_is_yaml_error() {
        let result = ProjectConfig::from_yaml("stack: dev\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    #[serial]
    fn test_find_project_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("stackflow.yaml"), "name: shared\n").unwrap();
        fs::write(temp_dir.path().join("stackflow.local.yaml"), "name: local\n").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let result = temp_env::with_var_unset(CONFIG_PATH_ENV, find_project_file);
        std::env::set_current_dir(original_dir).unwrap();

        assert!(result.unwrap().ends_with("stackflow.local.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_project_file_in_stack_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        let stack_dir = temp_dir.path().join(".stackflow");
        fs::create_dir(&stack_dir).unwrap();
        fs::write(stack_dir.join("stackflow.yaml"), "name: nested\n").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let result = temp_env::with_var_unset(CONFIG_PATH_ENV, load_project);
        std::env::set_current_dir(original_dir).unwrap();

        let (path, config) = result.unwrap();
        assert!(path.ends_with(".stackflow/stackflow.yaml"));
        assert_eq!(config.name, "nested");
    }

    #[test]
    #[serial]
    fn test_find_project_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "name: custom\n").unwrap();

        let result =
            temp_env::with_var(CONFIG_PATH_ENV, Some(config_path.as_os_str()), find_project_file);
        assert_eq!(result.unwrap(), config_path);
    }
}
