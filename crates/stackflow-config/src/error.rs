use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Project file not found. Looked in:\n\
        - current directory: stackflow.local.yaml, stackflow.yaml, .stackflow.yaml\n\
        - ./.stackflow/ directory\n\
        - ~/.config/stackflow/stackflow.yaml\n\
        Set STACKFLOW_CONFIG_PATH to point at a file directly"
    )]
    ProjectFileNotFound,

    #[error("Invalid project file: {0}")]
    Invalid(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
