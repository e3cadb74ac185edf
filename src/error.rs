use thiserror::Error;

/// Top-level error type for the lumisweep visibility kernel.
#[derive(Debug, Error)]
pub enum LumisweepError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building the static segment set of a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("obstacle {index} has {vertex_count} vertices, at least 3 are required")]
    InvalidObstacle { index: usize, vertex_count: usize },

    #[error("obstacle {index} has a non-finite vertex coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("scene is not enclosed: {0}")]
    UnenclosedScene(String),
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration value {name} = {value} is invalid")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Convenience type alias for results using [`LumisweepError`].
pub type Result<T> = std::result::Result<T, LumisweepError>;
