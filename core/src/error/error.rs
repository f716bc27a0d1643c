use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ui error: {0}")]
    Ui(#[from] UiError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("runtime error: {0}")]
    Runtime(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("failed to start backend: {source}")]
    Start {
        cmd: String,
        source: anyhow::Error,
    },
    #[error("failed to wait for backend: {0}")]
    Wait(#[source] anyhow::Error),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum UiError {
    #[error("failed to construct ui: {0}")]
    Construction(String),
    #[error("ui event loop failed: {0}")]
    EventLoop(String),
}
