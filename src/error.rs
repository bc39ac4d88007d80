use allrgb_engine::{ConfigError, EngineError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("Invalid option: {0}")]
    Option(#[from] ConfigError),

    #[error("Width and height must be given together (got {which} only)")]
    PartialGeometry { which: &'static str },

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Buffer holds {got} bytes, {width}x{height} RGB needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG optimize error: {0}")]
    Optimize(String),
}
