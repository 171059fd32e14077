use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("container element not found: {0}")]
    ContainerNotFound(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("rendering surface has been disposed")]
    SurfaceDisposed,

    #[error("unknown surface element: {0}")]
    UnknownElement(u64),

    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
