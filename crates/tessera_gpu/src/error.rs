use thiserror::Error;

/// Error type for renderer operations
#[derive(Debug, Error)]
pub enum RendererError {
    /// Failed to request GPU adapter
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,
    /// Failed to request GPU device
    #[error("failed to request GPU device: {0}")]
    DeviceError(#[from] wgpu::RequestDeviceError),
    /// Pixel data does not match the declared image size
    #[error("image data is {actual} bytes, expected {expected}")]
    ImageSizeMismatch { expected: usize, actual: usize },
    /// Mapping a readback buffer failed
    #[error("failed to map readback buffer: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),
    /// Readback from a format other than 8-bit RGBA/BGRA
    #[error("unsupported readback format {0:?}")]
    UnsupportedFormat(wgpu::TextureFormat),
}

pub type Result<T> = std::result::Result<T, RendererError>;
