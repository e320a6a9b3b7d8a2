use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("failed to decode image {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("image {} has no pixels", .path.display())]
    Empty { path: PathBuf },

    #[error(
        "image {} is {width}x{height}, larger than the {max}px texture limit",
        .path.display()
    )]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },
}

impl ImageError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ImageError::Decode { path, .. }
            | ImageError::Empty { path }
            | ImageError::TooLarge { path, .. } => path,
        }
    }
}
