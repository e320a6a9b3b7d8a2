/// Rejected configuration.
///
/// Reported by [`Config::validate`](super::Config::validate), which the
/// runtime calls once before the frame loop starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("target frame rate must be positive, got {0}")]
    NonPositiveFps(f64),

    #[error("target frame rate must be finite, got {0}")]
    NonFiniteFps(f64),

    #[error("target frame rate {0} gives a frame period too long to represent")]
    FpsTooLow(f64),

    #[error("window width must be positive")]
    ZeroWidth,

    #[error("window height must be positive")]
    ZeroHeight,
}
