use hal::{Channel, PinId};
use thiserror::Error;

/// Rejected receiver configuration
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("override thresholds must satisfy low < high < upper, got {low} / {high} / {upper} us")]
    ThresholdOrder { low: u32, high: u32, upper: u32 },

    #[error("{channel} calibration span is empty ({min_us} us to {max_us} us)")]
    EmptyRange {
        channel: Channel,
        min_us: u32,
        max_us: u32,
    },

    #[error("{first} and {second} channels are both wired to {pin}")]
    SharedPin {
        pin: PinId,
        first: Channel,
        second: Channel,
    },

    #[error("dead zone {0} must be finite and within [0, 1)")]
    InvalidDeadZone(f32),

    #[error("idle velocity {0} is not a valid number")]
    InvalidIdleVelocity(f32),
}

/// Receiver construction failure
#[derive(Error, Debug)]
pub enum ReceiverError<E: core::fmt::Debug> {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to configure {pin} as input: {error:?}")]
    Configure { pin: PinId, error: E },

    #[error("failed to attach {channel} handler to {pin}: {error:?}")]
    Attach { channel: Channel, pin: PinId, error: E },
}
