#![cfg_attr(not(test), no_std)]

mod capture;
mod config;
mod control;
mod error;
mod mixer;
mod normalize;
mod override_state;
mod receiver;
mod store;

pub use capture::{CaptureBank, PulseCapture};
pub use config::{
    Calibration, ChannelPins, OverrideThresholds, PulseRange, ReceiverConfig, DEFAULT_DEAD_ZONE,
    DEFAULT_IDLE_VELOCITY,
};
pub use control::AutonomyControl;
pub use error::{ConfigError, ReceiverError};
pub use hal::{Channel, ChannelSource, Edge, EdgeInterrupts, MicrosClock, PinId};
pub use mixer::{fan_angle, left_velocity, mix, right_velocity, MixerInputs, MotorMix};
pub use normalize::{apply_dead_zone, map_range, normalize};
pub use override_state::{OverrideSignal, OverrideState};
pub use receiver::{RcReceiver, UpdateOutcome};
pub use store::{ChannelStore, ChannelValues};
