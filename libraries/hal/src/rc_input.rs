//! RC Input interface
use crate::types::Channel;

/// Decoded radio channels as seen by the motor driver and autonomy stack
pub trait ChannelSource {
    /// Get the current value of a channel
    ///
    /// Thrust and rudder are normalized (nominally -1.0 to 1.0). Override is
    /// reported as its raw pulse width in microseconds.
    fn channel_value(&self, channel: Channel) -> f32;

    /// Check if the radio has taken manual control
    fn override_enabled(&self) -> bool;

    /// Velocity command for the right motor
    fn right_velocity(&self) -> f32;

    /// Velocity command for the left motor
    fn left_velocity(&self) -> f32;

    /// Angle command for the right fan
    fn right_fan(&self) -> f32;

    /// Angle command for the left fan
    fn left_fan(&self) -> f32;
}
