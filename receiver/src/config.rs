//! Receiver wiring and calibration
//!
//! Everything here is fixed when the receiver is built and never changes
//! afterwards.

use hal::{Channel, PinId};

use crate::error::ConfigError;

/// Normalized magnitudes below this are forced to zero
pub const DEFAULT_DEAD_ZONE: f32 = 0.01;

/// Autonomy velocity applied whenever the override drops out
pub const DEFAULT_IDLE_VELOCITY: f32 = 0.1;

/// Input pin of each channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPins {
    pub override_pin: PinId,
    pub thrust: PinId,
    pub rudder: PinId,
}

impl ChannelPins {
    pub fn pin(&self, channel: Channel) -> PinId {
        match channel {
            Channel::Override => self.override_pin,
            Channel::Thrust => self.thrust,
            Channel::Rudder => self.rudder,
        }
    }
}

impl Default for ChannelPins {
    fn default() -> Self {
        Self {
            override_pin: PinId(2),
            thrust: PinId(3),
            rudder: PinId(4),
        }
    }
}

/// Pulse widths mapped to the ends of the normalized range
///
/// `min_us` maps to -1.0 and `max_us` to 1.0. A reversed span (`min_us >
/// max_us`) inverts the stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRange {
    pub min_us: u32,
    pub max_us: u32,
}

impl PulseRange {
    pub const fn new(min_us: u32, max_us: u32) -> Self {
        Self { min_us, max_us }
    }

    pub fn is_empty(&self) -> bool {
        self.min_us == self.max_us
    }
}

/// Stick calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Full reverse to full forward
    pub throttle: PulseRange,
    /// Full left to full right
    pub rudder: PulseRange,
}

impl Calibration {
    /// Calibrated range of a stick channel, `None` for the override switch
    pub fn range(&self, channel: Channel) -> Option<PulseRange> {
        match channel {
            Channel::Override => None,
            Channel::Thrust => Some(self.throttle),
            Channel::Rudder => Some(self.rudder),
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            throttle: PulseRange::new(1000, 2000),
            rudder: PulseRange::new(1000, 2000),
        }
    }
}

/// Override switch bands
///
/// Below `low_us` or above `upper_us` the override is treated as off or lost.
/// Above `high_us` (up to `upper_us`) it is on. In between nothing is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideThresholds {
    pub low_us: u32,
    pub high_us: u32,
    pub upper_us: u32,
}

impl Default for OverrideThresholds {
    fn default() -> Self {
        Self {
            low_us: 1200,
            high_us: 1600,
            upper_us: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverConfig {
    pub pins: ChannelPins,
    pub calibration: Calibration,
    pub thresholds: OverrideThresholds,
    pub dead_zone: f32,
    pub idle_velocity: f32,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            pins: ChannelPins::default(),
            calibration: Calibration::default(),
            thresholds: OverrideThresholds::default(),
            dead_zone: DEFAULT_DEAD_ZONE,
            idle_velocity: DEFAULT_IDLE_VELOCITY,
        }
    }
}

impl ReceiverConfig {
    /// Default calibration on custom pins
    pub fn with_pins(thrust: PinId, rudder: PinId, override_pin: PinId) -> Self {
        Self {
            pins: ChannelPins {
                override_pin,
                thrust,
                rudder,
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.thresholds;
        if !(t.low_us < t.high_us && t.high_us < t.upper_us) {
            return Err(ConfigError::ThresholdOrder {
                low: t.low_us,
                high: t.high_us,
                upper: t.upper_us,
            });
        }

        for channel in [Channel::Thrust, Channel::Rudder] {
            if let Some(range) = self.calibration.range(channel) {
                if range.is_empty() {
                    return Err(ConfigError::EmptyRange {
                        channel,
                        min_us: range.min_us,
                        max_us: range.max_us,
                    });
                }
            }
        }

        for (i, &first) in Channel::ALL.iter().enumerate() {
            for &second in &Channel::ALL[i + 1..] {
                let pin = self.pins.pin(first);
                if pin == self.pins.pin(second) {
                    return Err(ConfigError::SharedPin { pin, first, second });
                }
            }
        }

        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 || self.dead_zone >= 1.0 {
            return Err(ConfigError::InvalidDeadZone(self.dead_zone));
        }

        if !self.idle_velocity.is_finite() {
            return Err(ConfigError::InvalidIdleVelocity(self.idle_velocity));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReceiverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dead_zone, 0.01);
        assert_eq!(config.idle_velocity, 0.1);
    }

    #[test]
    fn test_with_pins_keeps_default_calibration() {
        let config = ReceiverConfig::with_pins(PinId(10), PinId(11), PinId(12));
        assert_eq!(config.pins.pin(Channel::Thrust), PinId(10));
        assert_eq!(config.pins.pin(Channel::Rudder), PinId(11));
        assert_eq!(config.pins.pin(Channel::Override), PinId(12));
        assert_eq!(config.calibration, Calibration::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_order_rejected() {
        let mut config = ReceiverConfig::default();
        config.thresholds = OverrideThresholds {
            low_us: 1600,
            high_us: 1600,
            upper_us: 2000,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOrder {
                low: 1600,
                high: 1600,
                upper: 2000
            })
        );

        config.thresholds = OverrideThresholds {
            low_us: 1200,
            high_us: 2100,
            upper_us: 2000,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut config = ReceiverConfig::default();
        config.calibration.rudder = PulseRange::new(1500, 1500);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                channel: Channel::Rudder,
                min_us: 1500,
                max_us: 1500
            })
        );
    }

    #[test]
    fn test_reversed_range_allowed() {
        let mut config = ReceiverConfig::default();
        config.calibration.throttle = PulseRange::new(2000, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shared_pin_rejected() {
        let config = ReceiverConfig::with_pins(PinId(5), PinId(6), PinId(5));
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedPin {
                pin: PinId(5),
                first: Channel::Override,
                second: Channel::Thrust
            })
        );
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let mut config = ReceiverConfig::default();
        config.dead_zone = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDeadZone(_))));
        config.dead_zone = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDeadZone(_))));

        let mut config = ReceiverConfig::default();
        config.idle_velocity = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidIdleVelocity(_))));
    }
}
