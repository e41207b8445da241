//! Differential drive mixing
//!
//! Linear skid-steer law: turning scales the inside motor down in proportion
//! to the rudder deflection while the outside motor keeps the full throttle.
//! Outputs are not clamped. For sticks inside [-1, 1] no motor is asked for
//! more than the throttle magnitude, but extrapolated rudder values (pulses
//! outside calibration) can exceed it or flip the sign of the inside motor.
//! Limiting that is left to the motor driver.

/// Everything the mixer consumes for one evaluation
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MixerInputs {
    /// Normalized throttle stick
    pub throttle: f32,
    /// Normalized rudder stick
    pub rudder: f32,
    /// Autonomy has requested the throttle
    pub autonomy_active: bool,
    /// Throttle requested by autonomy
    pub autonomy_velocity: f32,
}

impl MixerInputs {
    /// Throttle fed to the mixing law
    pub fn effective_throttle(&self) -> f32 {
        if self.autonomy_active {
            self.autonomy_velocity
        } else {
            self.throttle
        }
    }
}

/// Actuator commands for both sides of the vehicle
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MotorMix {
    pub right_velocity: f32,
    pub left_velocity: f32,
    pub right_fan: f32,
    pub left_fan: f32,
}

pub fn right_velocity(throttle: f32, rudder: f32) -> f32 {
    if rudder > 0.0 && throttle > 0.0 {
        throttle
    } else if throttle > 0.0 {
        throttle * (1.0 + rudder)
    } else if rudder < 0.0 {
        throttle
    } else {
        throttle * (1.0 - rudder)
    }
}

pub fn left_velocity(throttle: f32, rudder: f32) -> f32 {
    // Turning right slows the left motor
    if rudder > 0.0 && throttle > 0.0 {
        throttle * (1.0 - rudder)
    } else if throttle > 0.0 {
        throttle
    } else if rudder < 0.0 {
        throttle * (1.0 + rudder)
    } else {
        throttle
    }
}

/// Fan angle command, currently the rudder deflection passed through
pub fn fan_angle(rudder: f32) -> f32 {
    rudder
}

pub fn mix(inputs: MixerInputs) -> MotorMix {
    let throttle = inputs.effective_throttle();
    MotorMix {
        right_velocity: right_velocity(throttle, inputs.rudder),
        left_velocity: left_velocity(throttle, inputs.rudder),
        right_fan: fan_angle(inputs.rudder),
        left_fan: fan_angle(inputs.rudder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_turn_right_slows_left_motor() {
        assert!(close(right_velocity(0.5, 0.5), 0.5));
        assert!(close(left_velocity(0.5, 0.5), 0.25));
    }

    #[test]
    fn test_turn_left_slows_right_motor() {
        assert!(close(right_velocity(0.8, -0.3), 0.56));
        assert!(close(left_velocity(0.8, -0.3), 0.8));
    }

    #[test]
    fn test_straight_and_stopped() {
        assert!(close(right_velocity(0.6, 0.0), 0.6));
        assert!(close(left_velocity(0.6, 0.0), 0.6));
        assert_eq!(right_velocity(0.0, 0.0), 0.0);
        assert_eq!(left_velocity(0.0, 0.0), 0.0);
        assert_eq!(right_velocity(0.0, 0.7), 0.0);
        assert_eq!(left_velocity(0.0, -0.7), 0.0);
    }

    #[test]
    fn test_reverse() {
        // Reversing while steering right: right motor reduced, left full
        assert!(close(right_velocity(-0.5, 0.5), -0.25));
        assert!(close(left_velocity(-0.5, 0.5), -0.5));
        // Reversing while steering left: left motor reduced, right full
        assert!(close(right_velocity(-0.5, -0.5), -0.5));
        assert!(close(left_velocity(-0.5, -0.5), -0.25));
    }

    #[test]
    fn test_mirror_symmetry() {
        let steps = [-1.0, -0.75, -0.3, -0.01, 0.0, 0.01, 0.3, 0.75, 1.0];
        for &throttle in &steps {
            for &rudder in &steps {
                assert!(
                    close(right_velocity(throttle, rudder), left_velocity(throttle, -rudder)),
                    "throttle {throttle} rudder {rudder}"
                );
            }
        }
    }

    #[test]
    fn test_output_is_not_clamped() {
        // Full deflection stays within the throttle magnitude
        assert!(close(right_velocity(-1.0, -1.0), -1.0));
        assert!(close(right_velocity(-1.0, 1.0), 0.0));
        assert!(close(left_velocity(-1.0, -1.0), 0.0));
        assert!(close(right_velocity(1.0, -1.0), 0.0));
        assert!(close(left_velocity(-1.0, 1.0), -1.0));

        // Extrapolated inputs pass straight through the law
        assert!(close(right_velocity(2.0, 0.5), 2.0));
        assert!(close(right_velocity(0.5, -3.0), -1.0));
        assert!(close(right_velocity(-1.0, 2.0), 1.0));
    }

    #[test]
    fn test_autonomy_velocity_replaces_throttle() {
        let inputs = MixerInputs {
            throttle: 0.9,
            rudder: 0.5,
            autonomy_active: true,
            autonomy_velocity: 0.4,
        };
        let out = mix(inputs);
        assert!(close(out.right_velocity, 0.4));
        assert!(close(out.left_velocity, 0.2));

        let out = mix(MixerInputs {
            autonomy_active: false,
            ..inputs
        });
        assert!(close(out.right_velocity, 0.9));
        assert!(close(out.left_velocity, 0.45));
    }

    #[test]
    fn test_fans_follow_rudder() {
        let out = mix(MixerInputs {
            throttle: 0.2,
            rudder: -0.35,
            ..Default::default()
        });
        assert_eq!(out.right_fan, -0.35);
        assert_eq!(out.left_fan, -0.35);
    }
}
