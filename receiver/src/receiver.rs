use hal::{Channel, ChannelSource, Edge, EdgeInterrupts};
use log::{debug, info, trace, warn};

use crate::capture::CaptureBank;
use crate::config::ReceiverConfig;
use crate::control::AutonomyControl;
use crate::error::ReceiverError;
use crate::mixer::{self, MixerInputs, MotorMix};
use crate::normalize::normalize;
use crate::override_state::OverrideState;
use crate::store::ChannelValues;

/// Decision taken by one update tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Override pulse was mid-band, nothing changed
    Held,
    /// Autonomy in command, sticks ignored
    Disabled,
    /// Radio in command, sticks refreshed
    Enabled,
}

/// Suspends the capture handlers for as long as it lives
struct CriticalSection<'a, I: EdgeInterrupts> {
    interrupts: &'a mut I,
}

impl<'a, I: EdgeInterrupts> CriticalSection<'a, I> {
    fn enter(interrupts: &'a mut I) -> Self {
        interrupts.suspend();
        CriticalSection { interrupts }
    }
}

impl<I: EdgeInterrupts> Drop for CriticalSection<'_, I> {
    fn drop(&mut self) {
        self.interrupts.resume();
    }
}

/// Three channel PWM receiver with manual override arbitration
///
/// The capture handlers publish into `bank` from interrupt context. `update`
/// runs once per control tick on the main loop and is the only place channel
/// values change. Mixer outputs are read on demand between updates.
pub struct RcReceiver<'a, I: EdgeInterrupts> {
    config: ReceiverConfig,
    bank: &'a CaptureBank,
    interrupts: I,
    state: OverrideState,
    values: ChannelValues,
    control: AutonomyControl,
}

impl<'a, I: EdgeInterrupts> RcReceiver<'a, I> {
    /// Validate `config`, configure the three input pins and attach the
    /// capture handlers on both edges
    pub fn new(config: ReceiverConfig, bank: &'a CaptureBank, mut interrupts: I) -> Result<Self, ReceiverError<I::Error>> {
        config.validate()?;

        for channel in Channel::ALL {
            let pin = config.pins.pin(channel);
            interrupts
                .configure_input(pin)
                .map_err(|error| ReceiverError::Configure { pin, error })?;
        }

        // Override last, so it never fires before the sticks are being timed
        for channel in [Channel::Rudder, Channel::Thrust, Channel::Override] {
            let pin = config.pins.pin(channel);
            interrupts
                .attach(pin, channel, Edge::Change)
                .map_err(|error| ReceiverError::Attach { channel, pin, error })?;
            debug!("{} capture attached to {}", channel, pin);
        }

        Ok(RcReceiver {
            control: AutonomyControl::new(config.idle_velocity),
            config,
            bank,
            interrupts,
            state: OverrideState::Disabled,
            values: ChannelValues::default(),
        })
    }

    /// Run one control tick
    pub fn update(&mut self) -> UpdateOutcome {
        let previous = self.state;
        let outcome = {
            let _section = CriticalSection::enter(&mut self.interrupts);
            let store = self.bank.store();

            let override_width = store.pulse_width(Channel::Override);
            self.values.override_width_us = override_width;

            match self.state.next(override_width, &self.config.thresholds) {
                None => UpdateOutcome::Held,
                Some(OverrideState::Disabled) => {
                    // Stop listening to the sticks
                    if previous.is_enabled() {
                        self.values.zero_sticks();
                    }
                    self.state = OverrideState::Disabled;
                    self.control.idle(self.config.idle_velocity);
                    UpdateOutcome::Disabled
                }
                Some(OverrideState::Enabled) => {
                    let calibration = &self.config.calibration;
                    self.state = OverrideState::Enabled;
                    self.values.thrust = normalize(store.pulse_width(Channel::Thrust), calibration.throttle, self.config.dead_zone);
                    self.values.rudder = normalize(store.pulse_width(Channel::Rudder), calibration.rudder, self.config.dead_zone);
                    UpdateOutcome::Enabled
                }
            }
        };

        match (previous, self.state) {
            (OverrideState::Disabled, OverrideState::Enabled) => {
                info!("radio override engaged ({} us)", self.values.override_width_us);
            }
            (OverrideState::Enabled, OverrideState::Disabled) => {
                warn!("radio override dropped ({} us), sticks zeroed", self.values.override_width_us);
            }
            _ if outcome == UpdateOutcome::Held => {
                trace!("override pulse {} us is mid-band, holding", self.values.override_width_us);
            }
            _ => {}
        }

        outcome
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn interrupts(&self) -> &I {
        &self.interrupts
    }

    pub fn override_state(&self) -> OverrideState {
        self.state
    }

    pub fn values(&self) -> &ChannelValues {
        &self.values
    }

    /// Latest width published by the capture handler of `channel`
    pub fn pulse_width(&self, channel: Channel) -> u32 {
        self.bank.store().pulse_width(channel)
    }

    pub fn control_state(&self) -> bool {
        self.control.active
    }

    pub fn set_control_state(&mut self, active: bool) {
        self.control.active = active;
    }

    pub fn control_velocity(&self) -> f32 {
        self.control.velocity
    }

    pub fn set_control_velocity(&mut self, velocity: f32) {
        self.control.velocity = velocity;
    }

    pub fn mixer_inputs(&self) -> MixerInputs {
        MixerInputs {
            throttle: self.values.thrust,
            rudder: self.values.rudder,
            autonomy_active: self.control.active,
            autonomy_velocity: self.control.velocity,
        }
    }

    pub fn mix(&self) -> MotorMix {
        mixer::mix(self.mixer_inputs())
    }
}

impl<I: EdgeInterrupts> ChannelSource for RcReceiver<'_, I> {
    fn channel_value(&self, channel: Channel) -> f32 {
        self.values.get(channel)
    }

    fn override_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    fn right_velocity(&self) -> f32 {
        let inputs = self.mixer_inputs();
        mixer::right_velocity(inputs.effective_throttle(), inputs.rudder)
    }

    fn left_velocity(&self) -> f32 {
        let inputs = self.mixer_inputs();
        mixer::left_velocity(inputs.effective_throttle(), inputs.rudder)
    }

    fn right_fan(&self) -> f32 {
        mixer::fan_angle(self.values.rudder)
    }

    fn left_fan(&self) -> f32 {
        mixer::fan_angle(self.values.rudder)
    }
}
