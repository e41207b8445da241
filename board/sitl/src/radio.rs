//! Simulated transmitter and receiver outputs
//!
//! Every 20 ms frame each live channel emits one high pulse whose width
//! encodes the stick or switch position. Channels are pulsed one after the
//! other, as a PPM receiver demultiplexes them.

use hal::{Channel, MicrosClock};
use receiver::ChannelPins;

use crate::board::SimBoard;

/// Length of one radio frame
pub const FRAME_US: u32 = 20_000;

/// Low time between consecutive channel pulses
const CHANNEL_GAP_US: u32 = 300;

/// Pulse widths for one frame, `None` where the channel is silent
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioFrame {
    pub override_us: Option<u32>,
    pub thrust_us: Option<u32>,
    pub rudder_us: Option<u32>,
}

impl RadioFrame {
    pub fn width(&self, channel: Channel) -> Option<u32> {
        match channel {
            Channel::Override => self.override_us,
            Channel::Thrust => self.thrust_us,
            Channel::Rudder => self.rudder_us,
        }
    }
}

pub struct PpmRadio {
    pins: ChannelPins,
}

impl PpmRadio {
    pub fn new(pins: ChannelPins) -> Self {
        PpmRadio { pins }
    }

    /// Emit one frame of pulses and advance the clock to the end of the frame
    pub fn transmit(&self, board: &SimBoard, frame: &RadioFrame) {
        let clock = board.clock();
        let start = clock.now_us();

        for channel in Channel::ALL {
            if let Some(width) = frame.width(channel) {
                let pin = self.pins.pin(channel);
                board.set_level(pin, true);
                clock.advance(width);
                board.set_level(pin, false);
            }
            clock.advance(CHANNEL_GAP_US);
        }

        let elapsed = clock.now_us().wrapping_sub(start);
        if elapsed < FRAME_US {
            clock.advance(FRAME_US - elapsed);
        }
    }
}

/// Linear stick movement across a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub from_us: u32,
    pub to_us: u32,
}

impl Sweep {
    pub const fn hold(us: u32) -> Self {
        Sweep { from_us: us, to_us: us }
    }

    pub const fn new(from_us: u32, to_us: u32) -> Self {
        Sweep { from_us, to_us }
    }

    /// Width at `tick` of `ticks`
    pub fn at(&self, tick: u32, ticks: u32) -> u32 {
        if ticks <= 1 {
            return self.to_us;
        }
        let span = i64::from(self.to_us) - i64::from(self.from_us);
        let offset = span * i64::from(tick.min(ticks - 1)) / i64::from(ticks - 1);
        (i64::from(self.from_us) + offset) as u32
    }
}

/// One segment of a scripted session
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: &'static str,
    pub ticks: u32,
    pub override_us: Option<u32>,
    pub thrust: Option<Sweep>,
    pub rudder: Option<Sweep>,
    /// Velocity requested by the autonomy stack, if it is driving
    pub autonomy_velocity: Option<f32>,
}

impl Phase {
    pub fn frame(&self, tick: u32) -> RadioFrame {
        RadioFrame {
            override_us: self.override_us,
            thrust_us: self.thrust.map(|s| s.at(tick, self.ticks)),
            rudder_us: self.rudder.map(|s| s.at(tick, self.ticks)),
        }
    }
}

/// Power up with no transmitter, take manual control, pass through a
/// mid-band override reading, then hand back to autonomy
pub fn default_scenario() -> Vec<Phase> {
    vec![
        Phase {
            name: "no signal",
            ticks: 25,
            override_us: None,
            thrust: None,
            rudder: None,
            autonomy_velocity: None,
        },
        Phase {
            name: "manual drive, easing right",
            ticks: 100,
            override_us: Some(1800),
            thrust: Some(Sweep::new(1500, 1900)),
            rudder: Some(Sweep::new(1500, 1750)),
            autonomy_velocity: None,
        },
        Phase {
            name: "override mid-band",
            ticks: 25,
            override_us: Some(1400),
            thrust: Some(Sweep::new(1900, 1100)),
            rudder: Some(Sweep::hold(1500)),
            autonomy_velocity: None,
        },
        Phase {
            name: "manual drive, turning left",
            ticks: 50,
            override_us: Some(1800),
            thrust: Some(Sweep::hold(1800)),
            rudder: Some(Sweep::new(1500, 1200)),
            autonomy_velocity: None,
        },
        Phase {
            name: "override released",
            ticks: 25,
            override_us: Some(1000),
            thrust: Some(Sweep::hold(1800)),
            rudder: Some(Sweep::hold(1200)),
            autonomy_velocity: None,
        },
        Phase {
            name: "autonomy cruise",
            ticks: 50,
            override_us: Some(1000),
            thrust: Some(Sweep::hold(1500)),
            rudder: Some(Sweep::hold(1500)),
            autonomy_velocity: Some(0.6),
        },
    ]
}
