//! Common data types for hardware abstraction interfaces
use core::fmt;

/// Receiver channels, in their stable storage order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Manual takeover switch
    Override = 0,
    /// Throttle stick
    Thrust = 1,
    /// Steering stick
    Rudder = 2,
}

impl Channel {
    /// Number of channels decoded by the receiver
    pub const COUNT: usize = 3;

    /// All channels in index order
    pub const ALL: [Channel; Channel::COUNT] = [Channel::Override, Channel::Thrust, Channel::Rudder];

    /// Index into per-channel arrays
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Override => write!(f, "override"),
            Channel::Thrust => write!(f, "thrust"),
            Channel::Rudder => write!(f, "rudder"),
        }
    }
}

/// Platform pin number
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

/// Logic transitions an interrupt can be raised on
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
    /// Either transition
    Change,
}
