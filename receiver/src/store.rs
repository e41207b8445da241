use core::sync::atomic::{AtomicU32, Ordering};

use hal::Channel;

/// Latest pulse widths published by the capture handlers
///
/// Every slot has a single writer, the handler of its channel, and a single
/// reader, the update orchestrator. Word-sized atomics keep each read and
/// write whole without a global lock.
pub struct ChannelStore {
    widths: [AtomicU32; Channel::COUNT],
}

impl ChannelStore {
    pub const fn new() -> Self {
        Self {
            widths: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
        }
    }

    /// Publish a completed pulse for `channel`
    pub fn publish(&self, channel: Channel, width_us: u32) {
        self.widths[channel.index()].store(width_us, Ordering::Release);
    }

    /// Most recent completed pulse width for `channel` in microseconds
    pub fn pulse_width(&self, channel: Channel) -> u32 {
        self.widths[channel.index()].load(Ordering::Acquire)
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Channel values derived on the last decisive update tick
///
/// The override width is kept raw for threshold comparison. Thrust and rudder
/// are normalized stick positions.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct ChannelValues {
    pub override_width_us: u32,
    pub thrust: f32,
    pub rudder: f32,
}

impl ChannelValues {
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Override => self.override_width_us as f32,
            Channel::Thrust => self.thrust,
            Channel::Rudder => self.rudder,
        }
    }

    /// Drop manual stick inputs
    pub fn zero_sticks(&mut self) {
        self.thrust = 0.0;
        self.rudder = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_slots_are_independent() {
        let store = ChannelStore::new();
        store.publish(Channel::Thrust, 1500);
        store.publish(Channel::Rudder, 1250);

        assert_eq!(store.pulse_width(Channel::Override), 0);
        assert_eq!(store.pulse_width(Channel::Thrust), 1500);
        assert_eq!(store.pulse_width(Channel::Rudder), 1250);

        store.publish(Channel::Thrust, 1700);
        assert_eq!(store.pulse_width(Channel::Thrust), 1700);
        assert_eq!(store.pulse_width(Channel::Rudder), 1250);
    }

    #[test]
    fn test_channel_values_view() {
        let mut values = ChannelValues {
            override_width_us: 1800,
            thrust: 0.4,
            rudder: -0.2,
        };
        assert_eq!(values.get(Channel::Override), 1800.0);
        assert_eq!(values.get(Channel::Thrust), 0.4);
        assert_eq!(values.get(Channel::Rudder), -0.2);

        values.zero_sticks();
        assert_eq!(values.thrust, 0.0);
        assert_eq!(values.rudder, 0.0);
        assert_eq!(values.override_width_us, 1800, "override width is not a stick");
    }
}
