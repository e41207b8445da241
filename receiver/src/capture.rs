//! Pulse width capture
//!
//! One handler per channel, invoked from interrupt context on every logic
//! transition of its pin. A rising edge starts the timer, a falling edge
//! publishes the elapsed time. Widths are not validated here; out-of-band
//! values are dealt with by the override state machine and normalizer.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::InputPin;
use hal::{Channel, MicrosClock};

use crate::store::ChannelStore;

/// Edge timer for a single channel
pub struct PulseCapture {
    channel: Channel,
    start_us: AtomicU32,
}

impl PulseCapture {
    pub const fn new(channel: Channel) -> Self {
        Self {
            channel,
            start_us: AtomicU32::new(0),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Record a transition to `level_high` observed at `now_us`
    pub fn on_edge(&self, level_high: bool, now_us: u32, store: &ChannelStore) {
        if level_high {
            self.start_us.store(now_us, Ordering::Relaxed);
        } else {
            // Counter rollover between the two edges still yields the true width
            let width = now_us.wrapping_sub(self.start_us.load(Ordering::Relaxed));
            store.publish(self.channel, width);
        }
    }

    /// Interrupt entry point: sample the pin level and the clock, then record
    ///
    /// A failed pin read leaves the timer and the published width untouched.
    pub fn handle_edge<P, C>(&self, pin: &mut P, clock: &C, store: &ChannelStore) -> Result<(), P::Error>
    where
        P: InputPin,
        C: MicrosClock,
    {
        let level_high = pin.is_high()?;
        self.on_edge(level_high, clock.now_us(), store);
        Ok(())
    }
}

/// The capture handlers of one receiver together with the store they publish to
///
/// Intended to live in a `static` so platform interrupt vectors can reach it.
pub struct CaptureBank {
    captures: [PulseCapture; Channel::COUNT],
    store: ChannelStore,
}

impl CaptureBank {
    pub const fn new() -> Self {
        Self {
            captures: [
                PulseCapture::new(Channel::Override),
                PulseCapture::new(Channel::Thrust),
                PulseCapture::new(Channel::Rudder),
            ],
            store: ChannelStore::new(),
        }
    }

    pub fn capture(&self, channel: Channel) -> &PulseCapture {
        &self.captures[channel.index()]
    }

    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    pub fn on_edge(&self, channel: Channel, level_high: bool, now_us: u32) {
        self.capture(channel).on_edge(level_high, now_us, &self.store);
    }

    pub fn handle_edge<P, C>(&self, channel: Channel, pin: &mut P, clock: &C) -> Result<(), P::Error>
    where
        P: InputPin,
        C: MicrosClock,
    {
        self.capture(channel).handle_edge(pin, clock, &self.store)
    }
}

impl Default for CaptureBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    struct FixedClock(Cell<u32>);

    impl MicrosClock for FixedClock {
        fn now_us(&self) -> u32 {
            self.0.get()
        }
    }

    struct LevelPin(bool);

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl InputPin for LevelPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[derive(Debug)]
    struct BusFault;

    impl Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = BusFault;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(BusFault)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(BusFault)
        }
    }

    #[test]
    fn test_pulse_width_measured_between_edges() {
        let bank = CaptureBank::new();
        bank.on_edge(Channel::Thrust, true, 10_000);
        assert_eq!(bank.store().pulse_width(Channel::Thrust), 0, "rising edge alone publishes nothing");

        bank.on_edge(Channel::Thrust, false, 11_500);
        assert_eq!(bank.store().pulse_width(Channel::Thrust), 1500);
    }

    #[test]
    fn test_channels_do_not_share_timers() {
        let bank = CaptureBank::new();
        bank.on_edge(Channel::Override, true, 0);
        bank.on_edge(Channel::Rudder, true, 500);
        bank.on_edge(Channel::Override, false, 1800);
        bank.on_edge(Channel::Rudder, false, 1700);

        assert_eq!(bank.store().pulse_width(Channel::Override), 1800);
        assert_eq!(bank.store().pulse_width(Channel::Rudder), 1200);
        assert_eq!(bank.store().pulse_width(Channel::Thrust), 0);
    }

    #[test]
    fn test_timer_rollover() {
        let bank = CaptureBank::new();
        bank.on_edge(Channel::Rudder, true, u32::MAX - 499);
        bank.on_edge(Channel::Rudder, false, 1000);
        assert_eq!(bank.store().pulse_width(Channel::Rudder), 1500);
    }

    #[test]
    fn test_rising_edge_restarts_timer() {
        let bank = CaptureBank::new();
        bank.on_edge(Channel::Thrust, true, 100);
        bank.on_edge(Channel::Thrust, true, 5_000);
        bank.on_edge(Channel::Thrust, false, 6_100);
        assert_eq!(bank.store().pulse_width(Channel::Thrust), 1100);
    }

    #[test]
    fn test_handle_edge_samples_pin_and_clock() {
        let bank = CaptureBank::new();
        let clock = FixedClock(Cell::new(2_000));

        bank.handle_edge(Channel::Override, &mut LevelPin(true), &clock).unwrap();
        clock.0.set(3_900);
        bank.handle_edge(Channel::Override, &mut LevelPin(false), &clock).unwrap();

        assert_eq!(bank.store().pulse_width(Channel::Override), 1900);
    }

    #[test]
    fn test_failed_pin_read_changes_nothing() {
        let bank = CaptureBank::new();
        let clock = FixedClock(Cell::new(0));
        bank.on_edge(Channel::Thrust, true, 0);
        bank.on_edge(Channel::Thrust, false, 1400);

        clock.0.set(9_000);
        assert!(bank.handle_edge(Channel::Thrust, &mut BrokenPin, &clock).is_err());
        assert_eq!(bank.store().pulse_width(Channel::Thrust), 1400);
    }
}
