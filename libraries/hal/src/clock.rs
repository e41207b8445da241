//! Monotonic time source

/// Free-running microsecond counter
///
/// The counter is 32 bits wide and wraps roughly every 71 minutes. Consumers
/// must compute intervals with wrapping arithmetic.
pub trait MicrosClock {
    /// Current timestamp in microseconds
    fn now_us(&self) -> u32;
}

