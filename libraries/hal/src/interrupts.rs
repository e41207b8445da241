//! Pin change interrupt interface
use crate::types::{Channel, Edge, PinId};

/// Edge-triggered interrupt controller
///
/// The platform owns the actual interrupt vectors. After `attach`, every
/// matching edge on `pin` must be routed to the capture handler registered for
/// `channel`.
pub trait EdgeInterrupts {
    /// Platform specific failure
    type Error: core::fmt::Debug;

    /// Configure `pin` as a digital input with the line held low
    fn configure_input(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Route `edge` transitions on `pin` to the handler of `channel`
    fn attach(&mut self, pin: PinId, channel: Channel, edge: Edge) -> Result<(), Self::Error>;

    /// Stop dispatching to the attached handlers
    ///
    /// Edges arriving while suspended may be delivered after `resume`, but
    /// never concurrently with the suspended region.
    fn suspend(&mut self);

    /// Resume dispatching to the attached handlers
    fn resume(&mut self);
}
