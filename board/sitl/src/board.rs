//! Simulated receiver board
//!
//! Pin levels, the microsecond counter and the pin change interrupt
//! controller, all single threaded. Edges raised while the controller is
//! suspended are latched and serviced on resume, like a pending interrupt flag.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};
use hal::{Channel, Edge, EdgeInterrupts, MicrosClock, PinId};
use receiver::CaptureBank;
use thiserror::Error;

/// Number of GPIOs on the simulated board
pub const BOARD_PINS: u8 = 16;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("{0} does not exist on the simulated board")]
    UnknownPin(PinId),

    #[error("{0} is not configured as an input")]
    NotInput(PinId),
}

#[derive(Default)]
pub struct SimClock {
    now_us: Cell<u32>,
}

impl SimClock {
    pub fn advance(&self, us: u32) {
        self.now_us.set(self.now_us.get().wrapping_add(us));
    }
}

impl MicrosClock for SimClock {
    fn now_us(&self) -> u32 {
        self.now_us.get()
    }
}

/// Input pin reading a simulated line
#[derive(Clone, Default)]
pub struct SimPin {
    level: Rc<Cell<bool>>,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

struct Route {
    pin: PinId,
    channel: Channel,
    edge: Edge,
}

impl Route {
    fn fires_on(&self, level_high: bool) -> bool {
        match self.edge {
            Edge::Change => true,
            Edge::Rising => level_high,
            Edge::Falling => !level_high,
        }
    }
}

struct Controller {
    bank: &'static CaptureBank,
    clock: Rc<SimClock>,
    inputs: BTreeMap<PinId, SimPin>,
    routes: Vec<Route>,
    suspended: bool,
    pending: Vec<PinId>,
    dispatched: u64,
}

impl Controller {
    fn dispatch(&mut self, pin: PinId) {
        let Some(input) = self.inputs.get(&pin) else {
            return;
        };
        let level_high = input.level.get();
        for route in self.routes.iter().filter(|r| r.pin == pin && r.fires_on(level_high)) {
            let mut input = input.clone();
            match self.bank.handle_edge(route.channel, &mut input, &*self.clock) {
                Ok(()) => self.dispatched += 1,
                Err(never) => match never {},
            }
        }
    }
}

/// Handle to the simulated board, shared between the radio and the receiver
#[derive(Clone)]
pub struct SimBoard {
    clock: Rc<SimClock>,
    controller: Rc<RefCell<Controller>>,
}

impl SimBoard {
    pub fn new(bank: &'static CaptureBank) -> Self {
        let clock = Rc::new(SimClock::default());
        let controller = Controller {
            bank,
            clock: clock.clone(),
            inputs: BTreeMap::new(),
            routes: Vec::new(),
            suspended: false,
            pending: Vec::new(),
            dispatched: 0,
        };
        SimBoard {
            clock,
            controller: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn interrupts(&self) -> SimInterrupts {
        SimInterrupts {
            controller: self.controller.clone(),
        }
    }

    /// Drive the line of `pin`; lines not configured as inputs are not observed
    pub fn set_level(&self, pin: PinId, level_high: bool) {
        let mut controller = self.controller.borrow_mut();
        let Some(input) = controller.inputs.get(&pin) else {
            return;
        };
        if input.level.replace(level_high) == level_high {
            return;
        }

        if controller.suspended {
            if !controller.pending.contains(&pin) {
                controller.pending.push(pin);
            }
        } else {
            controller.dispatch(pin);
        }
    }

    /// Handler invocations so far
    pub fn dispatched(&self) -> u64 {
        self.controller.borrow().dispatched
    }
}

/// Interrupt controller view handed to the receiver
pub struct SimInterrupts {
    controller: Rc<RefCell<Controller>>,
}

impl EdgeInterrupts for SimInterrupts {
    type Error = SimError;

    fn configure_input(&mut self, pin: PinId) -> Result<(), Self::Error> {
        if pin.0 >= BOARD_PINS {
            return Err(SimError::UnknownPin(pin));
        }
        self.controller.borrow_mut().inputs.insert(pin, SimPin::default());
        Ok(())
    }

    fn attach(&mut self, pin: PinId, channel: Channel, edge: Edge) -> Result<(), Self::Error> {
        let mut controller = self.controller.borrow_mut();
        if !controller.inputs.contains_key(&pin) {
            return Err(SimError::NotInput(pin));
        }
        controller.routes.push(Route { pin, channel, edge });
        Ok(())
    }

    fn suspend(&mut self) {
        self.controller.borrow_mut().suspended = true;
    }

    fn resume(&mut self) {
        let mut controller = self.controller.borrow_mut();
        controller.suspended = false;
        let pending = std::mem::take(&mut controller.pending);
        for pin in pending {
            controller.dispatch(pin);
        }
    }
}
