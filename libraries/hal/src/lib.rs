#![no_std]

mod clock;
mod interrupts;
mod rc_input;
mod types;

pub use clock::*;
pub use interrupts::*;
pub use rc_input::*;
pub use types::*;
