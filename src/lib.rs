//! Driver for arrays of discrete-color RGB LEDs wired for time multiplexing.
//!
//! Every LED gets its own anode select line and all of them share three
//! channel lines, red, green and blue. Only one LED is lit at any instant,
//! scanning fast enough makes the whole array look steady. Each channel is
//! either on or off, so an LED shows one of eight [`Color`]s, and a global
//! brightness from 0 to 8 blanks whole frames to dim the array.
//!
//! [`Multiplex::update`] performs one scan step. Call it from a tight loop,
//! await [`Multiplex::run`], or, with the `auto-update` feature, put the
//! driver in a [`SharedMultiplex`] and let an [`AutoUpdate`] timer interrupt
//! call it.
//!
//! ```ignore
//! let mut display = Multiplex::new_with_pins([a0, a1, a2], red, green, blue);
//! display.begin()?;
//! display.set_resistor_values(100.0, 10.0, 10.0);
//! display.set_forward_voltages(2.2, 3.2, 3.2);
//! display.set_supply_voltage(3.3);
//! display.set_color(0, Color::Red);
//! loop {
//!     display.update()?;
//! }
//! ```
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod color;
pub mod config;
pub mod device;
pub mod gpio;
pub mod multiplex;
pub mod power;
#[cfg(feature = "auto-update")]
pub mod scheduler;
#[cfg(feature = "auto-update")]
pub mod shared;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use color::{Channel, Color, Rgb};
pub use config::{ActiveLevel, ElectricalParameters, LineConfig};
pub use device::Lines;
pub use gpio::GpioLines;
pub use multiplex::{Multiplex, MultiplexError};
#[cfg(feature = "auto-update")]
pub use scheduler::{AutoUpdate, PeriodicTimer};
#[cfg(feature = "auto-update")]
pub use shared::SharedMultiplex;
