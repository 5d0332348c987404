//! A driver for the 8-bit parallel ("8080") bus of TFT LCD controllers
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! It is the lowest layer of a TFT stack: it knows how to switch the data bus
//! between writing and reading, how to strobe a byte out or in, and how to
//! address controller registers. Drawing, colors and controller specific init
//! sequences live in the crates that use it.
//!
//! # Requirements
//!
//! ### Data bus
//!
//! - 8 data lines, which may be scattered over arbitrary pins of up to `N`
//!   GPIO ports. The wiring is described once per board by a const
//!   [`DataBusMap`](bus_map::DataBusMap).
//! - The ports need atomic write-1-to-set/clear registers for output and
//!   direction (see [`GpioPort`](traits::GpioPort)).
//!
//! ### Control lines
//!
//! - CS, WR and RD are active low
//! - CD (sometimes called RS or DC) is low for commands and high for data
//! - Any `OutputPin` with an infallible error type can be used
//!
//! ### Timing
//!
//! - Reads wait at least 400ns between RD going low and sampling the bus.
//!   The busy wait has to be calibrated for the core clock of the target,
//!   see [`NopDelay`](delay::NopDelay).
//!
//! ### Board
//!
//! Exactly one board feature has to be enabled. Supported boards:
//!
//! - `nano33ble`: Arduino Nano 33 BLE / BLE Sense with the TFT shield
//!
//! # Examples
//!
//! ```ignore
//! use tftlcd_parallel::prelude::*;
//! use tftlcd_parallel::boards::nano33ble;
//!
//! let mut tft = unsafe { nano33ble::take() };
//!
//! tft.cs_active();
//! // memory access control
//! tft.write_register8(0x36, 0xA8);
//! tft.cs_idle();
//! ```
//!
//! Read-back is composed from the primitive operations:
//!
//! ```ignore
//! let mut id = [0u8; 4];
//! tft.with_cs(|tft| tft.read_register(0xD3, &mut id));
//! ```
#![no_std]

#[cfg(not(any(feature = "nano33ble")))]
compile_error!(
    "Board type unsupported / not recognized: enable exactly one board feature (supported: `nano33ble`)"
);

pub mod bus_map;
pub mod delay;
pub mod error;
pub mod pins;
pub mod traits;

/// Interface for the physical connection between display and the controlling device
pub mod interface;

pub mod boards;

#[cfg(feature = "display-interface")]
mod data_command;

#[cfg(test)]
pub(crate) mod sim;

pub mod prelude {
    pub use crate::bus_map::{DataBusMap, DataLine};
    pub use crate::delay::NopDelay;
    pub use crate::error::MapError;
    pub use crate::interface::{ControlLine, Direction, ParallelInterface, READ_SETTLE_NS};
    pub use crate::pins::{DataPins, PortPin};
    pub use crate::traits::{Command, GpioPort};
}
