//! Arduino Nano 33 BLE / BLE Sense (nRF52840) with the 2.8" TFT shield
//!
//! The shield puts the data bus on digital pins D2..D9, which the Nano routes
//! to two ports:
//!
//! | LCD data bit | 7     | 6     | 5     | 4     | 3     | 2     | 1     | 0     |
//! |--------------|-------|-------|-------|-------|-------|-------|-------|-------|
//! | Digital pin  | D9    | D8    | D7    | D6    | D5    | D4    | D3    | D2    |
//! | Port/pin     | P0.27 | P0.21 | P0.23 | P1.14 | P1.13 | P1.15 | P1.12 | P1.11 |
//!
//! Control lines: RD on A0 (P0.04), WR on A1 (P0.05), CD on A2 (P0.30),
//! CS on A3 (P0.29).
//!
//! The core runs at 64MHz, so the 400ns read settle time takes 26 cycles.

use nrf52840_pac as pac;

use crate::{
    bus_map::{DataBusMap, DataLine},
    delay::NopDelay,
    interface::ParallelInterface,
    pins::{drive_high, DataPins, PortPin},
    traits::GpioPort,
};

/// Core clock of the nRF52840
pub const CPU_HZ: u32 = 64_000_000;

/// Index of P0 in [`DATA_BUS`]
pub const PORT0: u8 = 0;
/// Index of P1 in [`DATA_BUS`]
pub const PORT1: u8 = 1;

/// A GPIO port of the nRF52840, numbered like in [`DATA_BUS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    P0 = PORT0,
    P1 = PORT1,
}

impl Port {
    #[inline(always)]
    fn registers(&self) -> *const pac::p0::RegisterBlock {
        match self {
            Port::P0 => pac::P0::ptr(),
            Port::P1 => pac::P1::ptr(),
        }
    }
}

// SAFETY (all register accesses): the board functions handing out pins are
// unsafe, their callers promise exclusive use of those pins.
// OUTSET/OUTCLR/DIRSET/DIRCLR only affect the bits written as one.
impl GpioPort for Port {
    #[inline(always)]
    fn set_bits(&self, mask: u32) {
        unsafe { (*self.registers()).outset.write(|w| w.bits(mask)) }
    }

    #[inline(always)]
    fn clear_bits(&self, mask: u32) {
        unsafe { (*self.registers()).outclr.write(|w| w.bits(mask)) }
    }

    #[inline(always)]
    fn read_input(&self) -> u32 {
        unsafe { (*self.registers()).in_.read().bits() }
    }

    #[inline(always)]
    fn set_output(&self, mask: u32) {
        unsafe { (*self.registers()).dirset.write(|w| w.bits(mask)) }
    }

    #[inline(always)]
    fn set_input(&self, mask: u32) {
        unsafe { (*self.registers()).dirclr.write(|w| w.bits(mask)) }
    }
}

/// Data bus wiring of the shield
pub static DATA_BUS: DataBusMap<2> = DataBusMap::new([
    DataLine::new(PORT1, 11),
    DataLine::new(PORT1, 12),
    DataLine::new(PORT1, 15),
    DataLine::new(PORT1, 13),
    DataLine::new(PORT1, 14),
    DataLine::new(PORT0, 23),
    DataLine::new(PORT0, 21),
    DataLine::new(PORT0, 27),
]);

pub type Pin = PortPin<Port>;

const RD: Pin = PortPin::new(Port::P0, 4);
const WR: Pin = PortPin::new(Port::P0, 5);
const CD: Pin = PortPin::new(Port::P0, 30);
const CS: Pin = PortPin::new(Port::P0, 29);

pub type Delay = NopDelay<CPU_HZ>;

/// The complete bus of the shield
pub type Board = ParallelInterface<Port, Pin, Pin, Pin, Pin, Delay, 2>;

/// Control lines of the shield
pub struct ShieldControlPins {
    pub cs: Pin,
    pub cd: Pin,
    pub wr: Pin,
    pub rd: Pin,
}

/// The data lines of the shield
///
/// # Safety
///
/// Nothing else may drive or reconfigure P1.11..P1.15, P0.21, P0.23 and
/// P0.27 while the returned pins are in use.
pub unsafe fn data_pins() -> DataPins<Port, 2> {
    DataPins::new([Port::P0, Port::P1], &DATA_BUS)
}

/// The control lines of the shield, as idle (high) outputs
///
/// # Safety
///
/// Nothing else may drive or reconfigure P0.04, P0.05, P0.29 and P0.30
/// while the returned pins are in use.
pub unsafe fn shield_control_pins() -> ShieldControlPins {
    let output = |mut pin: Pin| {
        // level first, so the line doesn't glitch low
        drive_high(&mut pin);
        pin.configure_output();
        pin
    };
    ShieldControlPins {
        cs: output(CS),
        cd: output(CD),
        wr: output(WR),
        rd: output(RD),
    }
}

/// The shield's bus, ready for writing
///
/// # Safety
///
/// See [`data_pins`] and [`shield_control_pins`]. There must be only one
/// `Board` at a time.
pub unsafe fn take() -> Board {
    let control = shield_control_pins();
    ParallelInterface::new(
        data_pins(),
        control.cs,
        control.cd,
        control.wr,
        control.rd,
        Delay::new(),
    )
}
