use core::convert::Infallible;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    pins::{drive_high, drive_low, DataPins},
    traits::{Command, GpioPort},
};

/// Minimum time between RD going low and the data being valid on the bus
pub const READ_SETTLE_NS: u32 = 400;

/// Electrical direction of the data lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Data lines are outputs, the host drives the bus
    Write,
    /// Data lines are inputs, the controller drives the bus while RD is low
    Read,
}

/// The four control lines of the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// Chip select, active low
    Cs,
    /// Command/Data, asserted (low) for commands
    Cd,
    /// Write strobe, active low
    Wr,
    /// Read strobe, active low
    Rd,
}

/// The parallel bus of a TFT controller
///
/// Owns the data lines, the four control lines and the delay used for the
/// read strobe. All operations are infallible and run to completion; there
/// is no locking, so the bus needs a single owner.
///
/// The direction of the data lines is tracked, and transfers in the wrong
/// direction are caught by debug assertions.
pub struct ParallelInterface<P, CS, CD, WR, RD, D, const N: usize> {
    /// Data lines
    data: DataPins<P, N>,
    /// Chip Select (low for selected)
    cs: CS,
    /// Command/Data Control Pin (High for data, Low for command)
    cd: CD,
    /// Write strobe, the controller latches the bus on the rising edge
    wr: WR,
    /// Read strobe, the controller drives the bus while it is low
    rd: RD,
    /// Delay for the read settle time
    delay: D,
    direction: Direction,
}

impl<P, CS, CD, WR, RD, D, const N: usize> ParallelInterface<P, CS, CD, WR, RD, D, N>
where
    P: GpioPort,
    CS: OutputPin<Error = Infallible>,
    CD: OutputPin<Error = Infallible>,
    WR: OutputPin<Error = Infallible>,
    RD: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Creates a new `ParallelInterface`
    ///
    /// All control lines are set to their idle level (high, CD on data) and
    /// the bus is switched to [`Direction::Write`]. The control pins have to be
    /// outputs already.
    pub fn new(data: DataPins<P, N>, cs: CS, cd: CD, wr: WR, rd: RD, delay: D) -> Self {
        let mut interface = ParallelInterface {
            data,
            cs,
            cd,
            wr,
            rd,
            delay,
            direction: Direction::Write,
        };
        interface.idle_control(ControlLine::Cs);
        interface.idle_control(ControlLine::Cd);
        interface.idle_control(ControlLine::Wr);
        interface.idle_control(ControlLine::Rd);
        interface.set_write_direction();

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "parallel bus on {} ports, {} lanes",
            N,
            interface.data.map().lane_count()
        );

        interface
    }

    /// Current direction of the data lines
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Makes the data lines outputs, needed before any write
    #[inline(always)]
    pub fn set_write_direction(&mut self) {
        self.data.set_output();
        self.direction = Direction::Write;
    }

    /// Makes the data lines inputs, needed before any read
    #[inline(always)]
    pub fn set_read_direction(&mut self) {
        self.data.set_input();
        self.direction = Direction::Read;
    }

    /// Drives a control line to its active level
    #[inline(always)]
    pub fn assert_control(&mut self, line: ControlLine) {
        match line {
            ControlLine::Cs => drive_low(&mut self.cs),
            ControlLine::Cd => drive_low(&mut self.cd),
            ControlLine::Wr => drive_low(&mut self.wr),
            ControlLine::Rd => drive_low(&mut self.rd),
        }
    }

    /// Drives a control line to its idle level (CD: data)
    #[inline(always)]
    pub fn idle_control(&mut self, line: ControlLine) {
        match line {
            ControlLine::Cs => drive_high(&mut self.cs),
            ControlLine::Cd => drive_high(&mut self.cd),
            ControlLine::Wr => drive_high(&mut self.wr),
            ControlLine::Rd => drive_high(&mut self.rd),
        }
    }

    /// Selects the controller
    #[inline(always)]
    pub fn cs_active(&mut self) {
        drive_low(&mut self.cs);
    }

    /// Deselects the controller
    #[inline(always)]
    pub fn cs_idle(&mut self) {
        drive_high(&mut self.cs);
    }

    /// Selects the controller for the duration of `f`
    pub fn with_cs<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        // activate with cs low
        self.cs_active();
        let result = f(self);
        // deactivate with cs high
        self.cs_idle();
        result
    }

    /// Strobes one byte out
    ///
    /// The bus has to be in [`Direction::Write`].
    #[inline(always)]
    pub fn write_byte(&mut self, value: u8) {
        debug_assert!(
            self.direction == Direction::Write,
            "write strobe while the data bus is set up for reading"
        );
        self.data.drive(value);
        drive_low(&mut self.wr);
        drive_high(&mut self.wr);
    }

    /// Strobes one byte in
    ///
    /// The bus has to be in [`Direction::Read`]. Waits [`READ_SETTLE_NS`]
    /// between pulling RD low and sampling the data lines.
    #[inline(always)]
    pub fn read_byte(&mut self) -> u8 {
        debug_assert!(
            self.direction == Direction::Read,
            "read strobe while the data bus is set up for writing"
        );
        drive_low(&mut self.rd);
        self.delay.delay_ns(READ_SETTLE_NS);
        let value = self.data.sample();
        drive_high(&mut self.rd);
        value
    }

    /// Sets a register with an 8 bit address to an 8 bit value
    pub fn write_register8(&mut self, address: u8, value: u8) {
        drive_low(&mut self.cd);
        self.write_byte(address);
        drive_high(&mut self.cd);
        self.write_byte(value);
    }

    /// Sets a register with a 16 bit address to a 16 bit value
    ///
    /// Address and value are both sent high byte first.
    pub fn write_register16(&mut self, address: u16, value: u16) {
        let [address_high, address_low] = address.to_be_bytes();
        let [value_high, value_low] = value.to_be_bytes();

        drive_low(&mut self.cd);
        self.write_byte(address_high);
        self.write_byte(address_low);
        drive_high(&mut self.cd);
        self.write_byte(value_high);
        self.write_byte(value_low);
    }

    /// Sets two 8 bit addressed registers to the two halves of `value`
    ///
    /// `address_high` gets the high byte, `address_low` the low byte. For
    /// controllers that split 16 bit settings over a pair of 8 bit registers.
    pub fn write_register_pair(&mut self, address_high: u8, address_low: u8, value: u16) {
        let [value_high, value_low] = value.to_be_bytes();

        drive_low(&mut self.cd);
        self.write_byte(address_high);
        drive_high(&mut self.cd);
        self.write_byte(value_high);
        drive_low(&mut self.cd);
        self.write_byte(address_low);
        drive_high(&mut self.cd);
        self.write_byte(value_low);
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](ParallelInterface::data())
    pub fn cmd<T: Command>(&mut self, command: T) {
        // low for commands
        drive_low(&mut self.cd);
        self.write_byte(command.address());
    }

    /// Basic function for sending an array of u8-values of data
    pub fn data(&mut self, data: &[u8]) {
        // high for data
        drive_high(&mut self.cd);
        for val in data.iter().copied() {
            self.write_byte(val);
        }
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub fn cmd_with_data<T: Command>(&mut self, command: T, data: &[u8]) {
        self.cmd(command);
        self.data(data);
    }

    /// Basic function for sending the same byte of data (one u8) multiple times
    ///
    /// Handy for filling controller memory with a single value.
    pub fn data_x_times(&mut self, val: u8, repetitions: u32) {
        debug_assert!(
            self.direction == Direction::Write,
            "write strobe while the data bus is set up for reading"
        );
        // high for data
        drive_high(&mut self.cd);
        // drive the bus once, only the strobe has to be repeated
        self.data.drive(val);
        for _ in 0..repetitions {
            drive_low(&mut self.wr);
            drive_high(&mut self.wr);
        }
    }

    /// Sends `command` and reads `buffer.len()` data bytes back
    ///
    /// The bus is switched to reading after the command and back to writing
    /// at the end. Many controllers answer with a dummy byte first; it ends up
    /// in `buffer[0]`.
    pub fn read_register<T: Command>(&mut self, command: T, buffer: &mut [u8]) {
        self.cmd(command);
        self.set_read_direction();
        drive_high(&mut self.cd);
        for byte in buffer.iter_mut() {
            *byte = self.read_byte();
        }
        self.set_write_direction();

        #[cfg(feature = "defmt")]
        defmt::trace!("register {=u8:#x}: {=[u8]}", command.address(), &buffer[..]);
    }

    /// Gives back the parts of the bus
    pub fn release(self) -> (DataPins<P, N>, CS, CD, WR, RD, D) {
        (self.data, self.cs, self.cd, self.wr, self.rd, self.delay)
    }
}
