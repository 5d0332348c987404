//! [`display_interface`](::display_interface) support, so controller drivers built on it can use the bus
//!
//! Commands are sent with CD low and data with CD high. 16 bit words go out as
//! two bytes in the byte order of their format (native order for `U16`).
//!
//! The bus has to be in [`Direction::Write`](crate::interface::Direction::Write):
//! after a manual read, switch back with
//! [`set_write_direction`](ParallelInterface::set_write_direction) first.

use core::convert::Infallible;

use ::display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    interface::{ControlLine, ParallelInterface},
    traits::GpioPort,
};

impl<P, CS, CD, WR, RD, D, const N: usize> ParallelInterface<P, CS, CD, WR, RD, D, N>
where
    P: GpioPort,
    CS: OutputPin<Error = Infallible>,
    CD: OutputPin<Error = Infallible>,
    WR: OutputPin<Error = Infallible>,
    RD: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    fn write_format(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        match buf {
            DataFormat::U8(items) => {
                for item in items {
                    self.write_byte(*item);
                }
            }
            DataFormat::U16(items) => {
                for item in items {
                    self.write_word(item.to_ne_bytes());
                }
            }
            DataFormat::U16BE(items) => {
                for item in items {
                    self.write_word(item.to_be_bytes());
                }
            }
            DataFormat::U16LE(items) => {
                for item in items {
                    self.write_word(item.to_le_bytes());
                }
            }
            DataFormat::U8Iter(iterator) => {
                for item in iterator {
                    self.write_byte(item);
                }
            }
            DataFormat::U16BEIter(iterator) => {
                for item in iterator {
                    self.write_word(item.to_be_bytes());
                }
            }
            DataFormat::U16LEIter(iterator) => {
                for item in iterator {
                    self.write_word(item.to_le_bytes());
                }
            }
            _ => return Err(DisplayError::DataFormatNotImplemented),
        }
        Ok(())
    }

    #[inline(always)]
    fn write_word(&mut self, [first, second]: [u8; 2]) {
        self.write_byte(first);
        self.write_byte(second);
    }
}

impl<P, CS, CD, WR, RD, D, const N: usize> WriteOnlyDataCommand
    for ParallelInterface<P, CS, CD, WR, RD, D, N>
where
    P: GpioPort,
    CS: OutputPin<Error = Infallible>,
    CD: OutputPin<Error = Infallible>,
    WR: OutputPin<Error = Infallible>,
    RD: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        // low for commands
        self.assert_control(ControlLine::Cd);
        self.write_format(cmd)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        // high for data
        self.idle_control(ControlLine::Cd);
        self.write_format(buf)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::sim::{Event, SimBus};
    use std::{vec, vec::Vec};

    fn strobes(events: Vec<Event>) -> Vec<(bool, u8)> {
        events
            .into_iter()
            .filter_map(|event| match event {
                Event::Write { data, byte } => Some((data, byte)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn commands_and_data() {
        let bus = SimBus::new();
        let mut tft = bus.interface();
        bus.take_events();

        tft.send_commands(DataFormat::U8(&[0x2A])).unwrap();
        tft.send_data(DataFormat::U16BE(&mut [0x0102, 0x0304]))
            .unwrap();
        tft.send_data(DataFormat::U16LE(&mut [0x0506])).unwrap();

        assert_eq!(
            strobes(bus.take_events()),
            vec![
                (false, 0x2A),
                (true, 0x01),
                (true, 0x02),
                (true, 0x03),
                (true, 0x04),
                (true, 0x06),
                (true, 0x05),
            ]
        );
    }

    #[test]
    fn iterators() {
        let bus = SimBus::new();
        let mut tft = bus.interface();
        bus.take_events();

        tft.send_data(DataFormat::U8Iter(&mut [0xAAu8, 0xBB].into_iter()))
            .unwrap();
        tft.send_data(DataFormat::U16BEIter(&mut [0xF800u16].into_iter()))
            .unwrap();

        assert_eq!(
            strobes(bus.take_events()),
            vec![(true, 0xAA), (true, 0xBB), (true, 0xF8), (true, 0x00)]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "write strobe while the data bus is set up for reading")]
    fn data_in_read_direction() {
        let bus = SimBus::new();
        let mut tft = bus.interface();
        tft.set_read_direction();

        let _ = tft.send_data(DataFormat::U8(&[0x10]));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "write strobe while the data bus is set up for reading")]
    fn command_in_read_direction() {
        let bus = SimBus::new();
        let mut tft = bus.interface();
        tft.set_read_direction();

        let _ = tft.send_commands(DataFormat::U8(&[0x2C]));
    }
}
