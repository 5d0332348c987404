//! Simulated GPIO ports and TFT controller for the tests
//!
//! Ports 0 and 1 carry the data bus (wired like the Nano 33 BLE shield),
//! port 2 the control lines. Every register access is logged, and the panel
//! model logs each byte it latches on a rising WR edge. While RD is low and the
//! data lines are inputs, the panel drives its output byte onto the bus.

extern crate std;

use core::cell::RefCell;
use std::{mem, vec::Vec};

use bit_field::BitField;
use embedded_hal::delay::DelayNs;

use crate::{
    bus_map::{DataBusMap, DataLine},
    interface::ParallelInterface,
    pins::{DataPins, PortPin},
    traits::GpioPort,
};

pub(crate) const CONTROL_PORT: usize = 2;

pub(crate) const CS_PIN: u8 = 0;
pub(crate) const CD_PIN: u8 = 1;
pub(crate) const WR_PIN: u8 = 2;
pub(crate) const RD_PIN: u8 = 3;

pub(crate) const CS_MASK: u32 = 1 << CS_PIN;
pub(crate) const CD_MASK: u32 = 1 << CD_PIN;
pub(crate) const WR_MASK: u32 = 1 << WR_PIN;
pub(crate) const RD_MASK: u32 = 1 << RD_PIN;

pub(crate) static SIM_MAP: DataBusMap<2> = DataBusMap::new([
    DataLine::new(1, 11),
    DataLine::new(1, 12),
    DataLine::new(1, 15),
    DataLine::new(1, 13),
    DataLine::new(1, 14),
    DataLine::new(0, 23),
    DataLine::new(0, 21),
    DataLine::new(0, 27),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Set(usize, u32),
    Clear(usize, u32),
    DirOut(usize, u32),
    DirIn(usize, u32),
    Read(usize),
    Delay(u32),
    /// Byte latched by the panel, `data` is the level of CD
    Write { data: bool, byte: u8 },
}

#[derive(Default)]
struct Registers {
    out: [u32; 3],
    dir: [u32; 3],
    panel: u8,
}

pub(crate) struct SimBus {
    registers: RefCell<Registers>,
    events: RefCell<Vec<Event>>,
}

#[derive(Clone, Copy)]
pub(crate) struct SimPort<'a> {
    bus: &'a SimBus,
    index: usize,
}

pub(crate) struct SimDelay<'a> {
    bus: &'a SimBus,
}

pub(crate) type SimPin<'a> = PortPin<SimPort<'a>>;

pub(crate) type SimInterface<'a> =
    ParallelInterface<SimPort<'a>, SimPin<'a>, SimPin<'a>, SimPin<'a>, SimPin<'a>, SimDelay<'a>, 2>;

impl SimBus {
    pub(crate) fn new() -> Self {
        SimBus {
            registers: RefCell::new(Registers::default()),
            events: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn port(&self, index: usize) -> SimPort<'_> {
        SimPort { bus: self, index }
    }

    pub(crate) fn data_pins(&self) -> DataPins<SimPort<'_>, 2> {
        DataPins::new([self.port(0), self.port(1)], &SIM_MAP)
    }

    pub(crate) fn interface(&self) -> SimInterface<'_> {
        let pin = |pin| {
            let pin = PortPin::new(self.port(CONTROL_PORT), pin);
            pin.configure_output();
            pin
        };
        ParallelInterface::new(
            self.data_pins(),
            pin(CS_PIN),
            pin(CD_PIN),
            pin(WR_PIN),
            pin(RD_PIN),
            SimDelay { bus: self },
        )
    }

    /// Value the panel drives while it is read from
    pub(crate) fn set_panel_output(&self, value: u8) {
        self.registers.borrow_mut().panel = value;
    }

    pub(crate) fn output(&self, port: usize) -> u32 {
        self.registers.borrow().out[port]
    }

    pub(crate) fn direction(&self, port: usize) -> u32 {
        self.registers.borrow().dir[port]
    }

    pub(crate) fn take_events(&self) -> Vec<Event> {
        mem::take(&mut *self.events.borrow_mut())
    }

    /// Takes the events, keeping only control line changes, latches and delays
    pub(crate) fn control_events(&self) -> Vec<Event> {
        self.take_events()
            .into_iter()
            .filter(|event| match event {
                Event::Set(port, _) | Event::Clear(port, _) => *port == CONTROL_PORT,
                Event::Write { .. } | Event::Delay(_) => true,
                _ => false,
            })
            .collect()
    }

    fn log(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Level of all pins of a port, taking the panel into account
    fn pins(&self, port: usize) -> u32 {
        let registers = self.registers.borrow();
        let driven = registers.out[port] & registers.dir[port];
        if port == CONTROL_PORT {
            return driven;
        }
        let panel_drives = registers.out[CONTROL_PORT] & RD_MASK == 0;
        let external = if panel_drives {
            reference_scatter(registers.panel)[port]
        } else {
            0
        };
        driven | (external & !registers.dir[port])
    }

    fn set(&self, port: usize, mask: u32) {
        self.log(Event::Set(port, mask));
        let before = {
            let mut registers = self.registers.borrow_mut();
            let before = registers.out[port];
            registers.out[port] |= mask;
            before
        };
        if port == CONTROL_PORT && before & WR_MASK == 0 && mask & WR_MASK != 0 {
            let byte = reference_gather([self.pins(0), self.pins(1)]);
            let data = self.output(CONTROL_PORT) & CD_MASK != 0;
            self.log(Event::Write { data, byte });
        }
    }

    fn clear(&self, port: usize, mask: u32) {
        self.log(Event::Clear(port, mask));
        self.registers.borrow_mut().out[port] &= !mask;
    }
}

/// Bit by bit placement, independent of the lanes of the map
fn reference_scatter(value: u8) -> [u32; 2] {
    let mut words = [0u32; 2];
    for (bit, line) in SIM_MAP.lines().iter().enumerate() {
        words[line.port as usize].set_bit(line.pin as usize, value.get_bit(bit));
    }
    words
}

fn reference_gather(words: [u32; 2]) -> u8 {
    let mut value = 0u8;
    for (bit, line) in SIM_MAP.lines().iter().enumerate() {
        value.set_bit(bit, words[line.port as usize].get_bit(line.pin as usize));
    }
    value
}

impl GpioPort for SimPort<'_> {
    fn set_bits(&self, mask: u32) {
        self.bus.set(self.index, mask);
    }

    fn clear_bits(&self, mask: u32) {
        self.bus.clear(self.index, mask);
    }

    fn read_input(&self) -> u32 {
        self.bus.log(Event::Read(self.index));
        self.bus.pins(self.index)
    }

    fn set_output(&self, mask: u32) {
        self.bus.log(Event::DirOut(self.index, mask));
        self.bus.registers.borrow_mut().dir[self.index] |= mask;
    }

    fn set_input(&self, mask: u32) {
        self.bus.log(Event::DirIn(self.index, mask));
        self.bus.registers.borrow_mut().dir[self.index] &= !mask;
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.log(Event::Delay(ns));
    }
}
