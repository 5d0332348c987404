//! Pins of the parallel bus: the 8 data lines and single control lines

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::{bus_map::DataBusMap, traits::GpioPort};

/// A single pin driven through the set/clear registers of its port
///
/// Used for the control lines, but any other infallible `OutputPin` works as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPin<P> {
    port: P,
    mask: u32,
}

impl<P> PortPin<P> {
    /// Pin `pin` (0..=31) of `port`
    ///
    /// # Panics
    ///
    /// If `pin` is 32 or higher. In a `const` the panic is a build error.
    pub const fn new(port: P, pin: u8) -> Self {
        assert!(pin < 32, "port pins go from 0 to 31");
        PortPin {
            port,
            mask: 1 << pin,
        }
    }

    pub const fn mask(&self) -> u32 {
        self.mask
    }
}

impl<P: GpioPort> PortPin<P> {
    /// Makes the pin an output, without changing its level
    pub fn configure_output(&self) {
        self.port.set_output(self.mask);
    }
}

impl<P> ErrorType for PortPin<P> {
    type Error = Infallible;
}

impl<P: GpioPort> OutputPin for PortPin<P> {
    #[inline(always)]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.clear_bits(self.mask);
        Ok(())
    }

    #[inline(always)]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.set_bits(self.mask);
        Ok(())
    }
}

#[inline(always)]
pub(crate) fn drive_low<PIN: OutputPin<Error = Infallible>>(pin: &mut PIN) {
    match pin.set_low() {
        Ok(()) => {}
        Err(e) => match e {},
    }
}

#[inline(always)]
pub(crate) fn drive_high<PIN: OutputPin<Error = Infallible>>(pin: &mut PIN) {
    match pin.set_high() {
        Ok(()) => {}
        Err(e) => match e {},
    }
}

/// The 8 data lines, spread over `N` ports as described by a [`DataBusMap`]
///
/// Transfers touch every port once per register: driving a byte is one
/// set and one clear write per port, sampling is one input read per port.
///
/// Nothing here checks the direction of the pins, that's the job of
/// [`ParallelInterface`](crate::interface::ParallelInterface).
pub struct DataPins<P, const N: usize> {
    ports: [P; N],
    map: &'static DataBusMap<N>,
}

impl<P: GpioPort, const N: usize> DataPins<P, N> {
    /// `ports[i]` is the port with index `i` in the map
    pub fn new(ports: [P; N], map: &'static DataBusMap<N>) -> Self {
        DataPins { ports, map }
    }

    pub fn map(&self) -> &'static DataBusMap<N> {
        self.map
    }

    /// Puts `value` on the bus
    ///
    /// All set registers are written before the clear registers; pins outside
    /// of the bus are untouched.
    #[inline(always)]
    pub fn drive(&self, value: u8) {
        let high = self.map.scatter(value);
        let low = self.map.scatter(!value);
        for (port, bits) in self.ports.iter().zip(high.iter()) {
            if *bits != 0 {
                port.set_bits(*bits);
            }
        }
        for (port, bits) in self.ports.iter().zip(low.iter()) {
            if *bits != 0 {
                port.clear_bits(*bits);
            }
        }
    }

    /// Reads the value currently on the bus
    #[inline(always)]
    pub fn sample(&self) -> u8 {
        let mut words = [0u32; N];
        for ((word, port), mask) in words
            .iter_mut()
            .zip(self.ports.iter())
            .zip(self.map.port_masks().iter())
        {
            if *mask != 0 {
                *word = port.read_input();
            }
        }
        self.map.gather(&words)
    }

    /// Makes all data lines outputs
    #[inline(always)]
    pub fn set_output(&self) {
        for (port, mask) in self.ports.iter().zip(self.map.port_masks().iter()) {
            if *mask != 0 {
                port.set_output(*mask);
            }
        }
    }

    /// Makes all data lines inputs
    #[inline(always)]
    pub fn set_input(&self) {
        for (port, mask) in self.ports.iter().zip(self.map.port_masks().iter()) {
            if *mask != 0 {
                port.set_input(*mask);
            }
        }
    }

    /// Returns the ports
    pub fn release(self) -> [P; N] {
        self.ports
    }
}
