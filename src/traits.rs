/// A GPIO port with atomic set/clear registers
///
/// All masks are physical bit masks within the port, bit `n` being pin `n`.
/// Every operation is a single register access, so none of them can tear the
/// state of pins outside of `mask`.
pub trait GpioPort {
    /// Drives the pins in `mask` high (OUTSET)
    fn set_bits(&self, mask: u32);

    /// Drives the pins in `mask` low (OUTCLR)
    fn clear_bits(&self, mask: u32);

    /// Reads the input level of the whole port (IN)
    fn read_input(&self) -> u32;

    /// Configures the pins in `mask` as outputs (DIRSET)
    fn set_output(&self, mask: u32);

    /// Configures the pins in `mask` as inputs (DIRCLR)
    fn set_input(&self, mask: u32);
}

impl<T: GpioPort + ?Sized> GpioPort for &T {
    #[inline(always)]
    fn set_bits(&self, mask: u32) {
        T::set_bits(self, mask)
    }

    #[inline(always)]
    fn clear_bits(&self, mask: u32) {
        T::clear_bits(self, mask)
    }

    #[inline(always)]
    fn read_input(&self) -> u32 {
        T::read_input(self)
    }

    #[inline(always)]
    fn set_output(&self, mask: u32) {
        T::set_output(self, mask)
    }

    #[inline(always)]
    fn set_input(&self, mask: u32) {
        T::set_input(self, mask)
    }
}

/// All commands need to have this trait which gives the address of the command
/// which needs to be send over the bus with activated CommandsPin (CD line low)
///
/// Controller crates usually implement it for their command enum.
pub trait Command: Copy {
    fn address(self) -> u8;
}

impl Command for u8 {
    fn address(self) -> u8 {
        self
    }
}
