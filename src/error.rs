use core::fmt::{Debug, Display, Formatter};

/// Reasons a data bus wiring table is rejected
///
/// `line` is always the logical data line (0 for D0 up to 7 for D7)
/// of the first entry that failed the check.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// The line refers to a port the bus doesn't have
    PortOutOfRange { line: u8 },

    /// The line refers to a pin above 31
    PinOutOfRange { line: u8 },

    /// The line uses the same physical pin as a lower data line
    Aliased { line: u8 },
}

impl MapError {
    /// Data line the error was found on
    pub const fn line(&self) -> u8 {
        match *self {
            Self::PortOutOfRange { line }
            | Self::PinOutOfRange { line }
            | Self::Aliased { line } => line,
        }
    }

    const fn description(&self) -> &'static str {
        match self {
            Self::PortOutOfRange { .. } => "data line mapped to a port the bus doesn't have",
            Self::PinOutOfRange { .. } => "data line mapped to a pin above 31",
            Self::Aliased { .. } => "data line shares its physical pin with another data line",
        }
    }
}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "D{}: {}", self.line(), self.description())
    }
}

impl Debug for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PortOutOfRange { line } => write!(f, "PortOutOfRange(D{})", line),
            Self::PinOutOfRange { line } => write!(f, "PinOutOfRange(D{})", line),
            Self::Aliased { line } => write!(f, "Aliased(D{})", line),
        }
    }
}
