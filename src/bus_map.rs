//! Wiring of the 8 logical data lines onto physical GPIO pins
//!
//! Boards rarely have 8 free pins in a row of one port, so the data bus is
//! usually scattered: e.g. D0..D4 on one port and D5..D7 on another, in no
//! particular order. A [`DataBusMap`] describes that wiring and compiles it
//! into a handful of shift/mask lanes, so that moving a byte onto or off the
//! pins costs one shift and one mask per lane instead of one per bit.
//!
//! The map is meant to be built in a `const` or `static`. An invalid wiring
//! then fails the build instead of silently driving the wrong pins:
//!
//! ```
//! use tftlcd_parallel::bus_map::{DataBusMap, DataLine};
//!
//! // D0..D3 on port 0 pins 4..7, D4..D7 on port 1 pins 0..3
//! static WIRING: DataBusMap<2> = DataBusMap::new([
//!     DataLine::new(0, 4),
//!     DataLine::new(0, 5),
//!     DataLine::new(0, 6),
//!     DataLine::new(0, 7),
//!     DataLine::new(1, 0),
//!     DataLine::new(1, 1),
//!     DataLine::new(1, 2),
//!     DataLine::new(1, 3),
//! ]);
//!
//! assert_eq!(WIRING.scatter(0xA5), [0x50, 0x0A]);
//! assert_eq!(WIRING.gather(&[0x50, 0x0A]), 0xA5);
//! ```

use crate::error::MapError;

/// Physical location of one logical data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataLine {
    /// Index into the ports of the data bus
    pub port: u8,
    /// Pin number within the port (0..=31)
    pub pin: u8,
}

impl DataLine {
    pub const fn new(port: u8, pin: u8) -> Self {
        DataLine { port, pin }
    }
}

/// A group of logical bits that reach their port by the same shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lane {
    pub(crate) port: u8,
    /// logical bits carried by this lane
    pub(crate) mask: u8,
    /// physical position minus logical position
    pub(crate) shift: i8,
}

impl Lane {
    const EMPTY: Lane = Lane {
        port: 0,
        mask: 0,
        shift: 0,
    };

    /// Moves the logical bits of this lane to their physical positions
    #[inline(always)]
    const fn place(&self, value: u8) -> u32 {
        let bits = (value & self.mask) as u32;
        if self.shift >= 0 {
            bits << (self.shift as u32)
        } else {
            bits >> ((-self.shift) as u32)
        }
    }

    /// Moves the physical bits of this lane back to their logical positions
    #[inline(always)]
    const fn pick(&self, word: u32) -> u8 {
        let bits = word & self.place(self.mask);
        let logical = if self.shift >= 0 {
            bits >> (self.shift as u32)
        } else {
            bits << ((-self.shift) as u32)
        };
        logical as u8
    }
}

/// Data bus wiring over `N` GPIO ports
///
/// Index `n` of the line table is logical data line `Dn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBusMap<const N: usize> {
    lines: [DataLine; 8],
    lanes: [Lane; 8],
    lane_count: u8,
    port_masks: [u32; N],
}

impl<const N: usize> DataBusMap<N> {
    /// Builds the map, panicking on an invalid wiring
    ///
    /// Used in a `const` or `static` the panic is a compile error.
    pub const fn new(lines: [DataLine; 8]) -> Self {
        match Self::try_new(lines) {
            Ok(map) => map,
            Err(MapError::PortOutOfRange { .. }) => {
                panic!("data bus map: a data line refers to a port the bus doesn't have")
            }
            Err(MapError::PinOutOfRange { .. }) => {
                panic!("data bus map: a data line refers to a pin above 31")
            }
            Err(MapError::Aliased { .. }) => {
                panic!("data bus map: two data lines share one physical pin")
            }
        }
    }

    /// Builds the map, checking that the wiring is a bijection onto
    /// existing pins
    pub const fn try_new(lines: [DataLine; 8]) -> Result<Self, MapError> {
        let mut port_masks = [0u32; N];
        let mut lanes = [Lane::EMPTY; 8];
        let mut lane_count = 0;

        let mut bit = 0;
        while bit < 8 {
            let line = lines[bit];
            let port = line.port as usize;
            if port >= N {
                return Err(MapError::PortOutOfRange { line: bit as u8 });
            }
            if line.pin >= 32 {
                return Err(MapError::PinOutOfRange { line: bit as u8 });
            }
            let physical = 1u32 << line.pin;
            if port_masks[port] & physical != 0 {
                return Err(MapError::Aliased { line: bit as u8 });
            }
            port_masks[port] |= physical;

            // bits reaching the same port with the same shift share a lane
            let shift = line.pin as i8 - bit as i8;
            let mut lane = 0;
            while lane < lane_count && !(lanes[lane].port == line.port && lanes[lane].shift == shift)
            {
                lane += 1;
            }
            if lane == lane_count {
                lanes[lane] = Lane {
                    port: line.port,
                    mask: 0,
                    shift,
                };
                lane_count += 1;
            }
            lanes[lane].mask |= 1u8 << bit;

            bit += 1;
        }

        Ok(DataBusMap {
            lines,
            lanes,
            lane_count: lane_count as u8,
            port_masks,
        })
    }

    /// Physical pin masks of all data lines, per port
    pub const fn port_masks(&self) -> &[u32; N] {
        &self.port_masks
    }

    /// The wiring table this map was built from
    pub const fn lines(&self) -> &[DataLine; 8] {
        &self.lines
    }

    /// Number of shift/mask operations needed per transfer
    pub const fn lane_count(&self) -> usize {
        self.lane_count as usize
    }

    pub(crate) fn lanes(&self) -> &[Lane] {
        &self.lanes[..self.lane_count as usize]
    }

    /// Places a logical byte onto the physical pin positions of each port
    #[inline(always)]
    pub fn scatter(&self, value: u8) -> [u32; N] {
        let mut words = [0u32; N];
        for lane in self.lanes() {
            words[lane.port as usize] |= lane.place(value);
        }
        words
    }

    /// Reassembles a logical byte from the input words of each port
    ///
    /// Pins that are not part of the data bus are ignored.
    #[inline(always)]
    pub fn gather(&self, words: &[u32; N]) -> u8 {
        let mut value = 0;
        for lane in self.lanes() {
            value |= lane.pick(words[lane.port as usize]);
        }
        value
    }
}
