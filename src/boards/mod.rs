//! Supported boards
//!
//! Each board brings the registers of its GPIO ports, the wiring of the TFT
//! data bus and the core clock the read delay is calibrated for. The board is
//! chosen with a cargo feature; building without one fails.

#[cfg(feature = "nano33ble")]
pub mod nano33ble;
