//! Reads the controller id of the shield's TFT and turns the display on
//!
//! Build with `cargo build --release` from this directory, then flash the
//! binary with the Arduino bootloader (e.g. `bossac`).
#![no_main]
#![no_std]

use cortex_m::asm;
use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use panic_halt as _;

use tftlcd_parallel::{boards::nano33ble, prelude::*};

// ILI9341 registers
const SOFTWARE_RESET: u8 = 0x01;
const READ_ID4: u8 = 0xD3;
const SLEEP_OUT: u8 = 0x11;
const DISPLAY_ON: u8 = 0x29;
const MEMORY_ACCESS_CONTROL: u8 = 0x36;
const PIXEL_FORMAT: u8 = 0x3A;

#[entry]
fn main() -> ! {
    // SAFETY: nothing else in this firmware touches the shield pins
    let mut tft = unsafe { nano33ble::take() };
    let mut delay = nano33ble::Delay::new();

    tft.with_cs(|tft| tft.cmd(SOFTWARE_RESET));
    delay.delay_ms(150);

    // dummy byte, then 0x00 0x93 0x41 on an ILI9341
    let mut id = [0u8; 4];
    tft.with_cs(|tft| tft.read_register(READ_ID4, &mut id));
    if id[2..] != [0x93, 0x41] {
        // wrong controller or a wiring problem
        loop {
            asm::wfi();
        }
    }

    tft.with_cs(|tft| {
        tft.write_register8(MEMORY_ACCESS_CONTROL, 0x48);
        // 16 bit per pixel
        tft.write_register8(PIXEL_FORMAT, 0x55);
        tft.cmd(SLEEP_OUT);
    });
    delay.delay_ms(120);
    tft.with_cs(|tft| tft.cmd(DISPLAY_ON));

    loop {
        asm::wfi();
    }
}
