//! Busy wait delays calibrated by the core clock

use embedded_hal::delay::DelayNs;

/// Number of core cycles that cover at least `ns` nanoseconds at `cpu_hz`
///
/// Always rounds up: 400ns at 16MHz are 6.4 cycles, so this returns 7.
pub const fn settle_cycles(ns: u32, cpu_hz: u32) -> u32 {
    let cycles = (ns as u64 * cpu_hz as u64 + 999_999_999) / 1_000_000_000;
    if cycles > u32::MAX as u64 {
        u32::MAX
    } else {
        cycles as u32
    }
}

/// Busy waits for at least `cycles` core cycles
#[cfg(all(target_arch = "arm", feature = "cortex-m"))]
#[inline(always)]
fn spin(cycles: u32) {
    cortex_m::asm::delay(cycles);
}

/// Fallback for cores without `cortex_m::asm::delay`, and for the host
///
/// Every iteration costs one cycle or more, so this only ever errs on the
/// long side. The `asm!` block doesn't claim `nomem`, which keeps GPIO
/// accesses from moving across the wait.
#[cfg(not(all(target_arch = "arm", feature = "cortex-m")))]
#[inline(always)]
fn spin(cycles: u32) {
    for _ in 0..cycles {
        // SAFETY: a single nop, no registers or memory touched
        unsafe { core::arch::asm!("nop", options(nostack, preserves_flags)) };
    }
}

/// A [`DelayNs`] that burns core cycles instead of using a timer
///
/// `CPU_HZ` is the core clock the delay is calibrated for. It has to match the
/// clock the firmware actually runs at; a faster clock shortens every delay.
/// Interrupts arriving during the wait only lengthen it.
///
/// On Cortex-M (with the `cortex-m` feature) the wait is
/// `cortex_m::asm::delay`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NopDelay<const CPU_HZ: u32>;

impl<const CPU_HZ: u32> NopDelay<CPU_HZ> {
    pub const fn new() -> Self {
        NopDelay
    }

    /// Core clock this delay is calibrated for
    pub const fn cpu_hz(&self) -> u32 {
        CPU_HZ
    }

    /// Cycles burnt by a `delay_ns(ns)`
    pub const fn cycles(ns: u32) -> u32 {
        settle_cycles(ns, CPU_HZ)
    }
}

impl<const CPU_HZ: u32> DelayNs for NopDelay<CPU_HZ> {
    #[inline(always)]
    fn delay_ns(&mut self, ns: u32) {
        spin(Self::cycles(ns));
    }
}
