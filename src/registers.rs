//! # Registers and Status Flags
//!
//! The programmer-visible state of the 6502:
//! - **A**: 8-bit accumulator
//! - **X, Y**: 8-bit index registers
//! - **P**: 8-bit processor status (`NV-BDIZC`)
//! - **SP**: 8-bit stack pointer, an offset into page 0x0100-0x01FF
//! - **PC**: 16-bit program counter
//!
//! The flag helpers (`set_zero`, `set_negative`, `set_zero_and_negative`) take
//! an instruction's result byte, update P and hand the byte back so they can be
//! chained straight into a register load.

use std::fmt;

use bitflags::bitflags;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

bitflags! {
    /// Processor status register (P).
    ///
    /// Bit layout, LSB first: Carry, Zero, Interrupt-Disable, Decimal, Break,
    /// Unused, Overflow, Negative.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Status: u8 {
        /// Set on unsigned overflow/underflow
        const CARRY = 1 << 0;
        /// Set if the result is zero
        const ZERO = 1 << 1;
        /// Blocks IRQ when set
        const INTERRUPT_DISABLE = 1 << 2;
        /// Enables BCD arithmetic for ADC/SBC
        const DECIMAL = 1 << 3;
        /// Only exists on the stack copy pushed by BRK/PHP
        const BREAK = 1 << 4;
        /// Always reads as 1 when pushed
        const UNUSED = 1 << 5;
        /// Set on signed overflow
        const OVERFLOW = 1 << 6;
        /// Bit 7 of the result
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// Status value after reset: Interrupt-Disable and Unused.
    pub const RESET: Status = Status::INTERRUPT_DISABLE.union(Status::UNUSED);

    /// Byte pushed to the stack by BRK and PHP (Break and Unused set).
    pub fn to_software_push(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// Byte pushed to the stack by IRQ and NMI (Break cleared, Unused set).
    pub fn to_hardware_push(self) -> u8 {
        ((self - Status::BREAK) | Status::UNUSED).bits()
    }

    /// Status restored from the stack by PLP and RTI.
    ///
    /// Break is not a real latch, so it is dropped; Unused is forced on.
    pub fn from_stack(value: u8) -> Status {
        (Status::from_bits_retain(value) - Status::BREAK) | Status::UNUSED
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::RESET
    }
}

/// 6502 programmer-visible register file.
///
/// # Examples
///
/// ```
/// use cpu6502::{Registers, Status};
///
/// let mut regs = Registers::new();
/// assert_eq!(regs.sp, 0xFD);
/// assert_eq!(regs.p, Status::INTERRUPT_DISABLE | Status::UNUSED);
///
/// regs.a = regs.set_zero_and_negative(0x80);
/// assert!(regs.p.contains(Status::NEGATIVE));
/// assert!(!regs.p.contains(Status::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Processor status
    pub p: Status,
    /// Stack pointer (0x0100 + sp gives full stack address)
    pub sp: u8,
    /// Program counter (address of next byte to fetch)
    pub pc: u16,
}

impl Registers {
    /// Creates a register file in the reset state with PC = 0.
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            p: Status::RESET,
            sp: RESET_SP,
            pc: 0,
        }
    }

    /// Restores the reset values: A, X, Y zeroed, P = I|U, SP = 0xFD.
    ///
    /// PC is left alone; the CPU loads it from the reset vector because only
    /// it has access to memory.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.p = Status::RESET;
        self.sp = RESET_SP;
    }

    /// Updates Z from `value` and returns it unchanged.
    pub fn set_zero(&mut self, value: u8) -> u8 {
        self.p.set(Status::ZERO, value == 0);
        value
    }

    /// Updates N from bit 7 of `value` and returns it unchanged.
    pub fn set_negative(&mut self, value: u8) -> u8 {
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
        value
    }

    /// Updates both Z and N from `value` and returns it unchanged.
    pub fn set_zero_and_negative(&mut self, value: u8) -> u8 {
        let value = self.set_zero(value);
        self.set_negative(value)
    }

    /// Full address of the current top-of-stack slot.
    pub fn stack_address(&self) -> u16 {
        0x0100 | self.sp as u16
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.a,
            self.x,
            self.y,
            self.p.bits(),
            self.sp
        )
    }
}
