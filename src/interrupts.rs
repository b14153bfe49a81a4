//! # Interrupt Controller
//!
//! The 6502 has three interrupt sources, checked before every instruction
//! fetch in fixed priority order:
//!
//! 1. **RST** (reset): never maskable. Re-initialises the registers and loads PC
//!    from 0xFFFC/0xFFFD. Nothing is pushed to the stack.
//! 2. **NMI** (non-maskable interrupt): never maskable. Vector 0xFFFA/0xFFFB.
//! 3. **IRQ** (interrupt request): ignored while Interrupt-Disable is set.
//!    Vector 0xFFFE/0xFFFF.
//!
//! ## Interrupt Service Sequence (NMI/IRQ)
//!
//! 1. Push PC (high byte, then low byte)
//! 2. Push status with Break cleared and Unused set
//! 3. Set the I flag to prevent nested IRQs
//! 4. Load PC from the vector
//!
//! Servicing costs a fixed 7 cycles. Only one source is serviced per step; any
//! other pending line stays pending and is re-evaluated at the next step.
//!
//! ## Threading
//!
//! The pending flags live in [`InterruptLines`], one `AtomicBool` per line, so
//! a peripheral thread can hold an `Arc<InterruptLines>` and raise requests
//! while the CPU runs. Each line is expected to have a single writer; the CPU
//! only ever clears a line it has just serviced.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::registers::Status;
use crate::{Cpu, MemoryBus};

/// NMI vector address (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles consumed by servicing any interrupt.
pub const INTERRUPT_CYCLES: u32 = 7;

/// An interrupt source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    /// Reset line
    Reset,
    /// Non-maskable interrupt
    Nmi,
    /// Maskable interrupt request
    Irq,
}

impl Interrupt {
    /// Address of the two-byte vector this source jumps through.
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// Pending-request flags for the three interrupt lines.
///
/// # Examples
///
/// ```
/// use cpu6502::{Cpu, FlatMemory, Interrupt};
///
/// let cpu = Cpu::new(FlatMemory::new());
/// let lines = cpu.interrupt_lines();
///
/// // e.g. from a timer thread
/// lines.request(Interrupt::Nmi);
/// assert!(lines.is_pending(Interrupt::Nmi));
/// ```
#[derive(Debug, Default)]
pub struct InterruptLines {
    irq: AtomicBool,
    nmi: AtomicBool,
    rst: AtomicBool,
}

impl InterruptLines {
    /// Creates a set of lines with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, interrupt: Interrupt) -> &AtomicBool {
        match interrupt {
            Interrupt::Reset => &self.rst,
            Interrupt::Nmi => &self.nmi,
            Interrupt::Irq => &self.irq,
        }
    }

    /// Marks `interrupt` as pending. Fire-and-forget: the CPU consumes it at
    /// the start of a later step.
    pub fn request(&self, interrupt: Interrupt) {
        self.line(interrupt).store(true, Ordering::Release);
    }

    /// Withdraws a pending request that has not been serviced yet.
    pub fn cancel(&self, interrupt: Interrupt) {
        self.line(interrupt).store(false, Ordering::Release);
    }

    /// Returns true while `interrupt` is waiting to be serviced.
    pub fn is_pending(&self, interrupt: Interrupt) -> bool {
        self.line(interrupt).load(Ordering::Acquire)
    }

    /// Clears `interrupt` and reports whether it was pending.
    fn take(&self, interrupt: Interrupt) -> bool {
        self.line(interrupt).swap(false, Ordering::AcqRel)
    }

    /// Picks the highest-priority line that may fire and clears it.
    ///
    /// IRQ is only considered (and only cleared) when `irq_masked` is false.
    pub(crate) fn next(&self, irq_masked: bool) -> Option<Interrupt> {
        if self.take(Interrupt::Reset) {
            Some(Interrupt::Reset)
        } else if self.take(Interrupt::Nmi) {
            Some(Interrupt::Nmi)
        } else if !irq_masked && self.take(Interrupt::Irq) {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }
}

impl<M: MemoryBus> Cpu<M> {
    /// Services at most one pending interrupt.
    ///
    /// Returns the cycles consumed: [`INTERRUPT_CYCLES`] if an interrupt fired,
    /// 0 otherwise.
    pub(crate) fn service_interrupts(&mut self) -> u32 {
        let irq_masked = self.regs.p.contains(Status::INTERRUPT_DISABLE);
        let Some(interrupt) = self.lines.next(irq_masked) else {
            return 0;
        };

        match interrupt {
            Interrupt::Reset => self.regs.reset(),
            Interrupt::Nmi | Interrupt::Irq => {
                self.push_word(self.regs.pc);
                self.push(self.regs.p.to_hardware_push());
                self.regs.p.insert(Status::INTERRUPT_DISABLE);
            }
        }

        self.regs.pc = self.read_word(interrupt.vector());
        debug!("{:?} serviced, PC={:04X}", interrupt, self.regs.pc);

        INTERRUPT_CYCLES
    }
}
