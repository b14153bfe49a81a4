//! # 6502 CPU Emulator Core
//!
//! An instruction-level NMOS 6502 CPU emulator: it fetches opcodes through a
//! memory bus, resolves operands through the eleven addressing modes, executes
//! the documented instruction set and reports the exact cycle cost of every
//! step, including page-crossing and branch penalties and interrupt servicing.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{Config, Cpu, FlatMemory, Halt, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // Reset vector points to program start at 0x8000
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//!
//! // LDX #$05; loop: DEX; BNE loop; BRK
//! memory.load(0x8000, &[0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x00]);
//!
//! let mut cpu = Cpu::with_config(memory, Config::default().with_break_is_fatal(true));
//! assert_eq!(cpu.run(), Halt::BreakExecuted);
//! assert_eq!(cpu.registers().x, 0);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Table-Driven Design**: a 256-slot descriptor table plus two cycle tables
//!   (base and page-crossed) decide what runs and what it costs
//! - **Determinism**: no OS dependencies and no suspension points inside a step
//!
//! ## Modules
//!
//! - `cpu` - engine state and the fetch-decode-execute loop
//! - `registers` - register file and status flags
//! - `addressing` - addressing modes and operand resolvers
//! - `opcodes` - instruction descriptors, dispatch and cycle tables
//! - `interrupts` - IRQ/NMI/RST lines and servicing
//! - `memory` - MemoryBus trait and a flat 64KB implementation
//! - `config` - engine options

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Semantic bodies are installed through the instruction table only
mod instructions;

use std::fmt;

pub use addressing::{same_page, AddressingMode, OpcodeGroup, Operand};
pub use config::Config;
pub use cpu::{Cpu, StopHandle};
pub use interrupts::{Interrupt, InterruptLines};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Instruction, InstructionStatus, InstructionTable, CYCLES, CYCLES_PAGE_CROSS};
pub use registers::{Registers, Status};

/// Conditions that end a step and terminate [`Cpu::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The fetched opcode has no descriptor installed.
    ///
    /// Contains the opcode byte value. PC points just past it.
    UndefinedOpcode(u8),

    /// BRK was fetched while [`Config::break_is_fatal`] is set.
    ///
    /// A cooperative termination signal for harnesses and debuggers, not a fault.
    BreakExecuted,

    /// A [`StopHandle`] requested the run loop to stop.
    StopRequested,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Halt::UndefinedOpcode(opcode) => write!(f, "No such opcode 0x{:02X}", opcode),
            Halt::BreakExecuted => write!(f, "Executed BRK opcode"),
            Halt::StopRequested => write!(f, "Stop requested"),
        }
    }
}

impl std::error::Error for Halt {}

/// Result of a single [`Cpu::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cycles consumed, including interrupt servicing.
    pub cycles: u32,
    /// Set when the step ended in a halt condition.
    pub halt: Option<Halt>,
}

impl StepOutcome {
    pub(crate) fn completed(cycles: u32) -> Self {
        Self { cycles, halt: None }
    }

    pub(crate) fn halted(cycles: u32, halt: Halt) -> Self {
        Self {
            cycles,
            halt: Some(halt),
        }
    }
}
