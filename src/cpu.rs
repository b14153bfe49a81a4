//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 6502 processor and the
//! fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, P, SP, PC (see [`Registers`])
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt lines**: shared pending flags for IRQ/NMI/RST
//! - **Instruction table**: shared, read-only opcode dispatch table
//!
//! ## Execution Model
//!
//! - `step()`: service at most one interrupt, then execute one instruction
//! - `run()`: step until a [`Halt`] condition occurs
//! - `run_for_cycles()`: step until a cycle budget is exhausted
//!
//! Execution is single-threaded and never yields mid-instruction. The only
//! state other threads may touch is the interrupt lines and the stop flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, trace, warn};

use crate::interrupts::{Interrupt, InterruptLines, RESET_VECTOR};
use crate::{Config, Halt, InstructionTable, MemoryBus, Registers, StepOutcome};

/// Opcode of BRK, watched for when [`Config::break_is_fatal`] is set.
pub const BRK_OPCODE: u8 = 0x00;

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. The CPU
/// owns its memory handle; use [`Cpu::memory_mut`] to load programs.
///
/// # Examples
///
/// ```
/// use cpu6502::{Cpu, FlatMemory, MemoryBus, Status};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
/// memory.load(0x8000, &[0xA9, 0xFF]); // LDA #$FF
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.registers().pc, 0x8000);
/// assert_eq!(cpu.registers().sp, 0xFD);
///
/// let outcome = cpu.step();
/// assert_eq!(outcome.cycles, 2);
/// assert_eq!(outcome.halt, None);
/// assert_eq!(cpu.registers().a, 0xFF);
/// assert!(cpu.registers().p.contains(Status::NEGATIVE));
/// ```
pub struct Cpu<M: MemoryBus> {
    pub(crate) regs: Registers,
    pub(crate) memory: M,
    pub(crate) config: Config,
    pub(crate) cycles: u64,
    pub(crate) lines: Arc<InterruptLines>,
    stop: Arc<AtomicBool>,
    table: Arc<InstructionTable<M>>,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU with the default configuration and instruction table.
    ///
    /// The CPU is initialized to the 6502 power-on reset state:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is set to 0xFD
    /// - P has Interrupt-Disable and Unused set
    /// - A, X, Y are zeroed
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, Config::default())
    }

    /// Creates a new CPU with the given configuration.
    pub fn with_config(memory: M, config: Config) -> Self {
        Self::with_table(memory, config, Arc::new(InstructionTable::new()))
    }

    /// Creates a new CPU sharing an existing instruction table.
    ///
    /// Useful for patched tables (see [`InstructionTable::add_instruction`]) or
    /// for many engines sharing one table.
    pub fn with_table(memory: M, config: Config, table: Arc<InstructionTable<M>>) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            memory,
            config,
            cycles: 0,
            lines: Arc::new(InterruptLines::new()),
            stop: Arc::new(AtomicBool::new(false)),
            table,
        };
        cpu.regs.pc = cpu.read_word(RESET_VECTOR);
        cpu
    }

    /// Resets the registers and reloads PC from the reset vector.
    ///
    /// Memory is left untouched; call [`MemoryBus::reset`] through
    /// [`Cpu::memory_mut`] to clear it.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.regs.pc = self.read_word(RESET_VECTOR);
        info!("CPU reset, PC={:04X}", self.regs.pc);
    }

    /// Executes one fetch-decode-execute step.
    ///
    /// 1. Service at most one pending interrupt (0 or 7 cycles)
    /// 2. Fetch the opcode at PC and advance PC past it
    /// 3. Stop with [`Halt::BreakExecuted`] if the opcode is BRK and
    ///    `break_is_fatal` is configured
    /// 4. Dispatch through the instruction table, or stop with
    ///    [`Halt::UndefinedOpcode`] if there is no descriptor
    ///
    /// The returned cycle count includes interrupt servicing. On a halt, PC is
    /// left just past the offending opcode byte and no instruction cycles are
    /// counted.
    pub fn step(&mut self) -> StepOutcome {
        let interrupt_cycles = self.service_interrupts();

        let pc = self.regs.pc;
        let opcode = self.fetch_byte();

        if opcode == BRK_OPCODE && self.config.break_is_fatal {
            self.cycles += interrupt_cycles as u64;
            return StepOutcome::halted(interrupt_cycles, Halt::BreakExecuted);
        }

        let table = Arc::clone(&self.table);
        if let Some(instruction) = table.get(opcode) {
            trace!("{:04X}  {:02X}  {:<4} {}", pc, opcode, instruction.mnemonic, self.regs);
        }

        match table.execute(self, opcode) {
            Some(instruction_cycles) => {
                let cycles = interrupt_cycles + instruction_cycles;
                self.cycles += cycles as u64;
                StepOutcome::completed(cycles)
            }
            None => {
                warn!("undefined opcode 0x{:02X} at {:04X}", opcode, pc);
                self.cycles += interrupt_cycles as u64;
                StepOutcome::halted(interrupt_cycles, Halt::UndefinedOpcode(opcode))
            }
        }
    }

    /// Steps until a halt condition occurs and returns it.
    ///
    /// There is no implicit termination: a program that never hits BRK (with
    /// `break_is_fatal`) or an undefined opcode runs until a [`StopHandle`]
    /// requests a stop. The stop flag is checked between steps.
    pub fn run(&mut self) -> Halt {
        loop {
            if self.stop.swap(false, Ordering::AcqRel) {
                return Halt::StopRequested;
            }
            if let Some(halt) = self.step().halt {
                return halt;
            }
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or a halt
    /// condition occurs. Returns the actual number of cycles consumed (may be
    /// slightly more than budget due to instruction granularity).
    ///
    /// This is useful for frame-locked execution models where the CPU must run
    /// for an exact number of cycles per frame (e.g., 29780 cycles for 60Hz NTSC).
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, Halt> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            if self.stop.swap(false, Ordering::AcqRel) {
                return Err(Halt::StopRequested);
            }
            if let Some(halt) = self.step().halt {
                return Err(halt);
            }
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Stack ==========

    /// Pushes a byte at 0x0100 | SP and decrements SP (wrapping).
    pub fn push(&mut self, value: u8) {
        self.memory.write(self.regs.stack_address(), value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Pushes a word, high byte first, so it pops back low byte first.
    pub fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    /// Increments SP (wrapping) and reads the byte at 0x0100 | SP.
    pub fn pop(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory.read(self.regs.stack_address())
    }

    /// Pops a word pushed by [`Cpu::push_word`].
    pub fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    // ========== Host Interface ==========

    /// Returns a shareable handle to the interrupt lines.
    pub fn interrupt_lines(&self) -> Arc<InterruptLines> {
        Arc::clone(&self.lines)
    }

    /// Requests a maskable interrupt.
    pub fn request_irq(&self) {
        self.lines.request(Interrupt::Irq);
    }

    /// Requests a non-maskable interrupt.
    pub fn request_nmi(&self) {
        self.lines.request(Interrupt::Nmi);
    }

    /// Requests a reset, serviced at the start of the next step.
    pub fn request_reset(&self) {
        self.lines.request(Interrupt::Reset);
    }

    /// Returns a handle that makes [`Cpu::run`] return
    /// [`Halt::StopRequested`] before its next step.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop))
    }

    /// Register file.
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Mutable register file, for test setup and debuggers.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    /// Memory backend.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable memory backend.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory backend.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Instruction table in use.
    pub fn table(&self) -> &Arc<InstructionTable<M>> {
        &self.table
    }

    /// Total cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// Cloneable handle for stopping [`Cpu::run`] from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Requests a stop. The request is consumed by the next `run` iteration.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, Status};

    fn setup_cpu() -> Cpu<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        Cpu::new(memory)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.registers().pc, 0x8000);
        assert_eq!(cpu.registers().sp, 0xFD);
        assert_eq!(cpu.registers().a, 0x00);
        assert_eq!(cpu.registers().x, 0x00);
        assert_eq!(cpu.registers().y, 0x00);
        assert_eq!(cpu.registers().p, Status::INTERRUPT_DISABLE | Status::UNUSED);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_reset_leaves_memory_alone() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x0200, 0xAA);
        cpu.registers_mut().a = 0x11;
        cpu.registers_mut().pc = 0x1234;

        cpu.reset();

        assert_eq!(cpu.registers().a, 0x00);
        assert_eq!(cpu.registers().pc, 0x8000);
        assert_eq!(cpu.memory().read(0x0200), 0xAA);
    }

    #[test]
    fn test_stack_wraps() {
        let mut cpu = setup_cpu();
        cpu.registers_mut().sp = 0x00;

        cpu.push(0x42);
        assert_eq!(cpu.memory().read(0x0100), 0x42);
        assert_eq!(cpu.registers().sp, 0xFF);

        assert_eq!(cpu.pop(), 0x42);
        assert_eq!(cpu.registers().sp, 0x00);
    }

    #[test]
    fn test_push_word_layout() {
        let mut cpu = setup_cpu();
        cpu.push_word(0xBEEF);

        assert_eq!(cpu.memory().read(0x01FD), 0xBE);
        assert_eq!(cpu.memory().read(0x01FC), 0xEF);
        assert_eq!(cpu.pop(), 0xEF);
        assert_eq!(cpu.pop(), 0xBE);
    }

    #[test]
    fn test_stop_handle_stops_run() {
        let mut cpu = setup_cpu();
        cpu.stop_handle().stop();
        assert_eq!(cpu.run(), Halt::StopRequested);
        assert_eq!(cpu.cycles(), 0);
    }
}
