//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//!
//! Loads set Z and N from the loaded value and pay the page-crossing penalty
//! for indexed modes. Stores affect no flags and never pay it.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn lda<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.set_zero_and_negative(value);
    status
}

/// Executes the LDX (Load X Register) instruction.
///
/// Same flag behavior as LDA, applied to X.
pub(crate) fn ldx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.x = cpu.regs.set_zero_and_negative(value);
    status
}

/// Executes the LDY (Load Y Register) instruction.
///
/// Same flag behavior as LDA, applied to Y.
pub(crate) fn ldy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.y = cpu.regs.set_zero_and_negative(value);
    status
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn sta<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.store_operand(mode, cpu.regs.a);
    InstructionStatus::empty()
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn stx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.store_operand(mode, cpu.regs.x);
    InstructionStatus::empty()
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn sty<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.store_operand(mode, cpu.regs.y);
    InstructionStatus::empty()
}
