//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC, BCS: Carry
//! - BEQ, BNE: Zero
//! - BMI, BPL: Negative
//! - BVC, BVS: Overflow
//!
//! All branch instructions use relative addressing with a signed 8-bit offset.
//!
//! Cycle timing:
//! - 2 cycles if the branch is not taken
//! - 3 cycles if taken to the same page
//! - 4 cycles if taken to a different page
//!
//! The page comparison is between the address following the branch and the
//! target. No flags are affected.

use crate::{same_page, AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

fn branch<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, condition: bool) -> InstructionStatus {
    // Resolving consumes the offset byte, so PC is the fall-through address
    let target = cpu.resolve(mode).address;
    if !condition {
        return InstructionStatus::empty();
    }

    let next = cpu.regs.pc;
    cpu.regs.pc = target;
    InstructionStatus::BRANCHED | InstructionStatus::page_crossed(!same_page(next, target))
}

/// Executes the BPL (Branch if Plus) instruction.
pub(crate) fn bpl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = !cpu.regs.p.contains(Status::NEGATIVE);
    branch(cpu, mode, condition)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn bmi<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = cpu.regs.p.contains(Status::NEGATIVE);
    branch(cpu, mode, condition)
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn bvc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = !cpu.regs.p.contains(Status::OVERFLOW);
    branch(cpu, mode, condition)
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn bvs<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = cpu.regs.p.contains(Status::OVERFLOW);
    branch(cpu, mode, condition)
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn bcc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = !cpu.regs.p.contains(Status::CARRY);
    branch(cpu, mode, condition)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn bcs<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = cpu.regs.p.contains(Status::CARRY);
    branch(cpu, mode, condition)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn bne<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = !cpu.regs.p.contains(Status::ZERO);
    branch(cpu, mode, condition)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn beq<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let condition = cpu.regs.p.contains(Status::ZERO);
    branch(cpu, mode, condition)
}
