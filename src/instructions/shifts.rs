//! # Shift and Rotate Instructions
//!
//! This module implements shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! All four operate either on the accumulator or, read-modify-write, on a
//! memory operand. The bit shifted out lands in Carry.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Old bit 7
/// - Zero (Z): Set if the result is 0
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn asl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| {
        cpu.regs.p.set(Status::CARRY, value & 0x80 != 0);
        cpu.regs.set_zero_and_negative(value << 1)
    });
    InstructionStatus::empty()
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Carry receives old bit 0; N is always cleared.
pub(crate) fn lsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| {
        cpu.regs.p.set(Status::CARRY, value & 0x01 != 0);
        cpu.regs.set_zero_and_negative(value >> 1)
    });
    InstructionStatus::empty()
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Old Carry enters bit 0, old bit 7 becomes Carry.
pub(crate) fn rol<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| {
        let carry_in = cpu.regs.p.contains(Status::CARRY) as u8;
        cpu.regs.p.set(Status::CARRY, value & 0x80 != 0);
        cpu.regs.set_zero_and_negative((value << 1) | carry_in)
    });
    InstructionStatus::empty()
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Old Carry enters bit 7, old bit 0 becomes Carry.
pub(crate) fn ror<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| {
        let carry_in = (cpu.regs.p.contains(Status::CARRY) as u8) << 7;
        cpu.regs.p.set(Status::CARRY, value & 0x01 != 0);
        cpu.regs.set_zero_and_negative((value >> 1) | carry_in)
    });
    InstructionStatus::empty()
}
