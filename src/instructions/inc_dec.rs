//! # Increment and Decrement Instructions
//!
//! - INC, DEC: read-modify-write on memory
//! - INX, INY, DEX, DEY: index registers
//!
//! All wrap at 8 bits and set Z and N from the result.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn inc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| cpu.regs.set_zero_and_negative(value.wrapping_add(1)));
    InstructionStatus::empty()
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn dec<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.modify_operand(mode, |cpu, value| cpu.regs.set_zero_and_negative(value.wrapping_sub(1)));
    InstructionStatus::empty()
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn inx<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.x = cpu.regs.set_zero_and_negative(cpu.regs.x.wrapping_add(1));
    InstructionStatus::empty()
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn iny<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.y = cpu.regs.set_zero_and_negative(cpu.regs.y.wrapping_add(1));
    InstructionStatus::empty()
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn dex<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.x = cpu.regs.set_zero_and_negative(cpu.regs.x.wrapping_sub(1));
    InstructionStatus::empty()
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn dey<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.y = cpu.regs.set_zero_and_negative(cpu.regs.y.wrapping_sub(1));
    InstructionStatus::empty()
}
