//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX set Z and N from the copied value. TXS does not
//! touch the flags.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus};

pub(crate) fn tax<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.x = cpu.regs.set_zero_and_negative(cpu.regs.a);
    InstructionStatus::empty()
}

pub(crate) fn tay<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.y = cpu.regs.set_zero_and_negative(cpu.regs.a);
    InstructionStatus::empty()
}

pub(crate) fn txa<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.a = cpu.regs.set_zero_and_negative(cpu.regs.x);
    InstructionStatus::empty()
}

pub(crate) fn tya<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.a = cpu.regs.set_zero_and_negative(cpu.regs.y);
    InstructionStatus::empty()
}

pub(crate) fn tsx<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.x = cpu.regs.set_zero_and_negative(cpu.regs.sp);
    InstructionStatus::empty()
}

/// TXS: X to SP, flags untouched.
pub(crate) fn txs<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.sp = cpu.regs.x;
    InstructionStatus::empty()
}
