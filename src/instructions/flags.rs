//! # Flag Instructions
//!
//! Single-flag set and clear operations. There is no SEV on the 6502.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

fn set_flag<M: MemoryBus>(cpu: &mut Cpu<M>, flag: Status, value: bool) -> InstructionStatus {
    cpu.regs.p.set(flag, value);
    InstructionStatus::empty()
}

/// CLC: clear Carry.
pub(crate) fn clc<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::CARRY, false)
}

/// SEC: set Carry.
pub(crate) fn sec<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::CARRY, true)
}

/// CLI: clear Interrupt Disable. A pending IRQ is serviced at the next step.
pub(crate) fn cli<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::INTERRUPT_DISABLE, false)
}

/// SEI: set Interrupt Disable.
pub(crate) fn sei<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::INTERRUPT_DISABLE, true)
}

/// CLV: clear Overflow.
pub(crate) fn clv<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::OVERFLOW, false)
}

/// CLD: clear Decimal.
pub(crate) fn cld<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::DECIMAL, false)
}

/// SED: set Decimal.
pub(crate) fn sed<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    set_flag(cpu, Status::DECIMAL, true)
}
