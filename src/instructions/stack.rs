//! # Stack Instructions
//!
//! - PHA, PLA: push and pull the accumulator
//! - PHP, PLP: push and pull the status register
//!
//! The stack lives at 0x0100-0x01FF and grows downward; SP wraps within the page.

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn pha<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    let value = cpu.regs.a;
    cpu.push(value);
    InstructionStatus::empty()
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy has B and Unused set, like BRK.
pub(crate) fn php<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    let status = cpu.regs.p.to_software_push();
    cpu.push(status);
    InstructionStatus::empty()
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Sets Z and N from the pulled value.
pub(crate) fn pla<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    let value = cpu.pop();
    cpu.regs.a = cpu.regs.set_zero_and_negative(value);
    InstructionStatus::empty()
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn plp<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    let status = cpu.pop();
    cpu.regs.p = Status::from_stack(status);
    InstructionStatus::empty()
}
