//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute or indirect)
//! - JSR, RTS: Subroutine call and return
//! - BRK, RTI: Software interrupt and return from interrupt
//! - NOP: No operation
//!
//! BRK is a software interrupt that:
//! 1. Pushes PC+2 (relative to the opcode) to the stack, high byte first
//! 2. Pushes the status register with B and Unused set
//! 3. Sets the I (interrupt disable) flag
//! 4. Loads PC from the IRQ vector at $FFFE/F

use log::debug;

use crate::interrupts::IRQ_VECTOR;
use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

/// Executes the JMP (Jump) instruction.
///
/// Indirect mode reproduces the NMOS page-wrap bug, see
/// [`Cpu::indirect`](crate::Cpu::indirect).
pub(crate) fn jmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    cpu.regs.pc = cpu.resolve(mode).address;
    InstructionStatus::empty()
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction; RTS adds one
/// when returning.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let target = cpu.resolve(mode).address;
    let return_address = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.regs.pc = target;
    InstructionStatus::empty()
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn rts<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    cpu.regs.pc = cpu.pop_word().wrapping_add(1);
    InstructionStatus::empty()
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops the status register (B discarded, Unused forced) and then PC. Unlike
/// RTS, the popped PC is used as is.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    let status = cpu.pop();
    cpu.regs.p = Status::from_stack(status);
    cpu.regs.pc = cpu.pop_word();
    InstructionStatus::empty()
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Only reached when BRK is not configured as fatal. Cycle timing: 7 cycles.
pub(crate) fn brk<M: MemoryBus>(cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    // PC already points past the opcode; skip the padding byte too
    let return_address = cpu.regs.pc.wrapping_add(1);
    cpu.push_word(return_address);
    let status = cpu.regs.p.to_software_push();
    cpu.push(status);
    cpu.regs.p.insert(Status::INTERRUPT_DISABLE);
    cpu.regs.pc = cpu.read_word(IRQ_VECTOR);
    debug!("BRK, return address {:04X}", return_address);
    InstructionStatus::empty()
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn nop<M: MemoryBus>(_cpu: &mut Cpu<M>, _mode: AddressingMode) -> InstructionStatus {
    InstructionStatus::empty()
}
