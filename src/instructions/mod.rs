//! # 6502 Instruction Implementations
//!
//! Semantic bodies for the documented instruction set, organized by category.
//! Each body is a plain function with the [`Exec`](crate::opcodes::Exec)
//! signature: it receives the CPU (PC pointing at the first operand byte) and
//! the descriptor's addressing mode, does its work and returns an
//! [`InstructionStatus`] telling the dispatcher which cycle table to use and
//! whether a branch was taken.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus};

impl<M: MemoryBus> Cpu<M> {
    /// Reads the operand for a read-only instruction.
    ///
    /// Returns the value and the page-cross status the dispatcher should see.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> (u8, InstructionStatus) {
        if mode == AddressingMode::Accumulator {
            return (self.regs.a, InstructionStatus::empty());
        }
        let operand = self.resolve(mode);
        let value = self.memory.read(operand.address);
        (value, InstructionStatus::page_crossed(operand.page_crossed))
    }

    /// Read-modify-write on the accumulator or a memory operand.
    ///
    /// RMW instructions never pay the page-cross penalty, so no status is
    /// reported.
    pub(crate) fn modify_operand(&mut self, mode: AddressingMode, f: impl FnOnce(&mut Self, u8) -> u8) {
        if mode == AddressingMode::Accumulator {
            let value = self.regs.a;
            self.regs.a = f(self, value);
            return;
        }
        let address = self.resolve(mode).address;
        let value = self.memory.read(address);
        let result = f(self, value);
        self.memory.write(address, result);
    }

    /// Stores `value` at the operand address. Stores never pay the page-cross
    /// penalty.
    pub(crate) fn store_operand(&mut self, mode: AddressingMode, value: u8) {
        let address = self.resolve(mode).address;
        self.memory.write(address, value);
    }
}
