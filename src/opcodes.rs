//! # Opcode Dispatch Table
//!
//! A fixed array of 256 optional [`Instruction`] descriptors indexed by opcode,
//! plus two parallel 256-entry cycle tables:
//!
//! - [`CYCLES`]: cost when no page boundary is crossed
//! - [`CYCLES_PAGE_CROSS`]: cost when the instruction reports a page cross
//!
//! A taken branch adds one more cycle on top of whichever table was used, so a
//! branch that is taken *and* lands on another page pays both penalties.
//!
//! Undefined opcodes have no descriptor and a 0 entry in both cycle tables; the
//! zero is never consulted because dispatch fails first.
//!
//! Tables are built once and never mutated by dispatch, so an
//! `Arc<InstructionTable<M>>` can be shared read-only between engines.

use std::fmt;

use bitflags::bitflags;

use crate::addressing::{AddressingMode, OpcodeGroup};
use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::{Cpu, MemoryBus};

bitflags! {
    /// Status word returned by an instruction's semantic body.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InstructionStatus: u8 {
        /// The operand address crossed a page boundary (selects [`CYCLES_PAGE_CROSS`]).
        const PAGE_CROSSED = 1 << 0;
        /// A branch was taken (+1 cycle).
        const BRANCHED = 1 << 1;
    }
}

impl InstructionStatus {
    /// `PAGE_CROSSED` if `crossed`, empty otherwise.
    pub fn page_crossed(crossed: bool) -> Self {
        if crossed {
            InstructionStatus::PAGE_CROSSED
        } else {
            InstructionStatus::empty()
        }
    }
}

/// Semantic body of an instruction.
///
/// Called with PC pointing at the first operand byte and the descriptor's
/// addressing mode.
pub type Exec<M> = fn(&mut Cpu<M>, AddressingMode) -> InstructionStatus;

/// Immutable descriptor for one opcode.
pub struct Instruction<M: MemoryBus> {
    /// Instruction name, for diagnostics only.
    pub mnemonic: &'static str,
    /// Opcode byte this descriptor is installed at.
    pub opcode: u8,
    /// Addressing mode handed to `exec`.
    pub mode: AddressingMode,
    /// Semantic body.
    pub exec: Exec<M>,
}

impl<M: MemoryBus> Instruction<M> {
    /// Creates a descriptor with an explicit addressing mode.
    pub fn new(mnemonic: &'static str, opcode: u8, mode: AddressingMode, exec: Exec<M>) -> Self {
        Self {
            mnemonic,
            opcode,
            mode,
            exec,
        }
    }

    /// Creates a descriptor whose addressing mode is decoded from the opcode
    /// by `group`.
    pub fn grouped(mnemonic: &'static str, opcode: u8, group: OpcodeGroup, exec: Exec<M>) -> Self {
        Self::new(mnemonic, opcode, group.mode(opcode), exec)
    }
}

impl<M: MemoryBus> Clone for Instruction<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MemoryBus> Copy for Instruction<M> {}

impl<M: MemoryBus> fmt::Debug for Instruction<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("mnemonic", &self.mnemonic)
            .field("opcode", &format_args!("0x{:02X}", self.opcode))
            .field("mode", &self.mode)
            .finish()
    }
}

/// Opcode to descriptor map with its cycle tables.
///
/// # Examples
///
/// ```
/// use cpu6502::{FlatMemory, InstructionTable};
///
/// let table: InstructionTable<FlatMemory> = InstructionTable::new();
/// assert_eq!(table.get(0xA9).map(|i| i.mnemonic), Some("LDA"));
/// assert!(table.get(0x02).is_none());
/// assert_eq!(table.len(), 151);
/// ```
pub struct InstructionTable<M: MemoryBus> {
    opcodes: [Option<Instruction<M>>; 256],
    cycles: [u8; 256],
    cycles_page_cross: [u8; 256],
}

impl<M: MemoryBus> InstructionTable<M> {
    /// Creates a table with no descriptors installed.
    pub fn empty() -> Self {
        Self {
            opcodes: [None; 256],
            cycles: CYCLES,
            cycles_page_cross: CYCLES_PAGE_CROSS,
        }
    }

    /// Creates a table with the full documented NMOS instruction set.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.install_defaults();
        table
    }

    /// Installs `instruction` at its opcode slot, replacing any predecessor.
    pub fn add_instruction(&mut self, instruction: Instruction<M>) {
        self.opcodes[instruction.opcode as usize] = Some(instruction);
    }

    /// Installs `exec` under `mnemonic` for every opcode in `opcodes`, decoding
    /// each addressing mode through `group`.
    pub fn add_group(&mut self, mnemonic: &'static str, opcodes: &[u8], group: OpcodeGroup, exec: Exec<M>) {
        for &opcode in opcodes {
            self.add_instruction(Instruction::grouped(mnemonic, opcode, group, exec));
        }
    }

    /// Removes the descriptor at `opcode`, making it undefined.
    pub fn remove(&mut self, opcode: u8) -> Option<Instruction<M>> {
        self.opcodes[opcode as usize].take()
    }

    /// Looks up the descriptor for `opcode`.
    pub fn get(&self, opcode: u8) -> Option<&Instruction<M>> {
        self.opcodes[opcode as usize].as_ref()
    }

    /// Number of opcodes with a descriptor installed.
    pub fn len(&self) -> usize {
        self.opcodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no opcode has a descriptor.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overrides the cycle costs of `opcode`.
    ///
    /// Needed when installing a descriptor in a slot that is undefined by
    /// default, whose costs are 0.
    pub fn set_cycles(&mut self, opcode: u8, base: u8, page_cross: u8) {
        self.cycles[opcode as usize] = base;
        self.cycles_page_cross[opcode as usize] = page_cross;
    }

    /// Base cost of `opcode` (no page cross).
    pub fn base_cycles(&self, opcode: u8) -> u8 {
        self.cycles[opcode as usize]
    }

    /// Cost of `opcode` when a page boundary is crossed.
    pub fn page_cross_cycles(&self, opcode: u8) -> u8 {
        self.cycles_page_cross[opcode as usize]
    }

    /// Runs the descriptor for `opcode` against `cpu` and returns its cycle cost.
    ///
    /// Returns `None` if `opcode` is undefined; `cpu` is untouched in that case.
    pub fn execute(&self, cpu: &mut Cpu<M>, opcode: u8) -> Option<u32> {
        let instruction = self.get(opcode)?;
        let status = (instruction.exec)(cpu, instruction.mode);

        let mut cycles = if status.contains(InstructionStatus::PAGE_CROSSED) {
            self.page_cross_cycles(opcode)
        } else {
            self.base_cycles(opcode)
        } as u32;

        if status.contains(InstructionStatus::BRANCHED) {
            cycles += 1;
        }

        Some(cycles)
    }

    fn install_defaults(&mut self) {
        use AddressingMode::{Absolute, Implicit};
        use OpcodeGroup::{Alu, Control, Rmw};

        // Storage
        self.add_group("LDA", &[0xA1, 0xA5, 0xA9, 0xAD, 0xB1, 0xB5, 0xB9, 0xBD], Alu, load_store::lda);
        self.add_group("LDX", &[0xA2, 0xA6, 0xB6, 0xAE, 0xBE], Rmw, load_store::ldx);
        self.add_group("LDY", &[0xA0, 0xA4, 0xB4, 0xAC, 0xBC], Control, load_store::ldy);
        self.add_group("STA", &[0x85, 0x95, 0x8D, 0x9D, 0x99, 0x81, 0x91], Alu, load_store::sta);
        self.add_group("STX", &[0x86, 0x96, 0x8E], Rmw, load_store::stx);
        self.add_group("STY", &[0x84, 0x94, 0x8C], Control, load_store::sty);

        // Arithmetic and logic
        self.add_group("ADC", &[0x61, 0x65, 0x69, 0x6D, 0x71, 0x75, 0x79, 0x7D], Alu, alu::adc);
        self.add_group("SBC", &[0xE1, 0xE5, 0xE9, 0xED, 0xF1, 0xF5, 0xF9, 0xFD], Alu, alu::sbc);
        self.add_group("AND", &[0x21, 0x25, 0x29, 0x2D, 0x31, 0x35, 0x39, 0x3D], Alu, alu::and);
        self.add_group("ORA", &[0x01, 0x05, 0x09, 0x0D, 0x11, 0x15, 0x19, 0x1D], Alu, alu::ora);
        self.add_group("EOR", &[0x41, 0x45, 0x49, 0x4D, 0x51, 0x55, 0x59, 0x5D], Alu, alu::eor);
        self.add_group("CMP", &[0xC1, 0xC5, 0xC9, 0xCD, 0xD1, 0xD5, 0xD9, 0xDD], Alu, alu::cmp);
        self.add_group("CPX", &[0xE0, 0xE4, 0xEC], Control, alu::cpx);
        self.add_group("CPY", &[0xC0, 0xC4, 0xCC], Control, alu::cpy);
        self.add_group("BIT", &[0x24, 0x2C], Control, alu::bit);

        // Shifts and rotates
        self.add_group("ASL", &[0x0A, 0x06, 0x16, 0x0E, 0x1E], Rmw, shifts::asl);
        self.add_group("LSR", &[0x4A, 0x46, 0x56, 0x4E, 0x5E], Rmw, shifts::lsr);
        self.add_group("ROL", &[0x2A, 0x26, 0x36, 0x2E, 0x3E], Rmw, shifts::rol);
        self.add_group("ROR", &[0x6A, 0x66, 0x76, 0x6E, 0x7E], Rmw, shifts::ror);

        // Increment and decrement
        self.add_group("INC", &[0xE6, 0xF6, 0xEE, 0xFE], Rmw, inc_dec::inc);
        self.add_group("DEC", &[0xC6, 0xD6, 0xCE, 0xDE], Rmw, inc_dec::dec);
        self.add_instruction(Instruction::new("INX", 0xE8, Implicit, inc_dec::inx));
        self.add_instruction(Instruction::new("INY", 0xC8, Implicit, inc_dec::iny));
        self.add_instruction(Instruction::new("DEX", 0xCA, Implicit, inc_dec::dex));
        self.add_instruction(Instruction::new("DEY", 0x88, Implicit, inc_dec::dey));

        // Branches
        self.add_group("BPL", &[0x10], Control, branches::bpl);
        self.add_group("BMI", &[0x30], Control, branches::bmi);
        self.add_group("BVC", &[0x50], Control, branches::bvc);
        self.add_group("BVS", &[0x70], Control, branches::bvs);
        self.add_group("BCC", &[0x90], Control, branches::bcc);
        self.add_group("BCS", &[0xB0], Control, branches::bcs);
        self.add_group("BNE", &[0xD0], Control, branches::bne);
        self.add_group("BEQ", &[0xF0], Control, branches::beq);

        // Control flow
        self.add_group("JMP", &[0x4C, 0x6C], Control, control::jmp);
        self.add_instruction(Instruction::new("JSR", 0x20, Absolute, control::jsr));
        self.add_instruction(Instruction::new("RTS", 0x60, Implicit, control::rts));
        self.add_instruction(Instruction::new("RTI", 0x40, Implicit, control::rti));
        self.add_instruction(Instruction::new("BRK", 0x00, Implicit, control::brk));
        self.add_instruction(Instruction::new("NOP", 0xEA, Implicit, control::nop));

        // Stack
        self.add_instruction(Instruction::new("PHA", 0x48, Implicit, stack::pha));
        self.add_instruction(Instruction::new("PHP", 0x08, Implicit, stack::php));
        self.add_instruction(Instruction::new("PLA", 0x68, Implicit, stack::pla));
        self.add_instruction(Instruction::new("PLP", 0x28, Implicit, stack::plp));

        // Status flags
        self.add_instruction(Instruction::new("CLC", 0x18, Implicit, flags::clc));
        self.add_instruction(Instruction::new("SEC", 0x38, Implicit, flags::sec));
        self.add_instruction(Instruction::new("CLI", 0x58, Implicit, flags::cli));
        self.add_instruction(Instruction::new("SEI", 0x78, Implicit, flags::sei));
        self.add_instruction(Instruction::new("CLV", 0xB8, Implicit, flags::clv));
        self.add_instruction(Instruction::new("CLD", 0xD8, Implicit, flags::cld));
        self.add_instruction(Instruction::new("SED", 0xF8, Implicit, flags::sed));

        // Register transfers
        self.add_instruction(Instruction::new("TAX", 0xAA, Implicit, transfer::tax));
        self.add_instruction(Instruction::new("TAY", 0xA8, Implicit, transfer::tay));
        self.add_instruction(Instruction::new("TXA", 0x8A, Implicit, transfer::txa));
        self.add_instruction(Instruction::new("TYA", 0x98, Implicit, transfer::tya));
        self.add_instruction(Instruction::new("TSX", 0xBA, Implicit, transfer::tsx));
        self.add_instruction(Instruction::new("TXS", 0x9A, Implicit, transfer::txs));
    }
}

impl<M: MemoryBus> Default for InstructionTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ========== Cycle Tables ==========

/// Base cycle cost per opcode. 0 marks an undefined opcode.
#[rustfmt::skip]
pub const CYCLES: [u8; 256] = [
    7, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 0, 4, 6, 0, // 0x0_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0x1_
    6, 6, 0, 0, 3, 3, 5, 0, 4, 2, 2, 0, 4, 4, 6, 0, // 0x2_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0x3_
    6, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 3, 4, 6, 0, // 0x4_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0x5_
    6, 6, 0, 0, 0, 3, 5, 0, 4, 2, 2, 0, 5, 4, 6, 0, // 0x6_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0x7_
    0, 6, 0, 0, 3, 3, 3, 0, 2, 0, 2, 0, 4, 4, 4, 0, // 0x8_
    2, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 0, 5, 0, 0, // 0x9_
    2, 6, 2, 0, 3, 3, 3, 0, 2, 2, 2, 0, 4, 4, 4, 0, // 0xA_
    2, 5, 0, 0, 4, 4, 4, 0, 2, 4, 2, 0, 4, 4, 4, 0, // 0xB_
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // 0xC_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0xD_
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // 0xE_
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 0xF_
];

/// Cycle cost per opcode when a page boundary is crossed. 0 marks an
/// undefined opcode.
#[rustfmt::skip]
pub const CYCLES_PAGE_CROSS: [u8; 256] = [
    7, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 0, 4, 6, 0, // 0x0_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0x1_
    6, 6, 0, 0, 3, 3, 5, 0, 4, 2, 2, 0, 4, 4, 6, 0, // 0x2_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0x3_
    6, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 3, 4, 6, 0, // 0x4_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0x5_
    6, 6, 0, 0, 0, 3, 5, 0, 4, 2, 2, 0, 5, 4, 6, 0, // 0x6_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0x7_
    0, 6, 0, 0, 3, 3, 3, 0, 2, 0, 2, 0, 4, 4, 4, 0, // 0x8_
    3, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 0, 5, 0, 0, // 0x9_
    2, 6, 2, 0, 3, 3, 3, 0, 2, 2, 2, 0, 4, 4, 4, 0, // 0xA_
    3, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 5, 5, 5, 0, // 0xB_
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // 0xC_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0xD_
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // 0xE_
    3, 6, 0, 0, 0, 4, 6, 0, 2, 5, 0, 0, 0, 5, 7, 0, // 0xF_
];
