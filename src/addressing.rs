//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolvers
//! that turn operand bytes into effective addresses.
//!
//! Every resolver consumes its operand bytes starting at PC, advances PC past
//! them and returns an [`Operand`]: the effective address plus a page-cross
//! signal. Immediate mode returns the address PC held *before* advancing, so the
//! operand byte is read from there like any other memory operand.
//!
//! Callers that never pay the page-crossing penalty (stores, read-modify-write)
//! simply ignore `page_crossed`.
//!
//! ## Opcode Groups
//!
//! Documented opcodes follow the `aaabbbcc` layout: `cc` selects a group and
//! `bbb` selects the addressing mode within it. [`OpcodeGroup::mode`] performs
//! that decode so the instruction table can install a mnemonic over its whole
//! opcode list in one loop.

use crate::{Cpu, MemoryBus};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer (JMP only).
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Result of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operand {
    /// Effective address of the operand.
    pub address: u16,
    /// True when indexing moved the address onto a different page than its base.
    pub page_crossed: bool,
}

impl Operand {
    fn at(address: u16) -> Self {
        Self {
            address,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let address = base.wrapping_add(index as u16);
        Self {
            address,
            page_crossed: !same_page(base, address),
        }
    }
}

/// Returns true if both addresses lie in the same 256-byte page.
///
/// Two addresses are on the same page if their high bytes match: 0x0101 and
/// 0x0103 are, 0x0101 and 0x0203 are not.
///
/// # Examples
///
/// ```
/// use cpu6502::same_page;
///
/// assert!(same_page(0x0101, 0x0103));
/// assert!(!same_page(0x02FF, 0x0300));
/// ```
pub fn same_page(a: u16, b: u16) -> bool {
    (a ^ b) >> 8 == 0
}

/// Opcode group, selected by the low two bits (`cc`) of a documented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeGroup {
    /// `cc = 00`: LDY, STY, CPX, CPY, BIT, JMP and friends.
    Control,
    /// `cc = 01`: LDA, STA, ADC, SBC, AND, ORA, EOR, CMP.
    Alu,
    /// `cc = 10`: LDX, STX, ASL, LSR, ROL, ROR, INC, DEC.
    Rmw,
}

impl OpcodeGroup {
    /// Decodes the addressing mode from the `bbb` field of `opcode`.
    ///
    /// Slots that hold single-byte or special instructions in a group decode to
    /// `Implicit` (or `Relative` for the branch column); those opcodes are
    /// installed with an explicit mode instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{AddressingMode, OpcodeGroup};
    ///
    /// assert_eq!(OpcodeGroup::Alu.mode(0xBD), AddressingMode::AbsoluteX);
    /// assert_eq!(OpcodeGroup::Rmw.mode(0xBE), AddressingMode::AbsoluteY); // LDX abs,Y
    /// assert_eq!(OpcodeGroup::Control.mode(0xA0), AddressingMode::Immediate);
    /// ```
    pub fn mode(self, opcode: u8) -> AddressingMode {
        let bbb = (opcode >> 2) & 0x07;
        match self {
            OpcodeGroup::Alu => match bbb {
                0 => AddressingMode::IndirectX,
                1 => AddressingMode::ZeroPage,
                2 => AddressingMode::Immediate,
                3 => AddressingMode::Absolute,
                4 => AddressingMode::IndirectY,
                5 => AddressingMode::ZeroPageX,
                6 => AddressingMode::AbsoluteY,
                _ => AddressingMode::AbsoluteX,
            },
            OpcodeGroup::Rmw => {
                // LDX/STX (aaa = 100, 101) index by Y instead of X
                let by_y = opcode & 0xC0 == 0x80;
                match bbb {
                    0 => AddressingMode::Immediate,
                    1 => AddressingMode::ZeroPage,
                    2 => AddressingMode::Accumulator,
                    3 => AddressingMode::Absolute,
                    5 if by_y => AddressingMode::ZeroPageY,
                    5 => AddressingMode::ZeroPageX,
                    7 if by_y => AddressingMode::AbsoluteY,
                    7 => AddressingMode::AbsoluteX,
                    _ => AddressingMode::Implicit,
                }
            }
            OpcodeGroup::Control => match bbb {
                0 => AddressingMode::Immediate,
                1 => AddressingMode::ZeroPage,
                3 if opcode == 0x6C => AddressingMode::Indirect,
                3 => AddressingMode::Absolute,
                4 => AddressingMode::Relative,
                5 => AddressingMode::ZeroPageX,
                7 => AddressingMode::AbsoluteX,
                _ => AddressingMode::Implicit,
            },
        }
    }
}

// ========== Resolvers ==========

impl<M: MemoryBus> Cpu<M> {
    /// Reads the byte at PC and advances PC by one.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word from `addr`/`addr + 1`.
    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian pointer from zero page, wrapping the high-byte
    /// fetch within page zero.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Immediate: the operand lives at PC itself.
    pub fn immediate(&mut self) -> Operand {
        let address = self.regs.pc;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Operand::at(address)
    }

    /// Zero page: single byte, zero-extended.
    pub fn zero_page(&mut self) -> Operand {
        Operand::at(self.fetch_byte() as u16)
    }

    /// Zero page,X: (byte + X) truncated to 8 bits.
    pub fn zero_page_x(&mut self) -> Operand {
        let zp = self.fetch_byte().wrapping_add(self.regs.x);
        Operand::at(zp as u16)
    }

    /// Zero page,Y: (byte + Y) truncated to 8 bits.
    pub fn zero_page_y(&mut self) -> Operand {
        let zp = self.fetch_byte().wrapping_add(self.regs.y);
        Operand::at(zp as u16)
    }

    /// Absolute: little-endian 16-bit address.
    pub fn absolute(&mut self) -> Operand {
        Operand::at(self.fetch_word())
    }

    /// Absolute,X: base + X with a full 16-bit add.
    pub fn absolute_x(&mut self) -> Operand {
        let base = self.fetch_word();
        Operand::indexed(base, self.regs.x)
    }

    /// Absolute,Y: base + Y with a full 16-bit add.
    pub fn absolute_y(&mut self) -> Operand {
        let base = self.fetch_word();
        Operand::indexed(base, self.regs.y)
    }

    /// Indirect (JMP only), reproducing the NMOS page-wrap bug.
    ///
    /// When the pointer's low byte is 0xFF the high byte of the target is read
    /// from the start of the *same* page: `JMP ($02FF)` reads 0x02FF and 0x0200.
    pub fn indirect(&mut self) -> Operand {
        let pointer = self.fetch_word();
        let lo = self.memory.read(pointer) as u16;
        let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
        let hi = self.memory.read(hi_addr) as u16;
        Operand::at((hi << 8) | lo)
    }

    /// Indexed indirect `(zp,X)`: pointer at (byte + X) within zero page.
    pub fn indexed_indirect(&mut self) -> Operand {
        let zp = self.fetch_byte().wrapping_add(self.regs.x);
        Operand::at(self.read_zero_page_word(zp))
    }

    /// Indirect indexed `(zp),Y`: base from zero page pointer, then + Y.
    pub fn indirect_indexed(&mut self) -> Operand {
        let zp = self.fetch_byte();
        let base = self.read_zero_page_word(zp);
        Operand::indexed(base, self.regs.y)
    }

    /// Relative: signed displacement added to PC after the displacement byte.
    ///
    /// The branch-taken and branch page-cross penalties are decided by the
    /// branch itself, so `page_crossed` is always false here.
    pub fn relative(&mut self) -> Operand {
        let offset = self.fetch_byte() as i8;
        Operand::at(self.regs.pc.wrapping_add_signed(offset as i16))
    }

    /// Dispatches to the resolver for `mode`.
    ///
    /// Implicit and Accumulator consume nothing and return PC unchanged.
    pub fn resolve(&mut self, mode: AddressingMode) -> Operand {
        match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => Operand::at(self.regs.pc),
            AddressingMode::Immediate => self.immediate(),
            AddressingMode::ZeroPage => self.zero_page(),
            AddressingMode::ZeroPageX => self.zero_page_x(),
            AddressingMode::ZeroPageY => self.zero_page_y(),
            AddressingMode::Relative => self.relative(),
            AddressingMode::Absolute => self.absolute(),
            AddressingMode::AbsoluteX => self.absolute_x(),
            AddressingMode::AbsoluteY => self.absolute_y(),
            AddressingMode::Indirect => self.indirect(),
            AddressingMode::IndirectX => self.indexed_indirect(),
            AddressingMode::IndirectY => self.indirect_indexed(),
        }
    }
}
