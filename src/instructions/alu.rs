//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic
//! - CMP, CPX, CPY: Compare
//! - BIT: Bit test
//!
//! ADC and SBC honour the Decimal flag when [`Config::decimal_mode`] is on,
//! using NMOS BCD semantics: Z comes from the binary result, N and V from the
//! intermediate high nibble.
//!
//! [`Config::decimal_mode`]: crate::Config::decimal_mode

use crate::{AddressingMode, Cpu, InstructionStatus, MemoryBus, Status};

fn decimal_active<M: MemoryBus>(cpu: &Cpu<M>) -> bool {
    cpu.config.decimal_mode && cpu.regs.p.contains(Status::DECIMAL)
}

/// Executes the ADC (Add with Carry) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the result exceeds 0xFF (or 99 in decimal mode)
/// - Zero (Z): Set if the binary result is 0
/// - Overflow (V): Set if two operands of equal sign produce a result of the other sign
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn adc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    if decimal_active(cpu) {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
    status
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Carry acts as an inverted borrow: A = A - M - (1 - C).
pub(crate) fn sbc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    if decimal_active(cpu) {
        subtract_decimal(cpu, value);
    } else {
        // Binary subtraction is addition of the one's complement
        add_binary(cpu, !value);
    }
    status
}

fn add_binary<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a;
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    cpu.regs.p.set(Status::CARRY, sum > 0xFF);
    // Both operands had the same sign but the result has a different one
    cpu.regs.p.set(Status::OVERFLOW, (a ^ result) & (value ^ result) & 0x80 != 0);
    cpu.regs.a = cpu.regs.set_zero_and_negative(result);
}

fn add_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a;
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u16;

    let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a >> 4) as u16 + (value >> 4) as u16 + (lo > 0x0F) as u16;

    let binary = a.wrapping_add(value).wrapping_add(carry_in as u8);
    let intermediate = ((hi << 4) as u8) | (lo as u8 & 0x0F);
    cpu.regs.set_zero(binary);
    cpu.regs.set_negative(intermediate);
    cpu.regs.p.set(Status::OVERFLOW, (a ^ intermediate) & !(a ^ value) & 0x80 != 0);

    if hi > 0x09 {
        hi += 0x06;
    }
    cpu.regs.p.set(Status::CARRY, hi > 0x0F);
    cpu.regs.a = ((hi << 4) as u8) | (lo as u8 & 0x0F);
}

fn subtract_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.regs.a;
    let borrow = !cpu.regs.p.contains(Status::CARRY) as i16;

    // Flags follow the binary subtraction on NMOS parts
    let difference = a as i16 - value as i16 - borrow;
    let binary = difference as u8;
    cpu.regs.p.set(Status::CARRY, difference >= 0);
    cpu.regs.p.set(Status::OVERFLOW, (a ^ value) & (a ^ binary) & 0x80 != 0);
    cpu.regs.set_zero_and_negative(binary);

    let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
    if lo < 0 {
        lo -= 0x06;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 0x06;
    }
    cpu.regs.a = ((hi << 4) as u8) | (lo as u8 & 0x0F);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn and<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.set_zero_and_negative(cpu.regs.a & value);
    status
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn ora<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.set_zero_and_negative(cpu.regs.a | value);
    status
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn eor<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.a = cpu.regs.set_zero_and_negative(cpu.regs.a ^ value);
    status
}

/// Shared body of CMP/CPX/CPY: C = register >= M, Z and N from register - M.
fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, register: u8, value: u8) {
    cpu.regs.p.set(Status::CARRY, register >= value);
    cpu.regs.set_zero_and_negative(register.wrapping_sub(value));
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn cmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    let register = cpu.regs.a;
    compare(cpu, register, value);
    status
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn cpx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    let register = cpu.regs.x;
    compare(cpu, register, value);
    status
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn cpy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    let register = cpu.regs.y;
    compare(cpu, register, value);
    status
}

/// Executes the BIT (Bit Test) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A & M = 0
/// - Overflow (V): Copied from bit 6 of M
/// - Negative (N): Copied from bit 7 of M
pub(crate) fn bit<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode) -> InstructionStatus {
    let (value, status) = cpu.read_operand(mode);
    cpu.regs.set_zero(cpu.regs.a & value);
    cpu.regs.set_negative(value);
    cpu.regs.p.set(Status::OVERFLOW, value & 0x40 != 0);
    status
}
