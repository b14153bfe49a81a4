//! Tests for flag set/clear and register transfer instructions.

use cpu6502::{Cpu, FlatMemory, MemoryBus, Status};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

// ========== Flags ==========

#[test]
fn test_flag_instructions() {
    // (opcode, flag, value after execution)
    let cases = [
        (0x18, Status::CARRY, false),
        (0x38, Status::CARRY, true),
        (0x58, Status::INTERRUPT_DISABLE, false),
        (0x78, Status::INTERRUPT_DISABLE, true),
        (0xB8, Status::OVERFLOW, false),
        (0xD8, Status::DECIMAL, false),
        (0xF8, Status::DECIMAL, true),
    ];

    for (opcode, flag, expected) in cases {
        let mut cpu = setup_cpu();
        cpu.registers_mut().p.set(flag, !expected);
        cpu.memory_mut().load(0x8000, &[opcode]);

        let outcome = cpu.step();

        assert_eq!(outcome.cycles, 2, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.registers().p.contains(flag), expected, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.registers().pc, 0x8001);
    }
}

#[test]
fn test_clc_leaves_other_flags() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().p = Status::all();
    cpu.memory_mut().load(0x8000, &[0x18]);

    cpu.step();

    assert_eq!(cpu.registers().p, Status::all() - Status::CARRY);
}

// ========== Transfers ==========

#[test]
fn test_tax_sets_zero() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().x = 0x55;
    cpu.memory_mut().load(0x8000, &[0xAA]);

    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 2);
    assert_eq!(cpu.registers().x, 0x00);
    assert!(cpu.registers().p.contains(Status::ZERO));
}

#[test]
fn test_tay() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().a = 0x90;
    cpu.memory_mut().load(0x8000, &[0xA8]);

    cpu.step();

    assert_eq!(cpu.registers().y, 0x90);
    assert!(cpu.registers().p.contains(Status::NEGATIVE));
}

#[test]
fn test_txa_and_tya() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().x = 0x11;
    cpu.registers_mut().y = 0x22;
    cpu.memory_mut().load(0x8000, &[0x8A, 0x98]);

    cpu.step();
    assert_eq!(cpu.registers().a, 0x11);
    cpu.step();
    assert_eq!(cpu.registers().a, 0x22);
}

#[test]
fn test_tsx_after_reset() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xBA]);

    cpu.step();

    assert_eq!(cpu.registers().x, 0xFD);
    assert!(cpu.registers().p.contains(Status::NEGATIVE));
}

#[test]
fn test_txs_does_not_touch_flags() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().x = 0x00;
    let before = cpu.registers().p;
    cpu.memory_mut().load(0x8000, &[0x9A]);

    cpu.step();

    assert_eq!(cpu.registers().sp, 0x00);
    assert_eq!(cpu.registers().p, before);
}
