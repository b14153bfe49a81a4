//! Tests for the stack instructions.
//!
//! Tests cover:
//! - PHA/PLA data and Z/N on pull
//! - PHP pushing B and Unused set
//! - PLP discarding B and forcing Unused
//! - Stack pointer wrap-around within page one

use cpu6502::{Cpu, FlatMemory, MemoryBus, Status};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

#[test]
fn test_pha() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().a = 0x42;
    cpu.memory_mut().load(0x8000, &[0x48]);

    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 3);
    assert_eq!(cpu.memory().read(0x01FD), 0x42);
    assert_eq!(cpu.registers().sp, 0xFC);
}

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().a = 0x80;
    // PHA; LDA #$00; PLA
    cpu.memory_mut().load(0x8000, &[0x48, 0xA9, 0x00, 0x68]);

    cpu.step();
    cpu.step();
    assert!(cpu.registers().p.contains(Status::ZERO));
    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 4);
    assert_eq!(cpu.registers().a, 0x80);
    assert!(cpu.registers().p.contains(Status::NEGATIVE));
    assert!(!cpu.registers().p.contains(Status::ZERO));
    assert_eq!(cpu.registers().sp, 0xFD);
}

#[test]
fn test_php_sets_break_and_unused_in_pushed_copy() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x08]);

    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 3);
    // I | U | B
    assert_eq!(cpu.memory().read(0x01FD), 0x34);
    assert!(!cpu.registers().p.contains(Status::BREAK));
}

#[test]
fn test_plp_discards_break() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().sp = 0xFC;
    cpu.memory_mut().write(0x01FD, 0xFF);
    cpu.memory_mut().load(0x8000, &[0x28]);

    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 4);
    assert_eq!(cpu.registers().p.bits(), 0xEF);
    assert_eq!(cpu.registers().sp, 0xFD);
}

#[test]
fn test_plp_forces_unused() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().sp = 0xFC;
    cpu.memory_mut().write(0x01FD, 0x00);
    cpu.memory_mut().load(0x8000, &[0x28]);

    cpu.step();

    assert_eq!(cpu.registers().p, Status::UNUSED);
}

#[test]
fn test_push_wraps_at_bottom_of_stack() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().sp = 0x00;
    cpu.registers_mut().a = 0x99;
    cpu.memory_mut().load(0x8000, &[0x48]);

    cpu.step();

    assert_eq!(cpu.memory().read(0x0100), 0x99);
    assert_eq!(cpu.registers().sp, 0xFF);
}

#[test]
fn test_pull_wraps_at_top_of_stack() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().sp = 0xFF;
    cpu.memory_mut().write(0x0100, 0x07);
    cpu.memory_mut().load(0x8000, &[0x68]);

    cpu.step();

    assert_eq!(cpu.registers().a, 0x07);
    assert_eq!(cpu.registers().sp, 0x00);
}
