//! Tests for the conditional branch instructions.
//!
//! Tests cover:
//! - All eight conditions, taken and not taken
//! - Cycle timing: 2 not taken, 3 taken, 4 taken across a page
//! - Forward and backward offsets

use cpu6502::{Cpu, FlatMemory, MemoryBus, Status};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

/// (opcode, flag tested, branch taken when the flag is set)
const BRANCHES: [(u8, Status, bool); 8] = [
    (0x10, Status::NEGATIVE, false), // BPL
    (0x30, Status::NEGATIVE, true),  // BMI
    (0x50, Status::OVERFLOW, false), // BVC
    (0x70, Status::OVERFLOW, true),  // BVS
    (0x90, Status::CARRY, false),    // BCC
    (0xB0, Status::CARRY, true),     // BCS
    (0xD0, Status::ZERO, false),     // BNE
    (0xF0, Status::ZERO, true),      // BEQ
];

#[test]
fn test_all_branch_conditions() {
    for &(opcode, flag, taken_when_set) in BRANCHES.iter() {
        for flag_set in [false, true] {
            let mut cpu = setup_cpu();
            cpu.registers_mut().p.set(flag, flag_set);
            cpu.memory_mut().load(0x8000, &[opcode, 0x10]);

            let outcome = cpu.step();

            if flag_set == taken_when_set {
                assert_eq!(cpu.registers().pc, 0x8012, "opcode 0x{:02X} should branch", opcode);
                assert_eq!(outcome.cycles, 3, "opcode 0x{:02X}", opcode);
            } else {
                assert_eq!(cpu.registers().pc, 0x8002, "opcode 0x{:02X} should fall through", opcode);
                assert_eq!(outcome.cycles, 2, "opcode 0x{:02X}", opcode);
            }
        }
    }
}

#[test]
fn test_branch_taken_forward_page_cross() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().pc = 0x80F0;
    cpu.memory_mut().load(0x80F0, &[0xD0, 0x20]); // BNE +32

    let outcome = cpu.step();

    assert_eq!(cpu.registers().pc, 0x8112);
    assert_eq!(outcome.cycles, 4);
}

#[test]
fn test_branch_taken_backward_page_cross() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD0, 0xFD]); // BNE -3

    let outcome = cpu.step();

    assert_eq!(cpu.registers().pc, 0x7FFF);
    assert_eq!(outcome.cycles, 4);
}

#[test]
fn test_branch_backward_same_page() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().pc = 0x8010;
    cpu.registers_mut().p.insert(Status::CARRY);
    cpu.memory_mut().load(0x8010, &[0xB0, 0xF0]); // BCS -16

    let outcome = cpu.step();

    assert_eq!(cpu.registers().pc, 0x8002);
    assert_eq!(outcome.cycles, 3);
}

#[test]
fn test_not_taken_branch_ignores_page() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().pc = 0x80FE;
    cpu.registers_mut().p.insert(Status::ZERO);
    cpu.memory_mut().load(0x80FE, &[0xD0, 0x7F]);

    let outcome = cpu.step();

    assert_eq!(cpu.registers().pc, 0x8100);
    assert_eq!(outcome.cycles, 2);
}

#[test]
fn test_branches_leave_flags_alone() {
    let mut cpu = setup_cpu();
    cpu.registers_mut().p.insert(Status::CARRY | Status::NEGATIVE);
    let before = cpu.registers().p;
    cpu.memory_mut().load(0x8000, &[0x30, 0x04]); // BMI +4

    cpu.step();

    assert_eq!(cpu.registers().p, before);
    assert_eq!(cpu.registers().pc, 0x8006);
}
