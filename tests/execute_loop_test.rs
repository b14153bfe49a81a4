//! Execution loop tests
//!
//! Verifies fetch-decode-execute, halt conditions, cycle counting, the stop
//! handle and custom instruction tables.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpu6502::{
    AddressingMode, Config, Cpu, FlatMemory, Halt, Instruction, InstructionStatus, InstructionTable,
    MemoryBus,
};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    setup_cpu_with(Config::default())
}

fn setup_cpu_with(config: Config) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::with_config(memory, config)
}

// ========== Halt Conditions ==========

#[test]
fn test_undefined_opcode_halts_with_zero_cycles() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x02);

    let outcome = cpu.step();

    assert_eq!(outcome.halt, Some(Halt::UndefinedOpcode(0x02)));
    assert_eq!(outcome.cycles, 0);
    assert_eq!(cpu.registers().pc, 0x8001);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn test_undefined_opcode_reports_interrupt_cycles() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0xFFFA, 0x00);
    cpu.memory_mut().write(0xFFFB, 0x90);
    cpu.memory_mut().write(0x9000, 0xFF);
    cpu.request_nmi();

    let outcome = cpu.step();

    assert_eq!(outcome.halt, Some(Halt::UndefinedOpcode(0xFF)));
    assert_eq!(outcome.cycles, 7);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_fatal_brk_halts_run() {
    let mut cpu = setup_cpu_with(Config::default().with_break_is_fatal(true));
    // LDA #$01; BRK
    cpu.memory_mut().load(0x8000, &[0xA9, 0x01, 0x00]);

    assert_eq!(cpu.run(), Halt::BreakExecuted);
    assert_eq!(cpu.registers().a, 0x01);
    assert_eq!(cpu.registers().pc, 0x8003);
    // BRK semantics did not run: nothing pushed
    assert_eq!(cpu.registers().sp, 0xFD);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_non_fatal_brk_continues_through_vector() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0xFFFE, 0x00);
    cpu.memory_mut().write(0xFFFF, 0x90);
    cpu.memory_mut().write(0x9000, 0x02);

    assert_eq!(cpu.run(), Halt::UndefinedOpcode(0x02));
    assert_eq!(cpu.registers().pc, 0x9001);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_run_counts_loop() {
    let mut cpu = setup_cpu_with(Config::default().with_break_is_fatal(true));
    // LDX #$05; loop: DEX; BNE loop; BRK
    cpu.memory_mut().load(0x8000, &[0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x00]);

    assert_eq!(cpu.run(), Halt::BreakExecuted);
    assert_eq!(cpu.registers().x, 0);
    // LDX 2 + 5 * DEX 2 + 4 taken BNE * 3 + final BNE 2
    assert_eq!(cpu.cycles(), 2 + 10 + 12 + 2);
}

// ========== Stop Handle ==========

#[test]
fn test_stop_handle_from_another_thread() {
    let mut cpu = setup_cpu();
    // JMP $8000 forever
    cpu.memory_mut().load(0x8000, &[0x4C, 0x00, 0x80]);
    let handle = cpu.stop_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        handle.stop();
    });

    assert_eq!(cpu.run(), Halt::StopRequested);
    stopper.join().expect("stopper thread panicked");
    assert_eq!(cpu.registers().pc, 0x8000);
    assert_eq!(cpu.cycles() % 3, 0);
}

#[test]
fn test_stop_request_is_consumed() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8001, 0x02);
    cpu.memory_mut().write(0x8000, 0xEA);
    cpu.stop_handle().stop();

    assert_eq!(cpu.run(), Halt::StopRequested);
    assert_eq!(cpu.run(), Halt::UndefinedOpcode(0x02));
}

// ========== Cycle Budget ==========

#[test]
fn test_run_for_cycles_exact() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA; 32]);

    assert_eq!(cpu.run_for_cycles(10), Ok(10));
    assert_eq!(cpu.registers().pc, 0x8005);
}

#[test]
fn test_run_for_cycles_overshoots_by_instruction_granularity() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA; 32]);

    assert_eq!(cpu.run_for_cycles(11), Ok(12));
    assert_eq!(cpu.cycles(), 12);
}

#[test]
fn test_run_for_cycles_stops_on_halt() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA, 0xEA, 0x02]);

    assert_eq!(cpu.run_for_cycles(100), Err(Halt::UndefinedOpcode(0x02)));
    assert_eq!(cpu.cycles(), 4);
}

// ========== Custom Tables ==========

fn load_marker(cpu: &mut Cpu<FlatMemory>, _mode: AddressingMode) -> InstructionStatus {
    cpu.registers_mut().a = 0x42;
    InstructionStatus::empty()
}

#[test]
fn test_custom_descriptor_replaces_default() {
    let mut table = InstructionTable::new();
    table.add_instruction(Instruction::new("MRK", 0xEA, AddressingMode::Implicit, load_marker));

    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0x8000, 0xEA);
    let mut cpu = Cpu::with_table(memory, Config::default(), Arc::new(table));

    let outcome = cpu.step();

    assert_eq!(outcome.cycles, 2);
    assert_eq!(cpu.registers().a, 0x42);
}

#[test]
fn test_custom_descriptor_in_undefined_slot() {
    let mut table = InstructionTable::new();
    table.add_instruction(Instruction::new("MRK", 0x02, AddressingMode::Implicit, load_marker));
    table.set_cycles(0x02, 3, 3);

    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0x8000, 0x02);
    let mut cpu = Cpu::with_table(memory, Config::default(), Arc::new(table));

    let outcome = cpu.step();

    assert_eq!(outcome.halt, None);
    assert_eq!(outcome.cycles, 3);
    assert_eq!(cpu.registers().a, 0x42);
}

#[test]
fn test_removed_descriptor_is_undefined() {
    let mut table = InstructionTable::new();
    assert!(table.remove(0xEA).is_some());

    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0x8000, 0xEA);
    let mut cpu = Cpu::with_table(memory, Config::default(), Arc::new(table));

    assert_eq!(cpu.step().halt, Some(Halt::UndefinedOpcode(0xEA)));
}

#[test]
fn test_shared_table_between_engines() {
    let table = Arc::new(InstructionTable::new());
    let a = Cpu::with_table(FlatMemory::new(), Config::default(), Arc::clone(&table));
    let b = Cpu::with_table(FlatMemory::new(), Config::default(), Arc::clone(&table));

    assert!(Arc::ptr_eq(a.table(), b.table()));
}

// ========== Display ==========

#[test]
fn test_halt_display() {
    assert_eq!(Halt::UndefinedOpcode(0x02).to_string(), "No such opcode 0x02");
    assert_eq!(Halt::BreakExecuted.to_string(), "Executed BRK opcode");
    assert_eq!(Halt::StopRequested.to_string(), "Stop requested");
}

#[test]
fn test_registers_display() {
    let cpu = setup_cpu();
    assert_eq!(cpu.registers().to_string(), "A:00 X:00 Y:00 P:24 SP:FD");
}
