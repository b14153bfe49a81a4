//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file, memory image and set of pending
//! interrupt lines, then runs a few steps looking for panics and broken
//! invariants.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{Config, Cpu, FlatMemory, Interrupt, Status, CYCLES_PAGE_CROSS};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw status byte
    p: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Region for absolute addressing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    irq: bool,
    nmi: bool,
    reset: bool,
    break_is_fatal: bool,
    decimal_mode: bool,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    // Reset at 0x8000, IRQ/BRK at 0x9000, NMI at 0xA000
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let config = Config::default()
        .with_break_is_fatal(input.break_is_fatal)
        .with_decimal_mode(input.decimal_mode);
    let mut cpu = Cpu::with_config(memory, config);

    let regs = cpu.registers_mut();
    regs.a = input.cpu_state.a;
    regs.x = input.cpu_state.x;
    regs.y = input.cpu_state.y;
    regs.sp = input.cpu_state.sp;
    regs.p = Status::from_stack(input.cpu_state.p);

    let lines = cpu.interrupt_lines();
    if input.irq {
        lines.request(Interrupt::Irq);
    }
    if input.nmi {
        lines.request(Interrupt::Nmi);
    }
    if input.reset {
        lines.request(Interrupt::Reset);
    }

    for _ in 0..(input.steps % 8) + 1 {
        let before = cpu.cycles();
        let outcome = cpu.step();

        // One interrupt plus the most expensive instruction and branch penalty
        let max_opcode = CYCLES_PAGE_CROSS.iter().copied().max().unwrap_or(0) as u32;
        assert!(outcome.cycles <= 7 + max_opcode + 1);
        assert_eq!(cpu.cycles(), before + outcome.cycles as u64);
        assert!(cpu.registers().p.contains(Status::UNUSED));

        if outcome.halt.is_some() {
            break;
        }
    }
});
