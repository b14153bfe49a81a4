//! Memory bus trait tests
//!
//! Verifies that the engine talks to memory only through `MemoryBus`, using a
//! small mirrored-RAM-plus-ROM backend, and that `FlatMemory` behaves as a
//! plain 64KB array.

use cpu6502::{Cpu, FlatMemory, MemoryBus};

/// 2KB of RAM mirrored through 0x0000-0x1FFF and a ROM at 0x8000-0xFFFF.
/// Writes to ROM are counted and dropped.
struct MirroredBus {
    ram: [u8; 0x800],
    rom: Vec<u8>,
    rom_writes: usize,
}

impl MirroredBus {
    fn new(program: &[u8]) -> Self {
        let mut rom = vec![0xEA; 0x8000];
        rom[..program.len()].copy_from_slice(program);
        // Reset vector -> 0x8000
        rom[0x7FFC] = 0x00;
        rom[0x7FFD] = 0x80;
        Self {
            ram: [0; 0x800],
            rom,
            rom_writes: 0,
        }
    }
}

impl MemoryBus for MirroredBus {
    fn reset(&mut self) {
        self.ram = [0; 0x800];
    }

    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x8000..=0xFFFF => self.rom[(addr - 0x8000) as usize],
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x8000..=0xFFFF => self.rom_writes += 1,
            _ => {}
        }
    }
}

#[test]
fn test_engine_uses_custom_bus() {
    // LDA #$5A; STA $0810; LDX $0010; STA $9000
    let program = [0xA9, 0x5A, 0x8D, 0x10, 0x08, 0xAE, 0x10, 0x00, 0x8D, 0x00, 0x90];
    let mut cpu = Cpu::new(MirroredBus::new(&program));
    assert_eq!(cpu.registers().pc, 0x8000);

    for _ in 0..4 {
        assert_eq!(cpu.step().halt, None);
    }

    // 0x0810 mirrors 0x0010
    assert_eq!(cpu.registers().x, 0x5A);
    assert_eq!(cpu.memory().rom_writes, 1);
    assert_eq!(cpu.memory().read(0x9000), 0xEA);
}

#[test]
fn test_unmapped_reads_as_open_bus() {
    // LDA $4000
    let mut cpu = Cpu::new(MirroredBus::new(&[0xAD, 0x00, 0x40]));

    cpu.step();

    assert_eq!(cpu.registers().a, 0xFF);
}

#[test]
fn test_bus_reset_clears_ram() {
    let mut cpu = Cpu::new(MirroredBus::new(&[]));
    cpu.memory_mut().write(0x0042, 0x99);

    cpu.memory_mut().reset();

    assert_eq!(cpu.memory().read(0x0042), 0x00);
}

#[test]
fn test_into_memory_returns_backend() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    // LDA #$77; STA $0200
    memory.load(0x8000, &[0xA9, 0x77, 0x8D, 0x00, 0x02]);
    let mut cpu = Cpu::new(memory);

    cpu.step();
    cpu.step();

    let memory = cpu.into_memory();
    assert_eq!(memory.read(0x0200), 0x77);
}

#[test]
fn test_flat_memory_initialization() {
    let memory = FlatMemory::new();

    for addr in [0x0000, 0x1234, 0x8000, 0xFFFF] {
        assert_eq!(memory.read(addr), 0x00, "Memory at 0x{:04X} should be initialized to 0", addr);
    }
}

#[test]
fn test_flat_memory_full_address_space() {
    let mut memory = FlatMemory::new();

    memory.write(0x0000, 0x01);
    memory.write(0xFFFF, 0xCD);

    assert_eq!(memory.read(0x0000), 0x01);
    assert_eq!(memory.read(0xFFFF), 0xCD);
}
