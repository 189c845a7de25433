use hlsim_core::common::constants::PAGE_SIZE;
use hlsim_core::common::{Permissions, PhysAddr};
use hlsim_core::config::Config;
use hlsim_core::core::Cpu;
use hlsim_core::core::arch::{AddressingMode, ExitStatus, Interrupt, Register};
use hlsim_core::core::units::mmu::Mmu;
use hlsim_core::core::units::mmu::ptw::PageDirectoryEntry;
use hlsim_core::sim::loader;
use hlsim_core::soc::System;

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub system: System,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A default 1 MiB machine in kernel mode.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// A machine with exactly `size` bytes of physical memory.
    pub fn with_memory_size(size: usize) -> Self {
        let mut config = Config::default();
        config.memory.size = size;
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let system = System::from_config(config).expect("system construction");
        Self { system }
    }

    /// Copies `words` to physical `addr` and points IP at them.
    pub fn load_program(mut self, addr: u64, words: &[u32]) -> Self {
        loader::load_words(&mut self.system, addr, words).expect("program load");
        self.system.cpu.regs.set_ip(addr);
        self
    }

    /// Copies `words` to physical `addr` without touching IP.
    pub fn with_code(mut self, addr: u64, words: &[u32]) -> Self {
        loader::load_words(&mut self.system, addr, words).expect("code load");
        self
    }

    /// Installs a vector table at `base` with the given handler addresses.
    pub fn with_vector_table(mut self, base: u64, handlers: &[(Interrupt, u64)]) -> Self {
        self.system.cpu.interrupts.set_vector_table_base(Some(base));
        for &(kind, handler) in handlers {
            let entry = base + u64::from(kind.vector()) * 8;
            self.write_u64(entry, handler);
        }
        self
    }

    pub fn cpu(&self) -> &Cpu {
        &self.system.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.system.cpu
    }

    pub fn mmu_mut(&mut self) -> &mut Mmu {
        self.system.mmu_mut()
    }

    pub fn set_reg(&mut self, reg: Register, val: u64) {
        self.system.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: Register) -> u64 {
        self.system.cpu.regs.read(reg)
    }

    pub fn ip(&self) -> u64 {
        self.system.cpu.regs.ip()
    }

    pub fn set_mode(&mut self, mode: AddressingMode) {
        self.system.cpu.regs.set_mode(mode);
    }

    pub fn write_u64(&mut self, addr: u64, val: u64) {
        self.mmu_mut()
            .write_physical_64(PhysAddr::new(addr), val)
            .expect("physical write");
    }

    pub fn read_u64(&self, addr: u64) -> u64 {
        self.system
            .mmu()
            .read_physical_64(PhysAddr::new(addr))
            .expect("physical read")
    }

    pub fn step(&mut self) -> Option<ExitStatus> {
        self.system.step()
    }

    /// Steps at most `limit` cycles, returning the exit status if the program stopped.
    pub fn run(&mut self, limit: u64) -> Option<ExitStatus> {
        for _ in 0..limit {
            if let Some(status) = self.system.step() {
                return Some(status);
            }
        }
        None
    }
}

/// Builds five-level translations, handing out page tables from a bump region.
pub struct PageMapper {
    next_table: u64,
}

impl PageMapper {
    /// Tables are carved from pages starting at `first_free`, which must be page aligned.
    pub fn new(first_free: u64) -> Self {
        Self {
            next_table: first_free,
        }
    }

    /// Maps the page containing `vaddr` to the frame at `frame` with `perms` at every level.
    pub fn map(&mut self, mmu: &mut Mmu, vaddr: u64, frame: u64, perms: Permissions) {
        let va = hlsim_core::common::VirtAddr::new(vaddr);
        let mut table = mmu.page_table_base();
        for level in 0..5 {
            let entry_addr = PhysAddr::new(table + va.level_index(level) * 8);
            if level == 4 {
                let leaf = PageDirectoryEntry::new(frame, perms, false);
                mmu.write_physical_64(entry_addr, leaf.raw()).expect("leaf write");
                return;
            }
            let existing = PageDirectoryEntry(mmu.read_physical_64(entry_addr).expect("pde read"));
            table = if existing.is_valid() {
                existing.next()
            } else {
                let fresh = self.next_table;
                self.next_table += PAGE_SIZE;
                let pde = PageDirectoryEntry::new(fresh, perms, false);
                mmu.write_physical_64(entry_addr, pde.raw()).expect("pde write");
                fresh
            };
        }
    }
}
