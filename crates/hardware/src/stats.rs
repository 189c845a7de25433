//! Execution statistics collection and reporting.
//!
//! This module tracks what the machine did while running. It provides:
//! 1. **Cycles:** Total cycles, retired instructions and the split by addressing mode.
//! 2. **Interrupts:** Interrupts raised, dispatched and dropped on overflow.
//! 3. **Memory:** Faults reported by the MMU on fetch and data access.

use std::time::Instant;

/// Execution statistics of one `System`.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total cycles elapsed (one per `step`).
    pub cycles: u64,
    /// Instructions that completed without raising an interrupt.
    pub instructions_retired: u64,

    /// Cycles that began in user mode.
    pub cycles_user: u64,
    /// Cycles that began in kernel mode.
    pub cycles_kernel: u64,

    /// Interrupts handed to the interrupt controller.
    pub interrupts_raised: u64,
    /// Interrupts delivered to a handler.
    pub interrupts_dispatched: u64,
    /// Interrupts dropped because the queue was full.
    pub interrupts_overflowed: u64,

    /// Memory errors raised by instruction fetch.
    pub fetch_faults: u64,
    /// Memory errors raised by loads, stores and stack operations.
    pub data_faults: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            cycles_user: 0,
            cycles_kernel: 0,
            interrupts_raised: 0,
            interrupts_dispatched: 0,
            interrupts_overflowed: 0,
            fetch_faults: 0,
            data_faults: 0,
        }
    }
}

impl SimStats {
    /// Prints the statistics to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        println!("\n==========================================================");
        println!("HALLEY EMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {khz:.2} kHz");
        println!("sim_insts                {}", self.instructions_retired);
        println!("----------------------------------------------------------");
        println!("MODES");
        println!(
            "  cycles.user            {} ({:.2}%)",
            self.cycles_user,
            (self.cycles_user as f64 / cyc) * 100.0
        );
        println!(
            "  cycles.kernel          {} ({:.2}%)",
            self.cycles_kernel,
            (self.cycles_kernel as f64 / cyc) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("INTERRUPTS");
        println!("  int.raised             {}", self.interrupts_raised);
        println!("  int.dispatched         {}", self.interrupts_dispatched);
        println!("  int.overflowed         {}", self.interrupts_overflowed);
        println!("----------------------------------------------------------");
        println!("MEMORY");
        println!("  faults.fetch           {}", self.fetch_faults);
        println!("  faults.data            {}", self.data_faults);
        println!("==========================================================");
    }
}
