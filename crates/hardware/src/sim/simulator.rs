//! Simulator: a `System` plus a run budget.
//!
//! The simulator drives a system until it stops or until an optional cycle
//! budget is spent, which keeps runaway programs from hanging the host.

use crate::common::SystemError;
use crate::config::Config;
use crate::core::arch::ExitStatus;
use crate::sim::loader;
use crate::soc::System;

/// Outcome of a bounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program stopped with the given status.
    Exited(ExitStatus),
    /// The cycle budget ran out first.
    CycleLimit,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The machine being simulated.
    pub system: System,
    /// Maximum number of cycles before `run` gives up; `None` runs forever.
    pub max_cycles: Option<u64>,
}

impl Simulator {
    /// Builds a simulator from configuration.
    ///
    /// # Errors
    ///
    /// Returns any error from [`System::from_config`].
    pub fn new(config: &Config, max_cycles: Option<u64>) -> Result<Self, SystemError> {
        Ok(Self {
            system: System::from_config(config)?,
            max_cycles,
        })
    }

    /// Loads a raw image at `base`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`loader::load_bytes`].
    pub fn load(&mut self, base: u64, image: &[u8]) -> Result<(), SystemError> {
        loader::load_bytes(&mut self.system, base, image)
    }

    /// Advances the system by one cycle.
    pub fn tick(&mut self) -> Option<ExitStatus> {
        self.system.step()
    }

    /// Runs until the program stops or the cycle budget is spent.
    pub fn run(&mut self) -> RunOutcome {
        let mut cycles = 0u64;
        loop {
            if self.max_cycles.is_some_and(|max| cycles >= max) {
                tracing::warn!(cycles, "cycle limit reached");
                return RunOutcome::CycleLimit;
            }
            if let Some(status) = self.tick() {
                return RunOutcome::Exited(status);
            }
            cycles += 1;
        }
    }
}
