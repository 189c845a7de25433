//! Halley emulator CLI.
//!
//! This binary is the host harness around `hlsim-core`. It performs:
//! 1. **Run:** Loads a raw image into physical memory and executes it until `int 255`,
//!    `int 254`, a double fault, or an optional cycle limit.
//! 2. **Disassemble:** Prints every instruction word of an image.
//!
//! Exit status: 0 on success, 1 on program failure, double fault or cycle limit,
//! 2 on a host error (unreadable image or config, allocation failure).

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hlsim_core::common::SystemError;
use hlsim_core::config::Config;
use hlsim_core::isa::disasm::disassemble;
use hlsim_core::sim::loader;
use hlsim_core::sim::{RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "hlsim",
    author,
    version,
    about = "Halley 64-bit register machine emulator",
    long_about = "Run or disassemble raw Halley images.\n\nExamples:\n  hlsim run program.bin\n  hlsim run program.bin --config machine.json --max-cycles 100000\n  hlsim disasm program.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a raw image and execute it.
    Run {
        /// Raw little-endian image.
        image: PathBuf,

        /// JSON machine configuration; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Physical load address; defaults to the configured start IP.
        #[arg(short, long, value_parser = parse_addr)]
        base: Option<u64>,

        /// Emit a trace event for every executed instruction.
        #[arg(long)]
        trace: bool,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print execution statistics on exit.
        #[arg(long)]
        stats: bool,
    },

    /// Disassemble a raw image.
    Disasm {
        /// Raw little-endian image.
        image: PathBuf,

        /// Address of the first word, used for the listing.
        #[arg(short, long, value_parser = parse_addr, default_value = "0")]
        base: u64,
    },
}

/// Parses a decimal or `0x`-prefixed hexadecimal address.
fn parse_addr(text: &str) -> Result<u64, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid address '{text}': {e}"))
}

fn init_logging(trace: bool) {
    let default = if trace { "hlsim_core=trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            image,
            config,
            base,
            trace,
            max_cycles,
            stats,
        } => {
            init_logging(trace);
            cmd_run(&image, config.as_deref(), base, trace, max_cycles, stats)
        }
        Commands::Disasm { image, base } => {
            init_logging(false);
            cmd_disasm(&image, base)
        }
    };

    result.unwrap_or_else(|err| {
        tracing::error!("{err}");
        let mut source = err.source();
        while let Some(cause) = source {
            tracing::error!("  caused by: {cause}");
            source = cause.source();
        }
        ExitCode::from(2)
    })
}

fn load_config(path: Option<&Path>) -> Result<Config, SystemError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| SystemError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Config::from_json(&text)
}

/// Runs an image to completion and maps the outcome to a process exit code.
fn cmd_run(
    image: &Path,
    config_path: Option<&Path>,
    base: Option<u64>,
    trace: bool,
    max_cycles: Option<u64>,
    stats: bool,
) -> Result<ExitCode, SystemError> {
    let mut config = load_config(config_path)?;
    config.general.trace_instructions |= trace;
    let base = base.unwrap_or(config.general.start_ip);

    let bytes = loader::load_file(image)?;
    let mut sim = Simulator::new(&config, max_cycles)?;
    sim.load(base, &bytes)?;
    tracing::info!(
        image = %image.display(),
        base = format_args!("{base:#x}"),
        len = bytes.len(),
        memory = sim.system.mmu().memory_limit(),
        "image loaded"
    );

    let outcome = sim.run();
    if stats {
        sim.system.cpu.stats.print();
    }

    let code = match outcome {
        RunOutcome::Exited(status) if status.is_success() => ExitCode::SUCCESS,
        RunOutcome::Exited(status) => {
            tracing::error!(%status, ip = format_args!("{:#x}", sim.system.cpu.regs.ip()), "program did not succeed");
            sim.system.cpu.regs.dump();
            ExitCode::from(1)
        }
        RunOutcome::CycleLimit => {
            sim.system.cpu.regs.dump();
            ExitCode::from(1)
        }
    };
    Ok(code)
}

/// Prints one line per instruction word; a trailing partial word is reported.
fn cmd_disasm(image: &Path, base: u64) -> Result<ExitCode, SystemError> {
    let bytes = loader::load_file(image)?;
    let chunks = bytes.chunks_exact(4);
    let tail = chunks.remainder().len();
    for (i, chunk) in chunks.enumerate() {
        let raw = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let addr = base.wrapping_add(i as u64 * 4);
        println!("{addr:#010x}:  {raw:08x}  {}", disassemble(raw));
    }
    if tail != 0 {
        tracing::warn!(bytes = tail, "image length is not a multiple of 4; trailing bytes ignored");
    }
    Ok(ExitCode::SUCCESS)
}
