use std::path::PathBuf;

use clap::Parser;

mod keymap;
mod run;

/// A virtual machine for Chip-8 programs.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to a Chip-8 program image
    pub rom: PathBuf,

    /// CPU clock rate in Hz (the timers always run at 60 Hz)
    #[arg(long, default_value_t = chip8_core::constants::CPU_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// Seed the random number generator for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
