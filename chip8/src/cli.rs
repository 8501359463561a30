use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use chip8_core::{Config, KeyWait};

/// Run a Chip-8 program in an SDL2 window.
#[derive(Parser, Debug)]
#[command(name = "chip8", version)]
pub struct Args {
    /// Path to the program image
    pub rom: PathBuf,

    /// Seed the random number generator so runs are repeatable
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Make FX0A re-execute until a key is held instead of falling through
    #[arg(long)]
    pub block_on_key: bool,

    /// Wall-clock time budget of a single cycle
    #[arg(long, value_name = "MICROS", default_value_t = 1600)]
    pub cycle_micros: u64,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            key_wait: if self.block_on_key {
                KeyWait::Block
            } else {
                KeyWait::FallThrough
            },
            seed: self.seed,
            ..Config::default()
        }
    }

    pub fn cycle_time(&self) -> Duration {
        Duration::from_micros(self.cycle_micros)
    }
}
