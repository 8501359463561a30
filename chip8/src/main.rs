use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use chip8_core::Chip8;

mod cli;
mod keymap;
mod run;

/// Wrong command line.
const EXIT_USAGE: u8 = 1;
/// The program image couldn't be read or doesn't fit in memory.
const EXIT_LOAD: u8 = 2;
/// SDL failed or the machine hit a fatal error.
const EXIT_RUNTIME: u8 = 1;

fn main() -> ExitCode {
    env_logger::init();

    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if let Err(io) = err.print() {
                log::error!("unable to write usage: {}", io);
            }
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    // Load ROM
    let rom = match std::fs::read(&args.rom) {
        Ok(rom) => rom,
        Err(e) => {
            log::error!("unable to read {}: {}", args.rom.display(), e);
            return ExitCode::from(EXIT_LOAD);
        }
    };
    let mut chip8 = Chip8::with_config(args.config());
    if let Err(e) = chip8.load_rom(&rom) {
        log::error!("unable to load {}: {}", args.rom.display(), e);
        return ExitCode::from(EXIT_LOAD);
    }
    log::info!("loaded {} ({} bytes)", args.rom.display(), rom.len());

    match run::run(chip8, args.cycle_time()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}
