use std::time::{Duration, Instant};

use sdl2::event::Event;
use thiserror::Error;

use crate::keymap::keymap;
use chip8_core::Chip8;
use chip8_display::Display;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("sdl: {0}")]
    Sdl(String),

    #[error(transparent)]
    Machine(#[from] chip8_core::Error),
}

/// Drives `chip8` until the window is closed or the machine faults.
///
/// # Arguments
/// * `chip8` a machine with a program already loaded
/// * `cycle_time` how long each cycle should take on the wall clock
pub fn run(mut chip8: Chip8, cycle_time: Duration) -> Result<(), RunError> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(RunError::Sdl)?;
    let mut display = Display::new(&sdl, "Chip-8").map_err(RunError::Sdl)?;
    let mut events = sdl.event_pump().map_err(RunError::Sdl)?;

    let mut last_cycle = Instant::now();

    'event: loop {
        // Update state
        chip8.cycle()?;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(RunError::Sdl)?;
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    log::info!("window closed");
    Ok(())
}
