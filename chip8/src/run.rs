use std::time::{Duration, Instant};

use anyhow::Context;
use sdl2::event::Event;

use chip8_core::constants::TIMER_HZ;
use chip8_core::Machine;
use chip8_display::Display;

use crate::keymap::keymap;
use crate::Args;

/// Drives the machine with two independent clocks on one thread: `step` at
/// the requested CPU rate and `tick_timers` at a fixed 60 Hz. Each clock has
/// its own deadline, so a program busy-waiting on a keypress still sees its
/// timers count down.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut machine = match args.seed {
        Some(seed) => Machine::with_seed(seed),
        None => Machine::new(),
    };

    let image = std::fs::read(&args.rom)
        .with_context(|| format!("unable to read program image {}", args.rom.display()))?;
    let loaded = machine.load(&image);
    log::info!("loaded {} of {} program bytes", loaded, image.len());

    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let cpu_interval = Duration::from_secs(1) / args.hz;
    let timer_interval = Duration::from_secs(1) / TIMER_HZ;
    let mut cpu_deadline = Instant::now();
    let mut timer_deadline = Instant::now();

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(code) = keymap(key) {
                        machine.set_key(code, true);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(code) = keymap(key) {
                        machine.set_key(code, false);
                    }
                }
                _ => continue,
            }
        }

        let now = Instant::now();
        while cpu_deadline <= now {
            machine.step().context("machine halted on a fatal condition")?;
            cpu_deadline += cpu_interval;
        }
        while timer_deadline <= now {
            if machine.tick_timers() {
                log::info!("tone end");
            }
            timer_deadline += timer_interval;
        }

        if let Some(frame) = machine.take_frame() {
            display.render(&frame).map_err(anyhow::Error::msg)?;
        }

        let next_deadline = cpu_deadline.min(timer_deadline);
        if let Some(idle) = next_deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(idle);
        }
    }

    Ok(())
}
