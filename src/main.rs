//! Poly Arena entry point
//!
//! Native: runs a seeded, scripted session and prints the final polygon set
//! as JSON. Usage: `poly-arena [settings.json] [seed]`.
//! The browser build is driven through `poly_arena::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod session {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use poly_arena::consts::*;
    use poly_arena::sim::{Arena, StepInput, step};
    use poly_arena::{ArenaError, Settings};

    /// Spawn attempts per session
    const SPAWN_ATTEMPTS: usize = 12;
    /// Frames spent driving each new polygon out of the spawn
    const DRIVE_FRAMES: usize = 144;
    /// Largest side count the session picks (keeps shapes recognizable)
    const SESSION_MAX_SIDES: u32 = 12;

    /// Run a seeded polygon arena session and print the final polygons as JSON
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Path to a JSON settings file (defaults apply when omitted)
        pub settings: Option<PathBuf>,

        /// Seed for the scripted session
        #[arg(default_value_t = 42)]
        pub seed: u64,
    }

    pub fn run(args: Args) -> Result<(), ArenaError> {
        let settings = match &args.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        let seed = args.seed;
        log::info!(
            "Session seed {} using {} collisions",
            seed,
            settings.algorithm.as_str()
        );

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut arena = Arena::new(settings);
        let max_sides = arena.settings.max_sides.min(SESSION_MAX_SIDES).max(arena.settings.min_sides);

        for attempt in 0..SPAWN_ATTEMPTS {
            let sides = rng.random_range(arena.settings.min_sides..=max_sides);
            let pushable = rng.random_bool(0.5);

            if !arena.try_insert(sides, pushable)? {
                // Let the rejection blink play out before the next attempt
                for _ in 0..(REFERENCE_FPS as usize) {
                    step(&mut arena, &StepInput::default(), SIM_DT);
                }
                continue;
            }

            // Pick a heading, then drive away from the spawn point
            let turn = if rng.random_bool(0.5) {
                StepInput {
                    turn_right: true,
                    ..Default::default()
                }
            } else {
                StepInput {
                    turn_left: true,
                    ..Default::default()
                }
            };
            for _ in 0..rng.random_range(0..DRIVE_FRAMES) {
                step(&mut arena, &turn, SIM_DT);
            }

            let drive = StepInput {
                forward: true,
                ..Default::default()
            };
            let mut undone = 0;
            for _ in 0..DRIVE_FRAMES {
                if step(&mut arena, &drive, SIM_DT).is_some_and(|r| r.is_rolled_back()) {
                    undone += 1;
                }
            }
            log::info!(
                "Attempt {}: drove {}-gon out of spawn ({} steps undone)",
                attempt,
                sides,
                undone
            );
        }

        let overlaps = arena.overlapping_pairs();
        if overlaps.is_empty() {
            log::info!("Session finished with {} polygons, no overlaps", arena.len());
        } else {
            log::warn!("Session finished with overlapping pairs: {:?}", overlaps);
        }

        println!("{}", serde_json::to_string_pretty(&arena.polygons)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Poly Arena (native) starting...");

    let args = session::Args::parse();
    if let Err(e) = session::run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
