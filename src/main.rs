//! Super Cline Brothers entry point
//!
//! Headless shell: feeds a scripted key timeline through the input sampler,
//! runs the simulation at the fixed tick rate, forwards the music cue and
//! prints a JSON report of the final frame.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    use super_cline_bros::FrameSnapshot;
    use super_cline_bros::Settings;
    use super_cline_bros::audio::AudioManager;
    use super_cline_bros::platform::{FixedStep, InputSampler, Key};
    use super_cline_bros::sim::{GameEvent, GameState, tick};
    use super_cline_bros::snapshot::Sprite;

    /// One key transition in a scripted run
    #[derive(Debug, Clone, Copy, Deserialize)]
    pub struct ScriptEvent {
        pub frame: u64,
        pub key: Key,
        #[serde(default = "pressed_default")]
        pub pressed: bool,
    }

    fn pressed_default() -> bool {
        true
    }

    #[derive(Debug, Parser)]
    #[command(name = "super-cline-bros")]
    #[command(about = "Run a platformer session headlessly and print the final frame")]
    pub struct Args {
        /// Settings JSON file (defaults are used when missing or invalid)
        #[arg(long, value_name = "FILE")]
        pub settings: Option<PathBuf>,
        /// Key script: JSON list of {frame, key, pressed}
        #[arg(long, value_name = "FILE")]
        pub script: Option<PathBuf>,
        /// Number of ticks to run (default: 20 seconds)
        #[arg(long, value_name = "N")]
        pub frames: Option<u64>,
        /// Pace ticks against the wall clock
        #[arg(long)]
        pub realtime: bool,
    }

    /// Final output of a run
    #[derive(Debug, Serialize)]
    pub struct RunReport {
        pub frames: u64,
        /// Whether the mixer ended up looping the track
        pub audio_playing: bool,
        pub snapshot: FrameSnapshot,
        /// Screen-space sprites, empty on the title and result screens
        pub on_screen: Vec<Sprite>,
    }

    pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let mut events: Vec<ScriptEvent> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        events.sort_by_key(|e| e.frame);
        Ok(events)
    }

    /// Start the game and run right
    pub fn demo_script() -> Vec<ScriptEvent> {
        vec![
            ScriptEvent {
                frame: 0,
                key: Key::A,
                pressed: true,
            },
            ScriptEvent {
                frame: 1,
                key: Key::A,
                pressed: false,
            },
            ScriptEvent {
                frame: 2,
                key: Key::Right,
                pressed: true,
            },
        ]
    }

    /// Game instance holding all shell state
    pub struct Game {
        pub state: GameState,
        sampler: InputSampler,
        audio: AudioManager,
        script: VecDeque<ScriptEvent>,
        frame: u64,
    }

    impl Game {
        pub fn new(settings: &Settings, script: Vec<ScriptEvent>) -> Self {
            Self {
                state: GameState::with_screen(settings.stage_layout(), settings.screen()),
                sampler: InputSampler::new(),
                audio: {
                    let mut audio =
                        AudioManager::new(settings.music_path.as_deref(), settings.music_level());
                    audio.set_muted(settings.muted);
                    audio
                },
                script: script.into(),
                frame: 0,
            }
        }

        /// Run one tick. Returns false once quit was requested.
        pub fn step(&mut self) -> bool {
            while let Some(event) = self.script.front().copied() {
                if event.frame > self.frame {
                    break;
                }
                self.script.pop_front();
                if event.pressed {
                    self.sampler.key_down(event.key);
                } else {
                    self.sampler.key_up(event.key);
                }
            }

            let input = self.sampler.sample();
            if input.quit {
                log::info!("Quit requested at frame {}", self.frame);
                return false;
            }

            for event in tick(&mut self.state, &input) {
                match event {
                    GameEvent::PhaseChanged { from, to } => {
                        log::info!("Phase {:?} -> {:?}", from, to)
                    }
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("Life lost ({} left)", lives_left)
                    }
                    GameEvent::StageCleared => log::info!("Stage cleared!"),
                    other => log::debug!("{:?}", other),
                }
            }

            if let Some(command) = self
                .audio
                .set_music_playing(self.state.session.music_playing())
            {
                log::info!("Music: {:?}", command);
            }

            self.frame += 1;
            true
        }

        pub fn report(&self, frames: u64) -> RunReport {
            let snapshot = FrameSnapshot::capture(&self.state);
            let on_screen = if snapshot.shows_world() {
                snapshot.visible_sprites().collect()
            } else {
                Vec::new()
            };
            RunReport {
                frames,
                audio_playing: self.audio.is_playing(),
                snapshot,
                on_screen,
            }
        }
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = Settings::load(args.settings.as_deref());
        let script = match &args.script {
            Some(path) => load_script(path)?,
            None => demo_script(),
        };
        let frames = args.frames.unwrap_or(u64::from(settings.tick_rate) * 20);

        let mut game = Game::new(&settings, script);
        log::info!("Running {} frames at {} Hz", frames, settings.tick_rate);

        let mut done = 0;
        if args.realtime {
            let mut clock = FixedStep::new(settings.tick_duration(), settings.max_substeps);
            log::debug!("Real-time pacing, {:?} per tick", clock.step());
            let mut last = Instant::now();
            'frames: while done < frames {
                let now = Instant::now();
                let ticks = clock.advance(now - last);
                last = now;
                for _ in 0..ticks {
                    if done >= frames || !game.step() {
                        break 'frames;
                    }
                    done += 1;
                }
                std::thread::sleep(clock.until_next());
            }
        } else {
            while done < frames && game.step() {
                done += 1;
            }
        }

        let json = serde_json::to_string_pretty(&game.report(done))
            .context("Failed to encode snapshot")?;
        println!("{json}");
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use super_cline_bros::sim::Phase;

        fn args(list: &[&str]) -> Result<Args, clap::Error> {
            Args::try_parse_from(std::iter::once("super-cline-bros").chain(list.iter().copied()))
        }

        #[test]
        fn test_parse_args() {
            let parsed = args(&["--frames", "120", "--realtime", "--script", "run.json"]).unwrap();
            assert_eq!(parsed.frames, Some(120));
            assert!(parsed.realtime);
            assert_eq!(parsed.script, Some(PathBuf::from("run.json")));
            assert_eq!(parsed.settings, None);

            assert!(args(&["--frames"]).is_err());
            assert!(args(&["--frames", "lots"]).is_err());
            assert!(args(&["--bogus"]).is_err());
        }

        #[test]
        fn test_missing_script_reports_path() {
            let err = load_script(Path::new("/nonexistent/run.json")).unwrap_err();
            assert!(err.to_string().contains("/nonexistent/run.json"));
        }

        #[test]
        fn test_demo_script_starts_and_walks() {
            let mut game = Game::new(&Settings::default(), demo_script());
            for _ in 0..30 {
                assert!(game.step());
            }
            assert_eq!(game.state.session.phase, Phase::Playing);
            assert!(game.state.player.rect().x > 100);

            let report = game.report(30);
            assert!(!report.on_screen.is_empty());
            assert!(!report.audio_playing);
        }

        #[test]
        fn test_report_hides_world_on_title_screen() {
            let game = Game::new(&Settings::default(), Vec::new());
            let report = game.report(0);
            assert!(report.on_screen.is_empty());
            assert_eq!(report.snapshot.sprites.len(), 59 + 4 + 2);
        }

        #[test]
        fn test_muted_setting_reaches_mixer() {
            let settings = Settings {
                muted: true,
                ..Default::default()
            };
            let game = Game::new(&settings, Vec::new());
            assert_eq!(game.audio.effective_volume(), 0.0);
        }

        #[test]
        fn test_escape_stops_the_run() {
            let script = vec![ScriptEvent {
                frame: 3,
                key: Key::Escape,
                pressed: true,
            }];
            let mut game = Game::new(&Settings::default(), script);
            assert!(game.step());
            assert!(game.step());
            assert!(game.step());
            assert!(!game.step());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Super Cline Brothers (headless) starting...");

    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the simulation is used as a library there
}
