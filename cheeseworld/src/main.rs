use std::{env, fs};

use anyhow::Context;
use winit::{event_loop::EventLoop, window::WindowBuilder};

use cheeseworld_game::{control_scheme::ControlScheme, settings::Settings};
use cheeseworld_renderer::State;

const SETTINGS_VAR: &str = "CHEESEWORLD_SETTINGS";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("CheeseWorld")
        .build(&event_loop)?;

    let mut state = pollster::block_on(State::new(
        &window,
        wgpu::Backends::all(),
        Clock,
        settings,
        ControlScheme::Desktop,
    ))?;

    state.run(event_loop)?;
    Ok(())
}

fn load_settings() -> anyhow::Result<Settings> {
    let Some(path) = env::var_os(SETTINGS_VAR) else {
        log::info!("{SETTINGS_VAR} not set, using default settings");
        return Ok(Settings::default());
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Couldn't read settings from {}", path.to_string_lossy()))?;
    let settings = Settings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.to_string_lossy()))?;
    log::info!("Loaded settings from {}", path.to_string_lossy());
    Ok(settings)
}

struct Clock;

impl cheeseworld_game::clock::Clock for Clock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn seconds_elapsed(&self, start: Self::Instant, end: Self::Instant) -> f32 {
        let duration = end.duration_since(start);
        duration.as_secs_f32()
    }
}
