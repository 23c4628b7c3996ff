use wasm_bindgen::prelude::*;
use winit::{event_loop::EventLoop, window::WindowBuilder};

use cheeseworld_game::{control_scheme::ControlScheme, settings::Settings};
use cheeseworld_renderer::State;

#[wasm_bindgen(start)]
async fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Couldn't initialize logger");

    if let Err(err) = start().await {
        log::error!("{err:?}");
    }
}

async fn start() -> Result<(), JsValue> {
    let win = web_sys::window().ok_or("No window")?;

    let event_loop = EventLoop::new().map_err(|err| err.to_string())?;
    let window = WindowBuilder::new()
        .build(&event_loop)
        .map_err(|err| err.to_string())?;

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        win.document()
            .and_then(|doc| {
                let canvas = web_sys::Element::from(window.canvas()?);
                doc.body()?.append_child(&canvas).ok()?;
                Some(())
            })
            .ok_or("Couldn't append canvas to document body.")?;
    }

    let user_agent = win.navigator().user_agent().unwrap_or_default();
    let control_scheme = ControlScheme::from_user_agent(&user_agent);

    let clock = Clock {
        performance: win.performance().ok_or("No performance timer")?,
    };

    let mut state = State::new(
        &window,
        wgpu::Backends::GL,
        clock,
        Settings::default(),
        control_scheme,
    )
    .await
    .map_err(|err| format!("{err:#}"))?;

    let w = win.inner_width()?.as_f64().unwrap_or_default() as u32;
    let h = win.inner_height()?.as_f64().unwrap_or_default() as u32;
    state.resize(winit::dpi::PhysicalSize::new(w, h));
    state.manual_size = true;

    state.run(event_loop).map_err(|err| err.to_string())?;
    Ok(())
}

/// Milliseconds from `performance.now()`.
struct Clock {
    performance: web_sys::Performance,
}

impl cheeseworld_game::clock::Clock for Clock {
    type Instant = f64;

    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn seconds_elapsed(&self, start: f64, end: f64) -> f32 {
        ((end - start) / 1000.0) as f32
    }
}
