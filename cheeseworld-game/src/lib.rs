use glam::{IVec3, Vec2};

use crate::{
    input::InputState,
    interaction::{Intent, PickTarget},
    player::Player,
    settings::Settings,
    world::{palette::BlockPalette, Grid},
};

pub mod bounding_box;
pub mod clock;
pub mod control_scheme;
pub mod input;
pub mod interaction;
pub mod player;
pub mod settings;
pub mod world;

const MAX_DELTA_TIME: f32 = 0.03;

/// One room's world: the block grid, the palette the catalog UI drives, and the walking camera.
/// Each piece of state has exactly one writer, and everything runs on the frame thread.
pub struct Game {
    pub player: Player,
    pub grid: Grid,
    pub palette: BlockPalette,
    pub input: InputState,
    settings: Settings,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let palette = BlockPalette::default();
        let grid = Grid::platform(settings.platform_radius, palette.selected_type());
        log::info!("Starting room with {} blocks", grid.len());

        Self {
            player: Player::new(settings.spawn),
            grid,
            palette,
            input: InputState::new(settings.joystick_radius),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advances the walking camera by one frame. The step is scaled by `delta_time` so the walking
    /// speed does not depend on the frame rate.
    pub fn update(&mut self, delta_time: f32) {
        let delta_time = delta_time.min(MAX_DELTA_TIME);
        let step = self.settings.walk_speed * delta_time;

        self.player
            .walk(self.input.held(), step, self.settings.floor_height);
    }

    /// Turns the camera by a pointer delta in pixels.
    pub fn look(&mut self, delta: Vec2) {
        self.player.look(delta, self.settings.mouse_sensitivity);
    }

    /// Handles a click the renderer resolved against the scene, returning the intent it carried
    /// out, if any.
    pub fn pick(&mut self, target: PickTarget) -> Option<Intent> {
        let intent = interaction::resolve(target, &self.grid)?;
        self.apply(intent);
        Some(intent)
    }

    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Place(position) => self.place_block(position),
            Intent::Remove(position) => self.remove_block(position) > 0,
        }
    }

    /// Places a block of the currently selected type.
    pub fn place_block(&mut self, position: IVec3) -> bool {
        let block_type = self.palette.selected_type();
        let placed = self.grid.add(position, block_type);
        if placed {
            log::debug!("Placed {} at {position}", block_type.name);
        }
        placed
    }

    pub fn remove_block(&mut self, position: IVec3) -> usize {
        let removed = self.grid.remove(position);
        if removed > 0 {
            log::debug!("Removed block at {position}");
        }
        removed
    }

    /// Called when the room is left or input focus goes away.
    pub fn release_input(&mut self) {
        self.input.reset();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use glam::{ivec3, vec3};

    use super::*;
    use crate::{
        clock::{tests::ManualClock, FrameTicker},
        input::Direction,
    };

    #[test]
    fn long_frames_are_capped() {
        let mut game = Game::default();
        let start = game.player.position;
        game.input.press(Direction::Forward);
        game.update(10.0);

        let distance = (game.player.position - start).length();
        assert!((distance - 6.0 * MAX_DELTA_TIME).abs() < 1e-5);
    }

    #[test]
    fn step_scales_with_frame_time() {
        let clock = ManualClock::default();
        let mut ticker = FrameTicker::new(clock.clone());
        let mut game = Game::default();
        game.input.press(Direction::Backward);

        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
            game.update(ticker.tick());
        }

        assert!((game.player.position - vec3(0.0, 2.0, 11.0)).length() < 1e-3);
    }

    #[test]
    fn placement_stamps_the_selected_type() {
        let mut game = Game::default();
        assert!(game.palette.select(3));
        assert!(game.place_block(ivec3(0, 1, 0)));

        let block = game.grid.get(ivec3(0, 1, 0)).unwrap();
        assert_eq!(block.type_name, "Blue Cheese");
        assert_eq!(game.grid.get(ivec3(0, 0, 0)).unwrap().type_name, "Cheddar");
    }

    #[test]
    fn release_input_stops_walking() {
        let mut game = Game::default();
        game.input.press(Direction::Right);
        game.release_input();
        let start = game.player.position;
        game.update(0.016);
        assert_eq!(game.player.position, start);
    }
}
