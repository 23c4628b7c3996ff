//! End-to-end runs of a room without a renderer: picks and key presses go in, the grid and the
//! camera come out.

use glam::{ivec3, vec2, vec3, Vec2};

use cheeseworld_game::{
    input::Direction,
    interaction::{Intent, PickTarget},
    settings::Settings,
    world::block::CATALOG,
    Game,
};

#[test]
fn starting_room_is_a_cheddar_platform() {
    let game = Game::default();
    assert_eq!(game.grid.len(), 121);
    assert!(game.grid.iter().all(|b| b.type_name == "Cheddar"));
    for x in -5..=5 {
        for z in -5..=5 {
            assert!(game.grid.contains(ivec3(x, 0, z)));
        }
    }
}

#[test]
fn placing_then_clicking_a_block_round_trips_the_grid() {
    let mut game = Game::default();

    assert!(game.apply(Intent::Place(ivec3(6, 0, 0))));
    assert_eq!(game.grid.len(), 122);

    let intent = game.pick(PickTarget::Block(ivec3(6, 0, 0)));
    assert_eq!(intent, Some(Intent::Remove(ivec3(6, 0, 0))));
    assert_eq!(game.grid.len(), 121);
    assert!(!game.grid.contains(ivec3(6, 0, 0)));
}

#[test]
fn placing_on_an_occupied_coordinate_is_refused() {
    let mut game = Game::default();
    game.palette.select(2);
    assert!(!game.place_block(ivec3(0, 0, 0)));
    assert_eq!(game.grid.len(), 121);
    assert_eq!(game.grid.get(ivec3(0, 0, 0)).unwrap().type_name, "Cheddar");
}

#[test]
fn ground_clicks_leave_the_world_alone() {
    let mut game = Game::default();
    assert_eq!(game.pick(PickTarget::Ground(vec3(30.0, -0.5, 30.0))), None);
    assert_eq!(game.grid.len(), 121);
}

#[test]
fn changing_the_selection_only_affects_new_blocks() {
    let mut game = Game::default();
    game.place_block(ivec3(0, 1, 0));
    game.palette.select(CATALOG.len() - 1);
    game.place_block(ivec3(0, 2, 0));

    assert_eq!(game.grid.get(ivec3(0, 1, 0)).unwrap().color, CATALOG[0].color);
    assert_eq!(
        game.grid.get(ivec3(0, 2, 0)).unwrap().color,
        CATALOG[CATALOG.len() - 1].color
    );
}

#[test]
fn walking_follows_the_head_yaw() {
    let mut game = Game::new(Settings {
        spawn: vec3(0.0, 2.0, 0.0),
        ..Settings::default()
    });
    // Turn 90 degrees to the right, towards +x.
    game.look(vec2(900.0, 0.0));
    game.input.press(Direction::Forward);
    game.update(0.02);

    let position = game.player.position;
    assert!((position.x - 0.12).abs() < 1e-4, "{position}");
    assert!(position.z.abs() < 1e-4, "{position}");
    assert_eq!(position.y, 2.0);
}

#[test]
fn looking_down_and_backing_up_never_goes_through_the_floor() {
    let mut game = Game::default();
    game.look(vec2(0.0, 900.0));
    game.input.press(Direction::Backward);
    for _ in 0..100 {
        game.update(0.016);
        assert!(game.player.position.y >= game.settings().floor_height);
    }
    assert!(game.player.position.z > 5.0);
}

#[test]
fn joystick_is_published_but_does_not_walk() {
    let mut game = Game::default();
    let start = game.player.position;

    game.input.joystick_mut().engage();
    let v = game.input.joystick_mut().drag(vec2(0.0, -80.0));
    assert_eq!(v, vec2(0.0, -1.0));
    game.update(0.016);

    assert_eq!(game.input.joystick().vector(), vec2(0.0, -1.0));
    assert_eq!(game.player.position, start);

    game.input.joystick_mut().release();
    assert_eq!(game.input.joystick().vector(), Vec2::ZERO);
}

#[test]
fn jump_intent_is_tracked_without_leaving_the_floor() {
    let mut game = Game::default();
    game.input.set_jump(true);
    game.update(0.016);
    assert!(game.input.jump());
    assert_eq!(game.player.position.y, 2.0);
}
