use glam::{vec2, Vec2};
use winit::{dpi::PhysicalSize, keyboard::KeyCode};

use cheeseworld_game::input::Direction;

/// Centre of the joystick base, measured from the bottom-left corner of the window.
const JOYSTICK_ANCHOR: Vec2 = vec2(96.0, 160.0);
/// Radius of the joystick base that accepts new touches.
pub const JOYSTICK_BASE_RADIUS: f32 = 64.0;
/// Touches that travel less than this many pixels count as taps.
const TAP_SLOP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Jump,
    SelectBlock(usize),
}

/// Each direction has a letter binding and an arrow binding. The digit row picks from the
/// catalog.
pub fn key_action(key: KeyCode) -> Option<KeyAction> {
    let action = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => KeyAction::Move(Direction::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => KeyAction::Move(Direction::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => KeyAction::Move(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => KeyAction::Move(Direction::Right),
        KeyCode::Space => KeyAction::Jump,
        KeyCode::Digit1 => KeyAction::SelectBlock(0),
        KeyCode::Digit2 => KeyAction::SelectBlock(1),
        KeyCode::Digit3 => KeyAction::SelectBlock(2),
        KeyCode::Digit4 => KeyAction::SelectBlock(3),
        KeyCode::Digit5 => KeyAction::SelectBlock(4),
        KeyCode::Digit6 => KeyAction::SelectBlock(5),
        _ => return None,
    };
    Some(action)
}

/// Where the on-screen joystick sits for a given window size, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickZone {
    pub center: Vec2,
}

impl JoystickZone {
    pub fn for_window(size: PhysicalSize<u32>) -> Self {
        Self {
            center: vec2(JOYSTICK_ANCHOR.x, size.height as f32 - JOYSTICK_ANCHOR.y),
        }
    }

    pub fn accepts(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= JOYSTICK_BASE_RADIUS * JOYSTICK_BASE_RADIUS
    }

    pub fn delta(&self, point: Vec2) -> Vec2 {
        point - self.center
    }
}

/// What a left click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Grab,
    Pick,
}

/// Whether the cursor is captured for mouse look.
#[derive(Debug, Default)]
pub struct PointerLock {
    grabbed: bool,
}

impl PointerLock {
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn click(&self) -> Click {
        if self.grabbed {
            Click::Pick
        } else {
            Click::Grab
        }
    }

    pub fn grab(&mut self) {
        self.grabbed = true;
    }

    /// Escape, focus loss and a refused grab all end up here.
    pub fn release(&mut self) {
        self.grabbed = false;
    }

    /// Raw mouse motion turns the head only while the cursor is captured.
    pub fn look_delta(&self, (delta_x, delta_y): (f64, f64)) -> Option<Vec2> {
        self.grabbed.then(|| vec2(delta_x as f32, delta_y as f32))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchAction {
    /// The stick was touched or dragged. The delta is measured from the base centre.
    Joystick(Vec2),
    JoystickReleased,
    /// Head turn in pixels.
    Look(Vec2),
    /// A tap at this window point.
    Pick(Vec2),
}

#[derive(Debug, Clone, Copy)]
struct LookTouch {
    id: u64,
    last: Vec2,
    travelled: f32,
}

/// Assigns touches to the joystick or to swipe-look. Each role is owned by one finger at a time;
/// extra fingers are ignored until the owner lifts.
#[derive(Debug)]
pub struct TouchRouter {
    uses_joystick: bool,
    joystick: Option<u64>,
    look: Option<LookTouch>,
}

impl TouchRouter {
    pub fn new(uses_joystick: bool) -> Self {
        Self {
            uses_joystick,
            joystick: None,
            look: None,
        }
    }

    pub fn started(&mut self, id: u64, point: Vec2, zone: JoystickZone) -> Option<TouchAction> {
        if self.uses_joystick && self.joystick.is_none() && zone.accepts(point) {
            self.joystick = Some(id);
            return Some(TouchAction::Joystick(zone.delta(point)));
        }

        if self.look.is_none() {
            self.look = Some(LookTouch {
                id,
                last: point,
                travelled: 0.0,
            });
        }
        None
    }

    pub fn moved(&mut self, id: u64, point: Vec2, zone: JoystickZone) -> Option<TouchAction> {
        if self.joystick == Some(id) {
            return Some(TouchAction::Joystick(zone.delta(point)));
        }

        let touch = self.look.as_mut().filter(|t| t.id == id)?;
        let delta = point - touch.last;
        touch.last = point;
        touch.travelled += delta.length();
        // Swiping drags the world, so the head turns against the finger.
        Some(TouchAction::Look(-delta))
    }

    /// `completed` is false for cancelled touches, which never count as taps.
    pub fn ended(&mut self, id: u64, point: Vec2, completed: bool) -> Option<TouchAction> {
        if self.joystick == Some(id) {
            self.joystick = None;
            return Some(TouchAction::JoystickReleased);
        }

        if !self.look.is_some_and(|t| t.id == id) {
            return None;
        }
        let touch = self.look.take()?;
        (completed && touch.travelled < TAP_SLOP).then_some(TouchAction::Pick(point))
    }

    pub fn reset(&mut self) {
        self.joystick = None;
        self.look = None;
    }
}
