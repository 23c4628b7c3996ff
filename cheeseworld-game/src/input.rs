use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    const fn bit(self) -> u8 {
        match self {
            Direction::Forward => 1 << 0,
            Direction::Backward => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }
}

/// The set of movement directions currently held down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directions(u8);

impl Directions {
    pub const NONE: Self = Self(0);

    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    pub const fn without(self, direction: Direction) -> Self {
        Self(self.0 & !direction.bit())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The desired walk direction in player space: `-z` forward, `+x` right. Opposing directions
    /// cancel, and the result is either zero or unit length.
    pub fn local_vector(self) -> Vec3 {
        let mut v = Vec3::ZERO;
        if self.contains(Direction::Forward) {
            v.z -= 1.0;
        }
        if self.contains(Direction::Backward) {
            v.z += 1.0;
        }
        if self.contains(Direction::Left) {
            v.x -= 1.0;
        }
        if self.contains(Direction::Right) {
            v.x += 1.0;
        }
        v.normalize_or_zero()
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// On-screen touch stick. Drag deltas are measured in pixels from the stick's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joystick {
    radius: f32,
    vector: Vec2,
    engaged: bool,
}

impl Joystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(f32::EPSILON),
            vector: Vec2::ZERO,
            engaged: false,
        }
    }

    pub fn engage(&mut self) {
        self.engaged = true;
    }

    /// Moves the knob. The delta is clamped to the stick radius, so the reported vector never
    /// leaves the unit disk. Ignored unless the stick has been engaged.
    pub fn drag(&mut self, delta: Vec2) -> Vec2 {
        if self.engaged {
            self.vector = delta.clamp_length_max(self.radius) / self.radius;
        }
        self.vector
    }

    pub fn release(&mut self) {
        self.engaged = false;
        self.vector = Vec2::ZERO;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Knob offset in pixels, for drawing the stick.
    pub fn knob_offset(&self) -> Vec2 {
        self.vector * self.radius
    }
}

/// Held input that event handlers write and the frame step reads.
#[derive(Debug, Clone)]
pub struct InputState {
    held: Directions,
    jump: bool,
    joystick: Joystick,
}

impl InputState {
    pub fn new(joystick_radius: f32) -> Self {
        Self {
            held: Directions::NONE,
            jump: false,
            joystick: Joystick::new(joystick_radius),
        }
    }

    pub fn press(&mut self, direction: Direction) {
        self.held = self.held.with(direction);
    }

    /// Releasing one direction leaves every other held direction in place.
    pub fn release(&mut self, direction: Direction) {
        self.held = self.held.without(direction);
    }

    pub fn held(&self) -> Directions {
        self.held
    }

    pub fn set_jump(&mut self, jump: bool) {
        self.jump = jump;
    }

    pub fn jump(&self) -> bool {
        self.jump
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn joystick_mut(&mut self) -> &mut Joystick {
        &mut self.joystick
    }

    /// Drops all held state. Called whenever the input sources are torn down (focus lost,
    /// pointer lock released) so no key stays latched without its release event.
    pub fn reset(&mut self) {
        self.held = Directions::NONE;
        self.jump = false;
        self.joystick.release();
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    fn local_vector_of(directions: &[Direction]) -> Vec3 {
        directions.iter().copied().collect::<Directions>().local_vector()
    }

    const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    #[test]
    fn every_flag_combination_stays_inside_the_unit_ball() {
        for mask in 0..16u8 {
            let directions: Directions = ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &d)| d)
                .collect();
            let v = directions.local_vector();
            assert!(v.length() <= 1.0 + 1e-6, "mask {mask:04b} gave {v}");
            assert_eq!(v.y, 0.0);
        }
    }

    #[test]
    fn no_flags_and_opposing_flags_cancel_to_zero() {
        assert_eq!(Directions::NONE.local_vector(), Vec3::ZERO);
        assert_eq!(
            local_vector_of(&[Direction::Forward, Direction::Backward]).z,
            0.0
        );
        assert_eq!(local_vector_of(&ALL), Vec3::ZERO);
    }

    #[test]
    fn forward_points_down_negative_z() {
        assert_eq!(local_vector_of(&[Direction::Forward]), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn diagonals_are_normalized() {
        let v = local_vector_of(&[Direction::Forward, Direction::Right]);
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn releasing_one_key_keeps_the_others_held() {
        let mut input = InputState::new(50.0);
        input.press(Direction::Forward);
        input.press(Direction::Left);
        input.release(Direction::Forward);
        assert!(!input.held().contains(Direction::Forward));
        assert!(input.held().contains(Direction::Left));
    }

    #[test]
    fn holding_a_key_is_not_edge_triggered() {
        let mut input = InputState::new(50.0);
        input.press(Direction::Right);
        input.press(Direction::Right);
        assert_eq!(input.held(), Directions::NONE.with(Direction::Right));
    }

    #[test]
    fn joystick_output_never_leaves_the_unit_disk() {
        let mut stick = Joystick::new(50.0);
        stick.engage();
        for delta in [
            Vec2::new(10.0, 0.0),
            Vec2::new(300.0, -400.0),
            Vec2::new(-35.0, 35.0),
            Vec2::new(0.0, -50.0),
        ] {
            let v = stick.drag(delta);
            assert!(v.length() <= 1.0 + 1e-6, "{delta} gave {v}");
        }
        assert_eq!(stick.drag(Vec2::new(25.0, 0.0)), Vec2::new(0.5, 0.0));
        assert!((stick.drag(Vec2::new(300.0, -400.0)) - Vec2::new(0.6, -0.8)).length() < 1e-6);
    }

    #[test]
    fn releasing_the_joystick_snaps_to_center() {
        let mut stick = Joystick::new(50.0);
        stick.engage();
        stick.drag(Vec2::new(20.0, 20.0));
        stick.release();
        assert_eq!(stick.vector(), Vec2::ZERO);
        assert!(!stick.is_engaged());
        assert_eq!(stick.drag(Vec2::new(20.0, 20.0)), Vec2::ZERO);
    }

    #[test]
    fn reset_clears_every_source() {
        let mut input = InputState::new(50.0);
        input.press(Direction::Backward);
        input.set_jump(true);
        input.joystick_mut().engage();
        input.joystick_mut().drag(Vec2::new(0.0, 40.0));

        input.reset();

        assert!(input.held().is_empty());
        assert!(!input.jump());
        assert_eq!(input.joystick().vector(), Vec2::ZERO);
    }
}
