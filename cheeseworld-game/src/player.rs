use glam::{vec2, vec3, Vec2, Vec3};

use crate::input::Directions;

/// Just short of straight up or down, where the horizontal facing would be lost.
const MAX_PITCH: f32 = 89.9;

/// The first-person camera body. `head_angle` is `(pitch, yaw)` in degrees; yaw 0 faces `-z`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub head_angle: Vec2,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn looking_direction(&self) -> Vec3 {
        let pitch = self.head_angle.x.to_radians();
        let yaw = self.head_angle.y.to_radians();
        vec3(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    pub fn up_direction(&self) -> Vec3 {
        let pitch = self.head_angle.x.to_radians();
        let yaw = self.head_angle.y.to_radians();
        vec3(
            yaw.sin() * -pitch.sin(),
            pitch.cos(),
            -yaw.cos() * -pitch.sin(),
        )
    }

    /// Turns the head by a pointer delta in pixels. Moving right turns right, moving down looks
    /// down.
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        self.head_angle += sensitivity * vec2(-delta.y, delta.x);
        self.constrain_head_angle();
    }

    /// Advances one frame of walking: `step` is the distance covered this frame at full input.
    pub fn walk(&mut self, held: Directions, step: f32, floor: f32) {
        let displacement = walk_displacement(self.looking_direction(), held.local_vector(), step);
        self.position = clamp_to_floor(self.position + displacement, floor);
    }

    fn constrain_head_angle(&mut self) {
        self.head_angle.x = self.head_angle.x.clamp(-MAX_PITCH, MAX_PITCH);

        self.head_angle.y %= 360.0;
        if self.head_angle.y > 180.0 {
            self.head_angle.y -= 360.0;
        } else if self.head_angle.y <= -180.0 {
            self.head_angle.y += 360.0;
        }
    }
}

/// World-space displacement for a local walk direction (`-z` forward, `+x` right) relative to
/// `facing`. Only the horizontal part of `facing` counts, so pitching the head never changes the
/// walking speed.
pub fn walk_displacement(facing: Vec3, local: Vec3, step: f32) -> Vec3 {
    let forward = vec3(facing.x, 0.0, facing.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y);
    forward * (-local.z * step) + right * (local.x * step)
}

/// One-sided clamp: heights below `floor` snap to it, anything at or above is untouched.
pub fn clamp_to_floor(position: Vec3, floor: f32) -> Vec3 {
    if position.y < floor {
        vec3(position.x, floor, position.z)
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn default_facing_is_negative_z() {
        let player = Player::default();
        assert_eq!(player.looking_direction(), vec3(0.0, 0.0, -1.0));
        assert_eq!(player.up_direction(), Vec3::Y);
    }

    #[test]
    fn one_forward_frame_facing_negative_z_moves_exactly_one_step() {
        let step = 0.1;
        let mut player = Player::new(vec3(0.0, 2.0, 0.0));
        player.walk(Directions::NONE.with(Direction::Forward), step, 2.0);
        assert_eq!(player.position, vec3(0.0, 2.0, -step));
        assert_eq!(
            walk_displacement(vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0), step),
            vec3(0.0, 0.0, -step)
        );
    }

    #[test]
    fn strafing_right_follows_the_facing() {
        let facing = vec3(1.0, 0.0, 0.0);
        let d = walk_displacement(facing, vec3(1.0, 0.0, 0.0), 1.0);
        assert!((d - vec3(0.0, 0.0, 1.0)).length() < EPSILON);
    }

    #[test]
    fn pitch_does_not_change_walking_speed() {
        let mut player = Player::default();
        player.look(vec2(0.0, 400.0), 0.1);
        assert!(player.head_angle.x < -30.0);

        let d = walk_displacement(player.looking_direction(), vec3(0.0, 0.0, -1.0), 0.1);
        assert!((d.length() - 0.1).abs() < EPSILON);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn no_input_means_no_motion() {
        let mut player = Player::new(vec3(3.0, 4.0, 5.0));
        player.walk(Directions::NONE, 0.1, 2.0);
        assert_eq!(player.position, vec3(3.0, 4.0, 5.0));
    }

    #[test]
    fn floor_clamp_is_one_sided() {
        assert_eq!(clamp_to_floor(vec3(1.0, -3.0, 2.0), 2.0), vec3(1.0, 2.0, 2.0));
        assert_eq!(clamp_to_floor(vec3(1.0, 1.999, 2.0), 2.0).y, 2.0);
        assert_eq!(clamp_to_floor(vec3(1.0, 2.0, 2.0), 2.0), vec3(1.0, 2.0, 2.0));
        assert_eq!(clamp_to_floor(vec3(1.0, 7.5, 2.0), 2.0), vec3(1.0, 7.5, 2.0));
    }

    #[test]
    fn walking_below_the_floor_snaps_back_up() {
        let mut player = Player::new(vec3(0.0, 0.5, 0.0));
        player.walk(Directions::NONE.with(Direction::Left), 0.1, 2.0);
        assert_eq!(player.position.y, 2.0);
        assert!((player.position.x + 0.1).abs() < EPSILON);
    }

    #[test]
    fn head_angle_is_constrained() {
        let mut player = Player::default();
        player.look(vec2(0.0, -5000.0), 0.1);
        assert_eq!(player.head_angle.x, MAX_PITCH);

        player.look(vec2(2000.0, 0.0), 0.1);
        assert!(player.head_angle.y > -180.0 && player.head_angle.y <= 180.0);
        assert!((player.head_angle.y - (-160.0)).abs() < EPSILON);
    }
}
