use cheeseworld_game::player::Player;
use glam::{vec2, vec3, Mat4, Vec2, Vec3};
use winit::dpi::PhysicalSize;

pub struct Camera {
    eye: Vec3,
    dir: Vec3,
    up: Vec3,
    pub aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            dir: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy: 75.0,
            znear: 0.1,
            zfar: 200.0,
        }
    }

    /// The camera sits exactly at the player position; the floor clamp keeps it at eye height.
    pub fn update(&mut self, player: &Player) {
        self.eye = player.position;
        self.dir = player.looking_direction();
        self.up = player.up_direction();
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn direction(&self) -> Vec3 {
        self.dir
    }

    /// Direction of the ray leaving the eye through a window pixel.
    pub fn ray_through(&self, point: Vec2, size: PhysicalSize<u32>) -> Vec3 {
        let size = vec2(size.width.max(1) as f32, size.height.max(1) as f32);
        let ndc = vec2(2.0 * point.x / size.x - 1.0, 1.0 - 2.0 * point.y / size.y);

        let inverse = self.build_view_projection_matrix().inverse();
        let near = inverse.project_point3(vec3(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(vec3(ndc.x, ndc.y, 1.0));
        (far - near).normalize_or_zero()
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_to_rh(self.eye, self.dir, self.up);
        let proj = Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);

        proj * view
    }
}

#[cfg(test)]
mod tests {
    use cheeseworld_game::player::Player;

    use super::*;

    #[test]
    fn the_window_centre_looks_straight_ahead() {
        let mut camera = Camera::new(4.0 / 3.0);
        let mut player = Player::new(vec3(0.0, 2.0, 5.0));
        player.look(vec2(300.0, 100.0), 0.1);
        camera.update(&player);

        let ray = camera.ray_through(vec2(400.0, 300.0), PhysicalSize::new(800, 600));
        assert!((ray - player.looking_direction()).length() < 1e-3, "{ray}");
    }

    #[test]
    fn the_left_edge_looks_left() {
        let mut camera = Camera::new(1.0);
        camera.update(&Player::new(vec3(0.0, 2.0, 5.0)));

        let ray = camera.ray_through(vec2(0.0, 250.0), PhysicalSize::new(500, 500));
        assert!(ray.x < -0.5 && ray.z < 0.0, "{ray}");
    }
}
