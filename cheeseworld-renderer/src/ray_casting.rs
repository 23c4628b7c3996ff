use glam::Vec3;

use cheeseworld_game::{bounding_box::BoundingBox, interaction::PickTarget, world::Grid};

/// Top of the ground slab the platform sits on.
pub const GROUND_HEIGHT: f32 = -0.5;

const EPSILON: f32 = 0.0001;

/// Finds what the player is pointing at: the nearest block along the ray, or the ground plane if
/// that is closer. Anything beyond `reach` is ignored.
pub fn ray_cast(origin: Vec3, direction: Vec3, grid: &Grid, reach: f32) -> Option<PickTarget> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    // Cubes are at most sqrt(3) / 2 from their centre.
    let cull_radius = reach + 1.0;
    let block = grid
        .iter()
        .filter(|b| b.position.as_vec3().distance_squared(origin) <= cull_radius * cull_radius)
        .filter_map(|b| {
            BoundingBox::of_block(b.position)
                .ray_intersection(origin, direction)
                .map(|t| (b.position, t.max(0.0)))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .filter(|&(_, t)| t <= reach);

    let ground = intersect_ground(origin, direction).filter(|&t| t <= reach);

    match (block, ground) {
        (Some((_, t_block)), Some(t_ground)) if t_ground < t_block => {
            Some(PickTarget::Ground(origin + t_ground * direction))
        }
        (Some((position, _)), _) => Some(PickTarget::Block(position)),
        (None, Some(t_ground)) => Some(PickTarget::Ground(origin + t_ground * direction)),
        (None, None) => None,
    }
}

fn intersect_ground(origin: Vec3, direction: Vec3) -> Option<f32> {
    if direction.y > -EPSILON {
        return None;
    }
    let t = (GROUND_HEIGHT - origin.y) / direction.y;
    (t >= 0.0).then_some(t)
}
