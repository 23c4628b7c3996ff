use glam::{IVec3, Vec3};

const EPSILON: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// The unit cube of the block at `block`. Blocks are centred on their grid coordinate.
    pub fn of_block(block: IVec3) -> Self {
        let center = block.as_vec3();
        Self {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    /// Distance along the ray at which it enters the box, or `None` if it misses. A ray starting
    /// inside the box reports a negative distance.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let (t_x_min, t_x_max) = intersect_axis(origin.x, direction.x, self.min.x, self.max.x);
        let (t_y_min, t_y_max) = intersect_axis(origin.y, direction.y, self.min.y, self.max.y);
        let (t_z_min, t_z_max) = intersect_axis(origin.z, direction.z, self.min.z, self.max.z);

        let t_min = t_x_min.max(t_y_min).max(t_z_min);
        let t_max = t_x_max.min(t_y_max).min(t_z_max);

        if t_min <= t_max && t_max >= 0.0 {
            Some(t_min)
        } else {
            None
        }
    }
}

fn intersect_axis(origin: f32, direction: f32, min: f32, max: f32) -> (f32, f32) {
    if direction.abs() < EPSILON {
        if origin >= min && origin <= max {
            return (f32::NEG_INFINITY, f32::INFINITY);
        }
        return (f32::INFINITY, f32::NEG_INFINITY);
    }

    let t0 = (min - origin) / direction;
    let t1 = (max - origin) / direction;

    if direction < 0.0 {
        (t1, t0)
    } else {
        (t0, t1)
    }
}
