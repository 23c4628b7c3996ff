use glam::{IVec3, Vec3};

use crate::world::Grid;

/// What a pointer click landed on, as resolved by the renderer's ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickTarget {
    Block(IVec3),
    Ground(Vec3),
}

/// An edit the world should carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Place(IVec3),
    Remove(IVec3),
}

/// Decides what a click does. Clicking a live block removes it; there is no face-offset placement,
/// and clicks on the ground do nothing.
pub fn resolve(target: PickTarget, grid: &Grid) -> Option<Intent> {
    match target {
        PickTarget::Block(position) if grid.contains(position) => Some(Intent::Remove(position)),
        PickTarget::Block(position) => {
            log::debug!("Pick hit {position}, which no longer holds a block");
            None
        }
        PickTarget::Ground(point) => {
            log::debug!("Ignoring click on the ground at {point}");
            None
        }
    }
}
