use std::collections::BTreeMap;

use glam::{ivec3, IVec3};

use self::block::{Block, BlockType};

pub mod block;
pub mod palette;

/// Every placed block, keyed by grid coordinate so a coordinate holds at most one block.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    blocks: BTreeMap<(i32, i32, i32), Block>,
    dirty: bool,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// A flat square of blocks at `y = 0` covering `x, z` in `-radius..=radius`.
    pub fn platform(radius: i32, block_type: &BlockType) -> Self {
        let mut grid = Self::new();
        for x in -radius..=radius {
            for z in -radius..=radius {
                grid.add(ivec3(x, 0, z), block_type);
            }
        }
        grid
    }

    /// Places a block stamped with `block_type`. Returns `false` and leaves the grid untouched if
    /// the coordinate is already occupied.
    pub fn add(&mut self, position: IVec3, block_type: &BlockType) -> bool {
        let slot = key(position);
        if self.blocks.contains_key(&slot) {
            log::warn!("Refusing to place {} at occupied {position}", block_type.name);
            return false;
        }
        self.blocks.insert(slot, Block::new(position, block_type));
        self.dirty = true;
        true
    }

    /// Removes whatever occupies `position` and returns how many blocks went away.
    pub fn remove(&mut self, position: IVec3) -> usize {
        match self.blocks.remove(&key(position)) {
            Some(_) => {
                self.dirty = true;
                1
            }
            None => 0,
        }
    }

    pub fn get(&self, position: IVec3) -> Option<&Block> {
        self.blocks.get(&key(position))
    }

    pub fn contains(&self, position: IVec3) -> bool {
        self.blocks.contains_key(&key(position))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.values()
    }

    /// Whether the grid changed since the renderer last uploaded it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

fn key(position: IVec3) -> (i32, i32, i32) {
    (position.x, position.y, position.z)
}

#[cfg(test)]
mod tests {
    use super::{block::CATALOG, *};

    #[test]
    fn platform_covers_an_eleven_by_eleven_square() {
        let grid = Grid::platform(5, &CATALOG[0]);
        assert_eq!(grid.len(), 121);
        assert!(grid.contains(ivec3(-5, 0, -5)));
        assert!(grid.contains(ivec3(5, 0, 5)));
        assert!(!grid.contains(ivec3(6, 0, 0)));
        assert!(grid.iter().all(|b| b.position.y == 0));
    }

    #[test]
    fn occupied_coordinates_refuse_a_second_block() {
        let mut grid = Grid::new();
        assert!(grid.add(ivec3(1, 1, 1), &CATALOG[0]));
        assert!(!grid.add(ivec3(1, 1, 1), &CATALOG[2]));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(ivec3(1, 1, 1)).unwrap().type_name, "Cheddar");
    }

    #[test]
    fn removing_an_empty_coordinate_changes_nothing() {
        let mut grid = Grid::platform(1, &CATALOG[0]);
        grid.mark_clean();
        assert_eq!(grid.remove(ivec3(0, 1, 0)), 0);
        assert_eq!(grid.len(), 9);
        assert!(!grid.is_dirty());
    }

    #[test]
    fn removing_a_block_shrinks_the_grid_by_one() {
        let mut grid = Grid::platform(1, &CATALOG[0]);
        grid.mark_clean();
        assert_eq!(grid.remove(ivec3(0, 0, 0)), 1);
        assert_eq!(grid.len(), 8);
        assert!(grid.get(ivec3(0, 0, 0)).is_none());
        assert!(grid.is_dirty());
    }

    #[test]
    fn uniqueness_holds_across_mixed_edits() {
        let mut grid = Grid::new();
        let positions = [
            ivec3(0, 0, 0),
            ivec3(1, 0, 0),
            ivec3(0, 0, 0),
            ivec3(-1, 2, 3),
            ivec3(1, 0, 0),
        ];
        for (i, &p) in positions.iter().enumerate() {
            grid.add(p, &CATALOG[i % CATALOG.len()]);
            if i == 3 {
                grid.remove(ivec3(1, 0, 0));
            }
        }

        let mut seen: Vec<_> = grid.iter().map(|b| b.position.to_array()).collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(total, 3);
    }
}
