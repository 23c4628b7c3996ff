use super::block::{BlockType, CATALOG};

/// The fixed block catalog plus the index the catalog UI has selected.
#[derive(Debug, Clone)]
pub struct BlockPalette {
    types: &'static [BlockType],
    selected: usize,
}

impl BlockPalette {
    pub fn types(&self) -> &'static [BlockType] {
        self.types
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_type(&self) -> &'static BlockType {
        &self.types[self.selected]
    }

    /// Changes the type stamped on the next placement. Existing blocks are not affected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.types.len() {
            log::warn!(
                "Ignoring selection of block type {index}, catalog has {} entries",
                self.types.len()
            );
            return false;
        }
        self.selected = index;
        log::debug!("Selected block type {}", self.types[index].name);
        true
    }
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self {
            types: CATALOG,
            selected: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_first_entry() {
        let palette = BlockPalette::default();
        assert_eq!(palette.selected(), 0);
        assert_eq!(palette.selected_type().name, "Cheddar");
    }

    #[test]
    fn out_of_range_selection_keeps_the_current_entry() {
        let mut palette = BlockPalette::default();
        assert!(palette.select(4));
        assert!(!palette.select(CATALOG.len()));
        assert_eq!(palette.selected(), 4);
        assert_eq!(palette.selected_type().name, "Gouda");
    }

    #[test]
    fn lists_the_whole_catalog_in_order() {
        let palette = BlockPalette::default();
        let names: Vec<_> = palette.types().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            ["Cheddar", "Parmesan", "Mozzarella", "Blue Cheese", "Gouda", "Swiss"]
        );
    }
}
