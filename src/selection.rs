// Which garment is showing in each category, and which category a click cycles.
// Only the input handlers write this; the render step reads it once per tick.

use crate::types::Category;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySelection {
    active: Category,
    indices: [usize; Category::COUNT],
}

impl CategorySelection {
    pub fn new(active: Category) -> Self {
        Self { active, indices: [0; Category::COUNT] }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn set_active(&mut self, category: Category) {
        self.active = category;
    }

    pub fn index(&self, category: Category) -> usize {
        self.indices[category.slot()]
    }

    /// Step to the next garment, wrapping at `count`. Nothing happens for an empty list.
    pub fn advance(&mut self, category: Category, count: usize) {
        if count == 0 { return; }
        let i = &mut self.indices[category.slot()];
        *i = (*i + 1) % count;
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::new(Category::Torso)
    }
}
