use randomdrops_data::Item;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item_count: u8,
    pub item: Item,
}

impl ItemStack {
    #[must_use]
    pub const fn new(item_count: u8, item: Item) -> Self {
        Self { item_count, item }
    }
}
