pub mod break_block;
pub mod setblock;
pub mod stop;
