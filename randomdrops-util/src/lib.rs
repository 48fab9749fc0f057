pub mod math;
pub mod permission;
pub mod text;

pub use permission::PermissionLvl;
