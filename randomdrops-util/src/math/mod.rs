pub mod position;
pub mod vector3;
