pub mod entity;
pub mod errors;
pub mod gate;
pub mod payload;
pub mod rendering;
