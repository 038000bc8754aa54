pub mod describe;
pub mod docs;
pub mod health;
pub mod index;
