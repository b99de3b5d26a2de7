pub mod describe;
pub mod origin;
