pub mod check;
pub mod duplicate;
pub mod shift;
