pub mod cost;
pub mod random;
