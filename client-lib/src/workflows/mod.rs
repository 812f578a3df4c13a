pub mod evaluation;
pub mod follow;
pub mod ideas;
