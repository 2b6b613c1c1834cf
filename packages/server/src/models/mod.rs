pub mod asset;
pub mod score;
pub mod shared;
