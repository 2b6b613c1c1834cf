pub mod asset;
pub mod audio;
pub mod health;
pub mod score;
pub mod sprite;
