pub mod db;
pub mod game;

pub use game::GameConfig;
