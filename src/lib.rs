pub mod input;
pub mod metadata;
pub mod models;
pub mod output;
pub mod unpack;

pub use models::*;
