pub mod engine;
pub mod signals;

pub use engine::SprinklerEngine;
