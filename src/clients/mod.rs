pub mod model;
pub mod openrouter;
