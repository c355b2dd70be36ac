// Module exports for models

pub mod block;
pub mod settings;
pub mod table;
pub mod targeting;
