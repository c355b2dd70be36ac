// Service module exports

pub mod interaction;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod targeting;
