mod error;
mod id_generator;
mod store;

pub use error::{ScheduleError, ScheduleResult};
pub use id_generator::{SequentialIdGenerator, TableIdGenerator};
pub use store::ScheduleStore;
