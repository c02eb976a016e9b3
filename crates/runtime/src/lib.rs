mod config;
pub mod logging;

pub use config::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS, PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRAM_WORKERS,
    workers_from_env,
};

pub use logging::{init, init_with_level};
