mod engine;
mod error;
mod types;

pub use engine::{Engine, Report, sort_by_play_time};
pub use error::{CoreError, CoreErrorCode};
pub use types::{
    InputPaths, OutputTarget, PlayerRecord, ReportConfig, TICKS_PER_DAY, TICKS_PER_HOUR,
    TICKS_PER_MINUTE, TICKS_PER_SECOND, TimeFormat,
};
