use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const TICKS_PER_SECOND: u64 = 20;
pub const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: u64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    #[default]
    Full,
    Days,
    Hours,
    Minutes,
    Seconds,
    Average,
}

impl TimeFormat {
    /// Ticks per reported unit. `Full` and `Average` work in seconds.
    pub fn divisor(&self) -> u64 {
        match *self {
            Self::Days => TICKS_PER_DAY,
            Self::Hours => TICKS_PER_HOUR,
            Self::Minutes => TICKS_PER_MINUTE,
            Self::Seconds | Self::Average | Self::Full => TICKS_PER_SECOND,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Full => "full",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Average => "average",
        }
    }

    pub fn convert(&self, ticks: u64) -> f64 {
        ticks as f64 / self.divisor() as f64
    }

    /// Whether values are rendered as a composite days/hours/minutes/seconds string.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Full | Self::Average)
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// Unvalidated inputs as supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub players_dir: PathBuf,
    pub output: OutputTarget,
    pub usercache: PathBuf,
    pub format: TimeFormat,
    pub server_age: Option<u32>,
}

/// Inputs that passed validation. Built only by `validate_inputs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub(crate) players_dir: PathBuf,
    pub(crate) output: OutputTarget,
    pub(crate) usercache: PathBuf,
    pub(crate) format: TimeFormat,
    pub(crate) server_age: Option<u32>,
}

impl ReportConfig {
    pub fn players_dir(&self) -> &Path {
        &self.players_dir
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn usercache(&self) -> &Path {
        &self.usercache
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn server_age(&self) -> Option<u32> {
        self.server_age
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub uuid: String,
    pub name: String,
    pub ticks: u64,
    pub play_time: f64,
    pub play_time_average: Option<f64>,
}

impl PlayerRecord {
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        ticks: u64,
        format: TimeFormat,
        server_age: Option<u32>,
    ) -> Self {
        let play_time = format.convert(ticks);
        Self {
            uuid: uuid.into(),
            name: name.into(),
            ticks,
            play_time,
            play_time_average: server_age.map(|days| play_time / f64::from(days)),
        }
    }
}
