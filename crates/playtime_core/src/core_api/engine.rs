use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::player_file::{read_play_time_ticks, uuid_from_file_name};
use crate::usercache::Usercache;
use crate::validation::validate_inputs;

use super::error::{CoreError, CoreErrorCode};
use super::types::{InputPaths, PlayerRecord, ReportConfig, TimeFormat};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// Players sorted by play time, longest first, with the settings used to compute them.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    format: TimeFormat,
    server_age: Option<u32>,
    players: Vec<PlayerRecord>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, inputs: &InputPaths) -> Result<ReportConfig, CoreError> {
        validate_inputs(inputs)
    }

    /// Loads the usercache and rejects it unless every entry produced a lookup.
    pub fn load_usercache(&self, config: &ReportConfig) -> Result<Usercache, CoreError> {
        log::debug!("preparing usercache {}", config.usercache().display());
        let usercache = Usercache::load(config.usercache())?;
        usercache.ensure_complete()?;
        log::debug!("usercache prepared with {} players", usercache.len());
        Ok(usercache)
    }

    pub fn scan_players(
        &self,
        config: &ReportConfig,
        usercache: &Usercache,
    ) -> Result<Vec<PlayerRecord>, CoreError> {
        let dir = config.players_dir();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)
            .map_err(|e| CoreError::from_io(&e, "failed to list players directory", dir))?
        {
            let entry =
                entry.map_err(|e| CoreError::from_io(&e, "failed to list players directory", dir))?;
            let path = entry.path();
            if !path.is_file() {
                log::warn!("skipping {}: not a file", path.display());
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            let record = self.scan_player_file(path, config, usercache)?;
            log::debug!("{}: {:?}", path.display(), record);
            records.push(record);
        }
        Ok(records)
    }

    fn scan_player_file(
        &self,
        path: &Path,
        config: &ReportConfig,
        usercache: &Usercache,
    ) -> Result<PlayerRecord, CoreError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::Io,
                    format!("player file name is not valid UTF-8: {}", path.display()),
                )
            })?;
        let uuid = uuid_from_file_name(file_name);

        let text = fs::read_to_string(path)
            .map_err(|e| CoreError::from_io(&e, "failed to read player file", path))?;
        let ticks = read_play_time_ticks(&text).map_err(|e| {
            CoreError::new(e.code, format!("player {uuid} file: {}", e.message))
        })?;
        let name = usercache.resolve(uuid)?;

        Ok(PlayerRecord::new(
            uuid,
            name,
            ticks,
            config.format(),
            config.server_age(),
        ))
    }

    /// Runs the whole pipeline after validation: usercache, scan, sort.
    pub fn build_report(&self, config: &ReportConfig) -> Result<Report, CoreError> {
        let usercache = self.load_usercache(config)?;
        let records = self.scan_players(config, &usercache)?;
        Ok(Report::new(config.format(), config.server_age(), records))
    }
}

impl Report {
    pub fn new(
        format: TimeFormat,
        server_age: Option<u32>,
        mut players: Vec<PlayerRecord>,
    ) -> Self {
        sort_by_play_time(&mut players);
        Self {
            format,
            server_age,
            players,
        }
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn server_age(&self) -> Option<u32> {
        self.server_age
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn unique_players(&self) -> usize {
        self.players.len()
    }
}

/// Stable sort, longest play time first.
pub fn sort_by_play_time(players: &mut [PlayerRecord]) {
    players.sort_by(compare_play_time_desc);
}

fn compare_play_time_desc(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.play_time.total_cmp(&a.play_time)
}
