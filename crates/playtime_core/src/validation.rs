use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::de::IgnoredAny;

use crate::core_api::{CoreError, CoreErrorCode, InputPaths, OutputTarget, ReportConfig};

/// Checks every input before any player file is read, in the order players
/// directory, output file, usercache, server age. May create the output file
/// as an empty placeholder.
pub fn validate_inputs(inputs: &InputPaths) -> Result<ReportConfig, CoreError> {
    check_players_dir(&inputs.players_dir)?;
    log::debug!("players directory ok: {}", inputs.players_dir.display());

    if let OutputTarget::File(path) = &inputs.output {
        prepare_output_file(path)?;
        log::debug!("output file ok: {}", path.display());
    }

    check_usercache_file(&inputs.usercache)?;
    log::debug!("usercache file ok: {}", inputs.usercache.display());

    if inputs.server_age == Some(0) {
        return Err(CoreError::new(
            CoreErrorCode::InvalidArgument,
            "server age must be at least one day",
        ));
    }

    Ok(ReportConfig {
        players_dir: inputs.players_dir.clone(),
        output: inputs.output.clone(),
        usercache: inputs.usercache.clone(),
        format: inputs.format,
        server_age: inputs.server_age,
    })
}

pub fn check_players_dir(path: &Path) -> Result<(), CoreError> {
    let meta = fs::metadata(path)
        .map_err(|e| CoreError::from_io(&e, "players directory is not accessible:", path))?;
    if !meta.is_dir() {
        return Err(CoreError::new(
            CoreErrorCode::WrongType,
            format!("players directory {} is not a directory", path.display()),
        ));
    }

    let mut entries = fs::read_dir(path)
        .map_err(|e| CoreError::from_io(&e, "failed to list players directory", path))?;
    if entries.next().is_none() {
        return Err(CoreError::new(
            CoreErrorCode::Empty,
            format!("players directory {} is empty", path.display()),
        ));
    }
    Ok(())
}

/// Creates the output file when absent; an existing file must be an empty regular file.
pub fn prepare_output_file(path: &Path) -> Result<(), CoreError> {
    if !path.exists() {
        log::info!(
            "output file {} does not exist, creating it",
            path.display()
        );
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| CoreError::from_io(&e, "failed to create output file", path))?;
        return Ok(());
    }

    let meta = fs::metadata(path)
        .map_err(|e| CoreError::from_io(&e, "output file is not accessible:", path))?;
    if !meta.is_file() {
        return Err(CoreError::new(
            CoreErrorCode::WrongType,
            format!("output file {} is not a file", path.display()),
        ));
    }
    if meta.len() > 0 {
        return Err(CoreError::new(
            CoreErrorCode::NotEmpty,
            format!("output file {} is not empty", path.display()),
        ));
    }
    Ok(())
}

pub fn check_usercache_file(path: &Path) -> Result<(), CoreError> {
    let meta = fs::metadata(path)
        .map_err(|e| CoreError::from_io(&e, "usercache file is not accessible:", path))?;
    if !meta.is_file() {
        return Err(CoreError::new(
            CoreErrorCode::WrongType,
            format!("usercache file {} is not a file", path.display()),
        ));
    }
    if meta.len() == 0 {
        return Err(CoreError::new(
            CoreErrorCode::Empty,
            format!("usercache file {} is empty", path.display()),
        ));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| CoreError::from_io(&e, "failed to read usercache file", path))?;
    serde_json::from_str::<IgnoredAny>(&text).map_err(|e| {
        CoreError::new(
            CoreErrorCode::MalformedJson,
            format!("usercache file {} is not valid json: {e}", path.display()),
        )
    })?;
    Ok(())
}
