use serde::Deserialize;

use crate::core_api::{CoreError, CoreErrorCode};

pub const PLAYER_FILE_EXTENSION: &str = ".json";
pub const PLAY_TIME_KEY: &str = "minecraft:play_time";
/// Name of the play time counter before Minecraft 1.17. Still counted in ticks.
pub const LEGACY_PLAY_TIME_KEY: &str = "minecraft:play_one_minute";

#[derive(Debug, Deserialize)]
struct PlayerStatsFile {
    stats: Option<StatsSection>,
}

#[derive(Debug, Deserialize)]
struct StatsSection {
    #[serde(rename = "minecraft:custom")]
    custom: Option<CustomStats>,
}

#[derive(Debug, Deserialize)]
struct CustomStats {
    #[serde(rename = "minecraft:play_time")]
    play_time: Option<u64>,
    #[serde(rename = "minecraft:play_one_minute")]
    play_one_minute: Option<u64>,
}

/// Player UUID for a stats file name, i.e. the name without its `.json` suffix.
pub fn uuid_from_file_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(PLAYER_FILE_EXTENSION)
        .unwrap_or(file_name)
}

/// Extracts the play time counter, in ticks, from a player stats document.
pub fn read_play_time_ticks(text: &str) -> Result<u64, CoreError> {
    let file: PlayerStatsFile = serde_json::from_str(text)?;

    let stats = file.stats.ok_or_else(|| missing_field("stats"))?;
    let custom = stats
        .custom
        .ok_or_else(|| missing_field("stats[\"minecraft:custom\"]"))?;

    custom
        .play_time
        .or(custom.play_one_minute)
        .ok_or_else(|| missing_field(&format!("stats[\"minecraft:custom\"][\"{PLAY_TIME_KEY}\"]")))
}

fn missing_field(path: &str) -> CoreError {
    CoreError::new(CoreErrorCode::MissingField, format!("missing {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_suffix() {
        assert_eq!(
            uuid_from_file_name("069a79f4-44e9-4726-a5be-fca90e38aaf5.json"),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
        assert_eq!(uuid_from_file_name("no-extension"), "no-extension");
    }

    #[test]
    fn reads_nested_play_time() {
        let text = r#"{
            "stats": {
                "minecraft:custom": {"minecraft:jump": 12, "minecraft:play_time": 72000},
                "minecraft:mined": {"minecraft:stone": 3}
            },
            "DataVersion": 3465
        }"#;
        assert_eq!(read_play_time_ticks(text).unwrap(), 72000);
    }

    #[test]
    fn falls_back_to_legacy_counter() {
        let text = r#"{"stats": {"minecraft:custom": {"minecraft:play_one_minute": 400}}}"#;
        assert_eq!(read_play_time_ticks(text).unwrap(), 400);
    }

    #[test]
    fn prefers_current_counter_over_legacy() {
        let text = r#"{"stats": {"minecraft:custom": {
            "minecraft:play_one_minute": 1,
            "minecraft:play_time": 2
        }}}"#;
        assert_eq!(read_play_time_ticks(text).unwrap(), 2);
    }

    #[test]
    fn missing_sections_are_reported_by_path() {
        let err = read_play_time_ticks(r#"{"DataVersion": 1}"#).unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MissingField);
        assert_eq!(err.message, "missing stats");

        let err = read_play_time_ticks(r#"{"stats": {}}"#).unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MissingField);

        let err =
            read_play_time_ticks(r#"{"stats": {"minecraft:custom": {"minecraft:jump": 1}}}"#)
                .unwrap_err();
        assert!(err.message.contains(PLAY_TIME_KEY));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = read_play_time_ticks("{\"stats\": ").unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MalformedJson);
    }
}
