use std::fmt::Write as _;

use playtime_core::core_api::{PlayerRecord, Report, TimeFormat};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * 60;
const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * 24;

/// Renders whole seconds as `"{d} days {h} hours {m} minutes {s} seconds"`.
///
/// Zero-valued days, hours and minutes are dropped; seconds are always
/// present. The input is rounded to the nearest second (ties to even) before
/// it is split, so the seconds field never reads 60.
pub fn format_composite_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round_ties_even() as u64;
    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    let mut out = String::new();
    if days > 0 {
        write!(&mut out, "{days} days ").expect("writing to String cannot fail");
    }
    if hours > 0 {
        write!(&mut out, "{hours} hours ").expect("writing to String cannot fail");
    }
    if minutes > 0 {
        write!(&mut out, "{minutes} minutes ").expect("writing to String cannot fail");
    }
    write!(&mut out, "{secs} seconds").expect("writing to String cannot fail");
    out
}

/// A converted value in `format`'s unit: composite for `full`/`average`,
/// otherwise two decimals and the unit name.
pub fn format_play_time(value: f64, format: TimeFormat) -> String {
    if format.is_composite() {
        format_composite_duration(value)
    } else {
        format!("{value:.2} {format}")
    }
}

pub fn render_player_block(record: &PlayerRecord, format: TimeFormat) -> String {
    let mut out = String::new();
    writeln!(&mut out, "PLAYER: {}", record.name).expect("writing to String cannot fail");

    if format != TimeFormat::Average {
        writeln!(
            &mut out,
            "PLAY_TIME: {}",
            format_play_time(record.play_time, format)
        )
        .expect("writing to String cannot fail");
    }
    if let Some(average) = record.play_time_average {
        writeln!(
            &mut out,
            "PLAY_TIME_AVERAGE: {}",
            format_play_time(average, format)
        )
        .expect("writing to String cannot fail");
    }

    out.push('\n');
    out
}

pub fn render_header(report: &Report) -> String {
    let mut out = String::new();
    match report.server_age() {
        Some(days) => {
            writeln!(&mut out, "SERVER AGE: {days} days").expect("writing to String cannot fail");
        }
        None => out.push_str("SERVER AGE: unknown\n"),
    }
    writeln!(
        &mut out,
        "UNIQUE PLAYERS COUNT: {}",
        report.unique_players()
    )
    .expect("writing to String cannot fail");
    out.push('\n');
    out
}

pub fn render_report(report: &Report) -> String {
    let mut out = render_header(report);
    for record in report.players() {
        out.push_str(&render_player_block(record, report.format()));
    }
    out
}

pub fn render_debug_summary(record: &PlayerRecord, format: TimeFormat) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("uuid".to_string(), JsonValue::String(record.uuid.clone()));
    out.insert("name".to_string(), JsonValue::String(record.name.clone()));
    out.insert("ticks".to_string(), JsonValue::from(record.ticks));
    out.insert("play_time".to_string(), JsonValue::from(record.play_time));
    out.insert(
        "play_time_average".to_string(),
        match record.play_time_average {
            Some(v) => JsonValue::from(v),
            None => JsonValue::Null,
        },
    );
    out.insert(
        "output".to_string(),
        JsonValue::String(render_player_block(record, format)),
    );
    JsonValue::Object(out)
}
