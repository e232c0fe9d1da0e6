// src/utils.rs

use chrono::{DateTime, Months, Utc};
use eyre::{eyre, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([smhdw])$").expect("duration pattern compiles"));

/// Parse a string like "14d" or "90m" into a number of seconds.
/// Supported units: s, m, h, d, w. A bare number is rejected.
pub fn parse_duration_secs(s: &str) -> Result<i64> {
    let s = s.trim();
    let caps = DURATION_RE
        .captures(s)
        .ok_or_else(|| eyre!("Unsupported duration format '{}'; expected '<n><s|m|h|d|w>'", s))?;
    let n: i64 = caps[1]
        .parse()
        .map_err(|e| eyre!("Invalid duration '{}': {}", s, e))?;
    let unit = match &caps[2] {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        other => return Err(eyre!("Unknown duration unit '{}'", other)),
    };
    n.checked_mul(unit)
        .ok_or_else(|| eyre!("Duration '{}' overflows", s))
}

/// Whole-second epoch timestamp; sub-second precision is discarded.
pub fn to_epoch_seconds(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Calendar month after `time`, clamped to the end of a shorter month.
pub fn add_one_month(time: DateTime<Utc>) -> DateTime<Utc> {
    time.checked_add_months(Months::new(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Reduce `value` to only the given dot-paths.
///
/// Arrays are traversed element-wise, so `sources.data.customer` keeps the
/// `customer` field of every source. A path that runs into `null` keeps the
/// `null`; a path whose key is missing, or that descends into a scalar, is
/// dropped.
pub fn trim(value: &Value, paths: &[String]) -> Value {
    let split: Vec<Vec<&str>> = paths.iter().map(|p| p.split('.').collect()).collect();
    let refs: Vec<&[&str]> = split.iter().map(Vec::as_slice).collect();
    trim_value(value, &refs).unwrap_or_else(|| Value::Object(Map::new()))
}

fn trim_value(value: &Value, paths: &[&[&str]]) -> Option<Value> {
    if paths.iter().any(|p| p.is_empty()) {
        return Some(value.clone());
    }
    match value {
        Value::Object(map) => {
            // group tails by head, keeping first-seen order
            let mut groups: Vec<(&str, Vec<&[&str]>)> = Vec::new();
            for path in paths {
                let (head, tail) = (path[0], &path[1..]);
                match groups.iter_mut().find(|(h, _)| *h == head) {
                    Some((_, tails)) => tails.push(tail),
                    None => groups.push((head, vec![tail])),
                }
            }
            let mut out = Map::new();
            for (head, tails) in groups {
                if let Some(child) = map.get(head) {
                    if let Some(trimmed) = trim_value(child, &tails) {
                        out.insert(head.to_string(), trimmed);
                    }
                }
            }
            Some(Value::Object(out))
        }
        Value::Array(items) => Some(Value::Array(
            items.iter().filter_map(|item| trim_value(item, paths)).collect(),
        )),
        Value::Null => Some(Value::Null),
        _ => None,
    }
}
