//! Peels the `?key=value&...` options off the end of a locator.

use std::borrow::Cow;
use std::time::Duration;

use tracing::warn;

use crate::config::ParserConfig;

const REF_KEY: &str = "ref";
const VERSION_KEY: &str = "version";
const SUBMODULES_KEY: &str = "submodules";
const TIMEOUT_KEY: &str = "timeout";

/// A locator with its query string removed and the recognised options read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeeledQuery<'a> {
    pub path: &'a str,
    pub git_ref: String,
    pub timeout: Duration,
    pub submodules: bool,
}

/// Split `input` at its first `?` and read `ref`, `version`, `submodules` and
/// `timeout`. Missing, empty or malformed values fall back to the defaults in
/// `config`; `ref` wins over `version`.
pub fn peel_query<'a>(input: &'a str, config: &ParserConfig) -> PeeledQuery<'a> {
    let (path, query) = match input.split_once('?') {
        Some((path, query)) => (path, query),
        None => (input, ""),
    };
    let pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> =
        url::form_urlencoded::parse(query.as_bytes()).collect();
    let get = |key| query_value(&pairs, key);

    let git_ref = match get(REF_KEY) {
        "" => get(VERSION_KEY),
        r => r,
    }
    .to_string();

    let timeout = match get(TIMEOUT_KEY) {
        "" => config.default_timeout,
        value => parse_timeout(value).unwrap_or_else(|| {
            warn!(value, "ignoring invalid timeout, using default");
            config.default_timeout
        }),
    };

    let submodules = match get(SUBMODULES_KEY) {
        "" => config.default_submodules,
        value => parse_bool(value).unwrap_or_else(|| {
            warn!(value, "ignoring invalid submodules flag, using default");
            config.default_submodules
        }),
    };

    PeeledQuery {
        path,
        git_ref,
        timeout,
        submodules,
    }
}

/// First value for `key`, or `""`.
fn query_value<'q>(pairs: &'q [(Cow<'_, str>, Cow<'_, str>)], key: &str) -> &'q str {
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == key)
        .map_or("", |(_, v)| v.as_ref())
}

/// A positive integer is a number of seconds; anything else must be a positive
/// duration such as `90s` or `1m30s`.
pub fn parse_timeout(value: &str) -> Option<Duration> {
    if let Ok(secs) = value.parse::<i64>() {
        return u64::try_from(secs)
            .ok()
            .filter(|&s| s > 0)
            .map(Duration::from_secs);
    }
    parse_duration(value).filter(|d| !d.is_zero())
}

/// Parse a duration written as a sequence of `<number><unit>` terms, e.g.
/// `1h15m`, `1.5s`, `300ms`. Negative durations are rejected.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let mut s = value.strip_prefix('+').unwrap_or(value);
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total_nanos = 0f64;
    while !s.is_empty() {
        let number_len = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let number = &s[..number_len];
        if !number.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: f64 = number.parse().ok()?;
        s = &s[number_len..];

        let unit_len = s
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(s.len());
        let unit_nanos = match &s[..unit_len] {
            "ns" => 1e0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        s = &s[unit_len..];
        total_nanos += number * unit_nanos;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(total_nanos.round() as u64))
}

/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their false counterparts.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
