//! Duration and timestamp resolution for command options.
//!
//! Commands that grant temporary permissions or memberships take an
//! expiration option. Players may write it either as a relative duration
//! (`"5d"`, `"2 months"`, `"12 hours"`) or as an absolute ISO 8601 timestamp
//! (`"2026-01-01T00:00"`). This module turns that text into an absolute
//! instant relative to an explicit "now".
//!
//! Everything here is a pure function of its inputs. The caller supplies
//! "now" (typically `Utc::now()`), so results are reproducible in tests.
//!
//! # Grammar
//!
//! - **Relative**: `<digits>[ ]<unit>` where unit is one of `h`, `hour`,
//!   `hours`, `d`, `day`, `days`, `m`, `month`, `months`, `y`, `year`,
//!   `years` (any case). A bare number means days.
//! - **Absolute**: `YYYY-MM-DDThh:mm:ss[.fff][Z|±hh:mm]`. Seconds may be
//!   omitted. Timestamps without an offset are read in
//!   [`ResolveOptions::timezone`].
//!
//! Blank input is not an error: it resolves to [`Resolution::NoValue`] so the
//! caller can tell "not supplied" apart from "invalid".

use std::fmt;
use std::sync::LazyLock;

use chrono::{
    DateTime, Days, Duration, FixedOffset, LocalResult, Months, NaiveDateTime, Offset,
    SubsecRound, TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;
use serde::Serialize;

use crate::error::{PermError, Result};

/// Option name echoed in validation errors.
const FIELD_NAME: &str = "duration/timestamp";

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)[\t\n\x0B\x0C\r ]*(h(?:ours?)?|d(?:ays?)?|m(?:onths?)?|y(?:ears?)?)?$")
        .expect("duration pattern must compile")
});

/// Shape of an accepted timestamp: `T` separator, two-digit fields.
static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?$")
        .expect("timestamp pattern must compile")
});

// ── Options ─────────────────────────────────────────────────────────────────

/// Options for [`resolve_with_options`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Zone used for calendar arithmetic and for timestamps without an offset.
    pub timezone: Tz,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

impl ResolveOptions {
    /// Build options for an IANA timezone name (e.g. `"Europe/Berlin"`).
    ///
    /// # Errors
    ///
    /// Returns [`PermError::InvalidTimezone`] if the name is not a known zone.
    pub fn with_timezone(name: &str) -> Result<Self> {
        let timezone = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| PermError::InvalidTimezone(format!("'{}'", name)))?;
        Ok(Self { timezone })
    }
}

// ── Parsed form ─────────────────────────────────────────────────────────────

/// Calendar unit of a relative duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationUnit {
    Hour,
    Day,
    Month,
    Year,
}

impl DurationUnit {
    /// Classify a unit token by its first letter.
    ///
    /// # Errors
    ///
    /// Returns [`PermError::InvalidUnit`] for anything outside the four
    /// families.
    pub fn classify(token: &str) -> Result<Self> {
        match token.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('h') => Ok(DurationUnit::Hour),
            Some('d') => Ok(DurationUnit::Day),
            Some('m') => Ok(DurationUnit::Month),
            Some('y') => Ok(DurationUnit::Year),
            _ => Err(PermError::InvalidUnit(token.to_string())),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DurationUnit::Hour => "hour",
            DurationUnit::Day => "day",
            DurationUnit::Month => "month",
            DurationUnit::Year => "year",
        };
        f.write_str(name)
    }
}

/// An absolute timestamp as written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Carries its own UTC offset.
    Offset(DateTime<FixedOffset>),
    /// Wall-clock time, interpreted in the resolving timezone.
    Floating(NaiveDateTime),
}

/// A parsed duration/timestamp option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSpec {
    Relative { magnitude: u32, unit: DurationUnit },
    Absolute(Timestamp),
}

impl DurationSpec {
    /// Parse option text without resolving it.
    ///
    /// Returns `Ok(None)` for blank input.
    ///
    /// # Errors
    ///
    /// Returns [`PermError::InvalidValue`] if the magnitude is zero or does
    /// not fit in a `u32`, or if the text is neither a relative duration nor
    /// an ISO 8601 timestamp.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let trimmed = input.trim_ascii();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Some(caps) = DURATION_PATTERN.captures(trimmed) {
            let magnitude: u32 = caps[1].parse().map_err(|_| invalid_value())?;
            if magnitude < 1 {
                return Err(invalid_value());
            }
            let unit = match caps.get(2) {
                Some(token) => DurationUnit::classify(token.as_str())?,
                None => DurationUnit::Day,
            };
            return Ok(Some(DurationSpec::Relative { magnitude, unit }));
        }

        // Uppercase so a lowercase 't' separator (or 'z') is accepted.
        let upper = trimmed.to_ascii_uppercase();
        parse_iso_datetime(&upper)
            .or_else(|| parse_iso_datetime(&format!("{upper}:00")))
            .map(|ts| Some(DurationSpec::Absolute(ts)))
            .ok_or_else(invalid_value)
    }

    /// Resolve against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PermError::InvalidValue`] if the calendar arithmetic leaves
    /// the representable range.
    pub fn resolve(&self, now: DateTime<Utc>, options: &ResolveOptions) -> Result<ResolvedInstant> {
        let tz = &options.timezone;
        let resolved = match *self {
            DurationSpec::Relative { magnitude, unit } => add_calendar(now, magnitude, unit, tz),
            DurationSpec::Absolute(Timestamp::Offset(dt)) => Some(dt.with_timezone(&Utc)),
            DurationSpec::Absolute(Timestamp::Floating(naive)) => localize(tz, naive),
        };
        resolved.map(ResolvedInstant::new).ok_or_else(invalid_value)
    }
}

// ── Results ─────────────────────────────────────────────────────────────────

/// An absolute instant with whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ResolvedInstant(DateTime<Utc>);

impl ResolvedInstant {
    /// Wrap an instant, dropping its sub-second component.
    ///
    /// A leap second (`:60`) rolls over into the following second.
    pub fn new(instant: DateTime<Utc>) -> Self {
        let mut secs = instant.timestamp();
        if instant.timestamp_subsec_nanos() >= 1_000_000_000 {
            secs += 1;
        }
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_else(|| instant.trunc_subsecs(0)))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<ResolvedInstant> for DateTime<Utc> {
    fn from(instant: ResolvedInstant) -> Self {
        instant.0
    }
}

impl fmt::Display for ResolvedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

/// Outcome of resolving an option that may have been left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// The option was not supplied.
    NoValue,
    At(ResolvedInstant),
}

impl Resolution {
    pub fn instant(&self) -> Option<ResolvedInstant> {
        match self {
            Resolution::NoValue => None,
            Resolution::At(instant) => Some(*instant),
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, Resolution::NoValue)
    }
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Resolve a duration/timestamp option in UTC.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use permkit::duration::{resolve, Resolution};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
/// let expiry = resolve("1 month", now).unwrap().instant().unwrap();
/// assert_eq!(expiry.to_string(), "2026-02-28T12:00:00+00:00");
/// assert_eq!(resolve("  ", now).unwrap(), Resolution::NoValue);
/// ```
///
/// # Errors
///
/// See [`DurationSpec::parse`] and [`DurationSpec::resolve`].
pub fn resolve(input: &str, now: DateTime<Utc>) -> Result<Resolution> {
    resolve_with_options(input, now, &ResolveOptions::default())
}

/// Resolve a duration/timestamp option with explicit options.
///
/// # Errors
///
/// See [`DurationSpec::parse`] and [`DurationSpec::resolve`].
pub fn resolve_with_options(
    input: &str,
    now: DateTime<Utc>,
    options: &ResolveOptions,
) -> Result<Resolution> {
    match DurationSpec::parse(input)? {
        None => Ok(Resolution::NoValue),
        Some(spec) => spec.resolve(now, options).map(Resolution::At),
    }
}

/// Resolve an option whose value was split across command arguments.
///
/// `primary` is the option value proper; `rest` are the trailing positional
/// words (e.g. `["months"]` for `/perm ... 2 months`). They are rejoined with
/// single spaces. A blank `primary` yields [`Resolution::NoValue`] whatever
/// `rest` contains.
///
/// # Errors
///
/// See [`DurationSpec::parse`] and [`DurationSpec::resolve`].
pub fn resolve_with_args<S: AsRef<str>>(
    primary: &str,
    rest: &[S],
    now: DateTime<Utc>,
    options: &ResolveOptions,
) -> Result<Resolution> {
    if primary.trim_ascii().is_empty() {
        return Ok(Resolution::NoValue);
    }
    let mut joined = primary.to_string();
    for arg in rest {
        joined.push(' ');
        joined.push_str(arg.as_ref());
    }
    resolve_with_options(&joined, now, options)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn invalid_value() -> PermError {
    PermError::InvalidValue(FIELD_NAME.to_string())
}

/// Parse an ISO 8601 combined date-time, with or without an offset.
fn parse_iso_datetime(s: &str) -> Option<Timestamp> {
    if !ISO_DATETIME.is_match(s) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp::Offset(dt));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(Timestamp::Floating)
}

/// Add `magnitude` calendar units to `now`.
///
/// Hours are elapsed time. Days, months and years move the local calendar
/// date in `tz` and keep the wall-clock time; month-end days clamp.
fn add_calendar(
    now: DateTime<Utc>,
    magnitude: u32,
    unit: DurationUnit,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    match unit {
        DurationUnit::Hour => now.checked_add_signed(Duration::try_hours(i64::from(magnitude))?),
        DurationUnit::Day => shift_local(now, tz, |naive| {
            naive.checked_add_days(Days::new(u64::from(magnitude)))
        }),
        DurationUnit::Month => shift_local(now, tz, |naive| {
            naive.checked_add_months(Months::new(magnitude))
        }),
        DurationUnit::Year => {
            let months = magnitude.checked_mul(12)?;
            shift_local(now, tz, |naive| naive.checked_add_months(Months::new(months)))
        }
    }
}

fn shift_local(
    now: DateTime<Utc>,
    tz: &Tz,
    shift: impl FnOnce(NaiveDateTime) -> Option<NaiveDateTime>,
) -> Option<DateTime<Utc>> {
    let local = now.with_timezone(tz).naive_local();
    localize(tz, shift(local)?)
}

/// Map a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap use the offset in effect before the gap, which moves them forward
/// by the gap length.
fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = naive.checked_sub_signed(Duration::days(1))?;
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let utc = naive.checked_sub_signed(Duration::seconds(i64::from(
                offset.local_minus_utc(),
            )))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
