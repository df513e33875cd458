//! Process-wide configuration knobs.
//!
//! These are read on every dataset construction and reflection pass, and are
//! expected to be set once at startup. Mutating them while other threads are
//! building statements is safe but the outcome for in-flight builds is
//! unspecified.

use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use chrono::{FixedOffset, Offset, Utc};

/// Column rename function applied to untagged struct fields.
pub type RenameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
struct Config {
    default_prepared: bool,
    rename: RenameFn,
    ignore_untagged_fields: bool,
    time_location: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_prepared: false,
            rename: default_rename(),
            ignore_untagged_fields: false,
            time_location: utc(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("default_prepared", &self.default_prepared)
            .field("ignore_untagged_fields", &self.ignore_untagged_fields)
            .field("time_location", &self.time_location)
            .finish_non_exhaustive()
    }
}

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

fn utc() -> FixedOffset {
    Utc.fix()
}

fn default_rename() -> RenameFn {
    Arc::new(|name: &str| name.to_ascii_lowercase())
}

fn read() -> Config {
    CONFIG.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write(f: impl FnOnce(&mut Config)) {
    let mut guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard);
}

/// Set the prepared flag given to newly constructed datasets.
///
/// Datasets constructed before the call keep the flag they were created with.
pub fn set_default_prepared(prepared: bool) {
    write(|c| c.default_prepared = prepared);
}

/// The prepared flag newly constructed datasets start with.
pub fn default_prepared() -> bool {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .default_prepared
}

/// Replace the rename function applied to untagged struct fields.
pub fn set_column_rename_function<F>(rename: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    write(|c| c.rename = Arc::new(rename));
    crate::reflect::clear_cache();
}

/// Restore the default rename function (ASCII lowercase).
pub fn reset_column_rename_function() {
    write(|c| c.rename = default_rename());
    crate::reflect::clear_cache();
}

/// Apply the current rename function to a field name.
pub fn rename_column(field: &str) -> String {
    let rename = read().rename;
    rename(field)
}

/// Suppress untagged struct fields entirely when `true`.
pub fn set_ignore_untagged_fields(ignore: bool) {
    write(|c| c.ignore_untagged_fields = ignore);
    crate::reflect::clear_cache();
}

/// Whether untagged struct fields are suppressed.
pub fn ignore_untagged_fields() -> bool {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .ignore_untagged_fields
}

/// Set the location time values are converted to before inline rendering.
pub fn set_time_location(location: FixedOffset) {
    write(|c| c.time_location = location);
}

/// Restore the default time location (UTC).
pub fn reset_time_location() {
    write(|c| c.time_location = utc());
}

/// The location time values are converted to before inline rendering.
pub fn time_location() -> FixedOffset {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .time_location
}

/// Restore every knob to its default.
pub fn reset() {
    write(|c| *c = Config::default());
    crate::reflect::clear_cache();
}
