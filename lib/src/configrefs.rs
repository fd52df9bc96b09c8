use std::path::PathBuf;
use chrono::{DateTime, Utc};
use crate::config::{ValueRef, parse};

pub const SCHEDULES_PATH: ValueRef<'_, Option<PathBuf>> = ValueRef {
    names: &["schedules", "path"],
    def: "",
    type_: &parse::OPT_FILE_PATH,
    validators: &[],
};

pub const CLOCK_FIXED_TIME: ValueRef<'_, Option<DateTime<Utc>>> = ValueRef {
    names: &["clock", "fixed-time"],
    def: "",
    type_: &parse::OPT_DATE_TIME,
    validators: &[],
};
