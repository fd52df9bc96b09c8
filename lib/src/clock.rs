//! Sources of the current instant.

use chrono::{DateTime, Utc};
use crate::config::{self, Config};
use crate::configrefs;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Build the clock selected by configuration: a [`FixedClock`] when
/// `clock.fixed-time` is set, otherwise the [`SystemClock`].
pub fn from_config<C>(cfg: &C) -> Result<Box<dyn Clock + Send + Sync>, String>
where
    C: Config + ?Sized,
{
    Ok(match config::get_ref(cfg, &configrefs::CLOCK_FIXED_TIME)? {
        Some(at) => {
            log::warn!("using fixed clock at {}", at.to_rfc3339());
            Box::new(FixedClock(at))
        },
        None => Box::new(SystemClock),
    })
}
