//! Time arithmetic over [schedules](crate::types::Schedule) and the phrases
//! built from it.

pub mod humanize;
pub mod query;
pub mod resolve;
pub mod schedules;
