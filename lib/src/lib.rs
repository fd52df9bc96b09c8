//! Library for sinoclock, a voice-assistant skill backend that tells players
//! how long until the next recurring in-game event.

pub mod clock;
pub mod config;
mod configrefs;
pub mod error;
pub mod skill;
pub mod types;
pub mod util;
