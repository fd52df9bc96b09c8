use std::net::Ipv4Addr;
use sinoclock::config::{self, Config};
use sinoclock::skill::Router;
use crate::configrefs;

pub struct State {
    pub router: Router,
}

impl State {
    pub fn new<C>(cfg: &C) -> Result<State, String>
    where
        C: Config + ?Sized,
    {
        Ok(State { router: Router::from_config(cfg)? })
    }
}

pub fn addr<C>(cfg: &C) -> Result<(Ipv4Addr, u16), String>
where
    C: Config + ?Sized,
{
    let all_interfaces = config::get_ref(cfg, &configrefs::SERVER_ALL_INTERFACES)?;
    let addr = if all_interfaces { Ipv4Addr::UNSPECIFIED }
               else { Ipv4Addr::LOCALHOST };
    Ok((addr, config::get_ref(cfg, &configrefs::SERVER_PORT)?))
}

/// Root path without a trailing `/`, so `/` becomes empty.
pub fn root_path<C>(cfg: &C) -> Result<String, String>
where
    C: Config + ?Sized,
{
    Ok(config::get_ref(cfg, &configrefs::SERVER_ROOT_PATH)?
        .trim_end_matches('/')
        .to_string())
}
