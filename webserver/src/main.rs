use std::path::{Path, PathBuf};
use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use sinoclock::config::{self, Config};

mod api;
mod configrefs;
mod server;

/// Environment variables with this prefix override the configuration file.
const ENV_PREFIX: &str = "SINOCLOCK_";

/// Voice-assistant skill backend answering questions about recurring event
/// times.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML configuration file; if missing, only the environment is used.
    #[arg(short, long, default_value = "dev-config.yaml")]
    config: PathBuf,
}

/// Put `env` in front of `file`, so environment values override the file.
fn layer_configs<E, F>(env: E, file: Option<F>) -> Box<dyn Config + Send + Sync>
where
    E: Config + Send + Sync + 'static,
    F: Config + Send + Sync + 'static,
{
    match file {
        Some(file) => {
            let layers: Vec<Box<dyn Config + Send + Sync>> =
                vec![Box::new(env), Box::new(file)];
            Box::new(config::layered::new(layers))
        },
        None => Box::new(env),
    }
}

fn cfg_factory(path: &Path) -> Result<Box<dyn Config + Send + Sync>, String> {
    let file = if path.exists() {
        Some(config::file::new(path)?)
    } else {
        log::warn!("config file {path:?} not found, using environment only");
        None
    };
    Ok(layer_configs(config::env::new(ENV_PREFIX), file))
}

#[actix_web::main]
async fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let cfg = cfg_factory(&args.config)?;
    let state = web::Data::new(server::State::new(cfg.as_ref())?);
    let root_path = server::root_path(cfg.as_ref())?;
    let api_path = config::get_ref(cfg.as_ref(), &configrefs::SERVER_API_PATH)?;
    let addr = server::addr(cfg.as_ref())?;

    log::info!("listening on {}:{}", addr.0, addr.1);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(api::json_config())
            .wrap(middleware::Logger::default())
            .service(web::scope(&root_path).service(api::service(&api_path)))
            .default_service(web::to(api::notfound::get))
    })
        .bind(addr)
        .map_err(|e| format!("error binding port: {e}"))?
        .run()
        .await
        .map_err(|e| format!("error initialising or interrupted: {e}"))
}

#[cfg(test)]
mod tests {
    use sinoclock::config::map;
    use super::*;

    #[test]
    fn env_overrides_file() {
        let env = map::from_pairs(&[("webserver.server.port", "9000")]);
        let file = map::from_pairs(&[
            ("webserver.server.port", "8000"),
            ("webserver.server.root-path", "/skills"),
        ]);
        let cfg = layer_configs(env, Some(file));
        assert_eq!(cfg.find(&["webserver", "server", "port"]), Some("9000"));
        assert_eq!(cfg.find(&["webserver", "server", "root-path"]),
                   Some("/skills"));
    }

    #[test]
    fn env_only_without_file() {
        let env = map::from_pairs(&[("webserver.server.port", "9000")]);
        let cfg = layer_configs(env, None::<map::Config>);
        assert_eq!(cfg.find(&["webserver", "server", "port"]), Some("9000"));
        assert_eq!(cfg.find(&["webserver", "server", "root-path"]), None);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let path = std::env::temp_dir().join("sinoclock-missing-config.yaml");
        let cfg = cfg_factory(&path).unwrap();
        assert_eq!(cfg.find(&["no", "such", "value"]), None);
    }

    #[test]
    fn config_file_is_read() {
        let path = std::env::temp_dir().join(
            format!("sinoclock-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "webserver:\n  server:\n    paths:\n      api: /v1\n")
            .unwrap();
        let cfg = cfg_factory(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config::get_ref(cfg.unwrap().as_ref(),
                                   &configrefs::SERVER_API_PATH),
                   Ok("/v1".to_owned()));
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let path = std::env::temp_dir().join(
            format!("sinoclock-bad-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "- not\n- a map\n").unwrap();
        let cfg = cfg_factory(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(cfg.is_err());
    }
}
