use failure::Error;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

use registrar::{webserver, Config, RegistryExecutor};
use roster::InMemoryRegistry;

#[derive(Clone, Debug, StructOpt)]
#[structopt(
    name = "registrar",
    about = "Extracurricular activity signup service for Mergington High School"
)]
struct Options {
    /// Config file path
    #[structopt(
        short = "c",
        long = "config",
        default_value = "registrar.toml",
        parse(from_os_str)
    )]
    config: PathBuf,

    /// Listen address, overrides the config file and REGISTRAR_ADDR
    #[structopt(short = "a", long = "addr")]
    addr: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let options = Options::from_args();
    dotenv::dotenv().ok();
    env_logger::init();

    // Load config
    let mut config = Config::load_or_default(&options.config)?.with_env_overrides()?;
    if let Some(addr) = options.addr {
        config.network.addr = addr;
    }

    // Seed the registry and hand it to its actor
    let seed = config.seed.load()?;
    let registry = RegistryExecutor::spawn(InMemoryRegistry::new(seed));

    let server = webserver::start(&config, registry)?;
    server.await?;

    info!("server stopped");
    Ok(())
}
