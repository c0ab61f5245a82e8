use clap::{App, Arg};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::server;
use crate::settings::VolumeStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub public_dir: String,
    pub socket: SocketAddr,
    pub settings_path: PathBuf,
}

fn app() -> App<'static, 'static> {
    App::new("Clicksound")
        .version("0.2")
        .author("Henri Bourcereau <henri@bourcereau.fr>")
        .about("Serves a page with click sounds and stores its volume setting")
        .arg(
            Arg::with_name("directory")
                .short("d")
                .long("directory")
                .value_name("ROOT")
                .help("Directory path of the static files")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("address")
                .short("a")
                .long("address")
                .value_name("IP")
                .help("IP address the server listen to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .value_name("PORT")
                .help("Port the server listen to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("settings")
                .short("s")
                .long("settings")
                .value_name("FILE")
                .help("JSON file where the sound volume is kept")
                .takes_value(true),
        )
}

/// Reads the command line, `args[0]` being the program name.
pub fn parse_config<I, T>(args: I) -> Result<ServerConfig, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args).map_err(|e| e.message)?;

    let current_dir = std::env::current_dir().map_err(|e| format!("can't find current path: {}", e))?;
    let public_dir = matches
        .value_of("directory")
        .map(String::from)
        .unwrap_or_else(|| current_dir.join("public").to_string_lossy().into_owned());

    let str_port = matches.value_of("port").unwrap_or("8002");
    let str_ip = matches.value_of("address").unwrap_or("127.0.0.1");
    let str_socket = format!("{}:{}", str_ip, str_port);
    let socket = str_socket
        .parse()
        .map_err(|_| format!("Could not parse ip / port {}", str_socket))?;

    let settings_path = matches
        .value_of("settings")
        .map(PathBuf::from)
        .unwrap_or_else(|| current_dir.join("settings.json"));

    Ok(ServerConfig { public_dir, socket, settings_path })
}

pub async fn launch() {
    pretty_env_logger::init();

    let config = match parse_config(std::env::args_os()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };
    log::info!("serving {} on {}", config.public_dir, config.socket);

    let store = Arc::new(VolumeStore::open(config.settings_path).await);
    server::serve(config.public_dir, config.socket, store).await;
}
