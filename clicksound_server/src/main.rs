mod launcher;
mod server;
mod settings;

pub(crate) use clicksound_protocol as protocol;

#[tokio::main]
pub async fn main() {
    launcher::launch().await;
}
