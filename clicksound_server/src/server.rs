use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

use crate::protocol::{ProtocolError, ProtocolErrorKind, SetVolumeCommand, Volume, VolumeResponse};
use crate::settings::VolumeStore;

const MAX_BODY_SIZE: u64 = 1024;

fn status_code(kind: ProtocolErrorKind) -> StatusCode {
    match kind {
        ProtocolErrorKind::BadInput => StatusCode::BAD_REQUEST,
        ProtocolErrorKind::NotFound => StatusCode::NOT_FOUND,
        ProtocolErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn volume_reply(result: Result<Volume, ProtocolError>) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(volume) => warp::reply::with_status(
            warp::reply::json(&VolumeResponse::success(volume)),
            StatusCode::OK,
        ),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&VolumeResponse::error(&err)),
            status_code(err.kind()),
        ),
    }
}

async fn on_get_volume(store: Arc<VolumeStore>) -> Result<impl Reply, Infallible> {
    Ok(volume_reply(Ok(store.get().await)))
}

async fn on_set_volume(body: Bytes, store: Arc<VolumeStore>) -> Result<impl Reply, Infallible> {
    let result = match serde_json::from_slice::<SetVolumeCommand>(&body) {
        Ok(cmd) => store.set(cmd.volume()).await,
        Err(err) => {
            log::debug!("error parsing json {}", err);
            Err(ProtocolError::new(ProtocolErrorKind::BadInput, err.to_string()))
        }
    };
    Ok(volume_reply(result))
}

pub fn routes(
    store: Arc<VolumeStore>,
    public_dir: String,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let with_store = warp::any().map(move || store.clone());
    let volume = warp::path!("api" / "sound" / "volume");

    let get_volume = volume
        .and(warp::get())
        .and(with_store.clone())
        .and_then(on_get_volume);
    let set_volume = volume
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::bytes())
        .and(with_store)
        .and_then(on_set_volume);

    get_volume
        .or(set_volume)
        .or(warp::fs::dir(public_dir)) // Static files
        .with(warp::log("clicksound"))
}

pub async fn serve(public_dir: String, socket: SocketAddr, store: Arc<VolumeStore>) {
    warp::serve(routes(store, public_dir)).run(socket).await;
}
