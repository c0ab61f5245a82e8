use anyhow::{anyhow, bail, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::protocol::{SetVolumeCommand, Volume, VolumeResponse};
use crate::volume::VolumeBackend;

/// Volume setting stored by the server behind `/api/sound/volume`.
#[derive(Debug, Clone)]
pub struct HttpVolumeBackend {
    endpoint: String,
}

fn js_error(context: &str, err: JsValue) -> anyhow::Error {
    anyhow!("{}: {:?}", context, err)
}

impl HttpVolumeBackend {
    pub fn new(endpoint: &str) -> Self {
        HttpVolumeBackend { endpoint: endpoint.into() }
    }

    async fn send(&self, init: &RequestInit) -> Result<Volume> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let request = Request::new_with_str_and_init(&self.endpoint, init)
            .map_err(|e| js_error("invalid request", e))?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch failed", e))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| js_error("not a response", e))?;
        if !response.ok() {
            bail!("{} answered {}", self.endpoint, response.status());
        }
        let text = JsFuture::from(response.text().map_err(|e| js_error("unreadable body", e))?)
            .await
            .map_err(|e| js_error("unreadable body", e))?
            .as_string()
            .ok_or_else(|| anyhow!("body is not text"))?;
        let body: VolumeResponse = serde_json::from_str(&text)?;
        body.volume()
            .ok_or_else(|| anyhow!("unsuccessful response: {:?}", body.message))
    }
}

impl VolumeBackend for HttpVolumeBackend {
    async fn fetch_volume(&self) -> Result<Volume> {
        let init = RequestInit::new();
        init.set_method("GET");
        self.send(&init).await
    }

    async fn store_volume(&self, volume: Volume) -> Result<Volume> {
        let body = serde_json::to_string(&SetVolumeCommand::new(volume))?;
        let headers = Headers::new().map_err(|e| js_error("headers", e))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| js_error("headers", e))?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        self.send(&init).await
    }
}
