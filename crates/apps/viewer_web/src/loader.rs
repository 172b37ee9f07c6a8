use catalog::{LoadError, LocationCatalog};
use gloo_net::http::Request;

/// Fetches and parses the location list. Any non-2xx status is a load error.
pub async fn fetch_catalog(url: &str) -> Result<LocationCatalog, LoadError> {
    let transport = |e: gloo_net::Error| LoadError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    };

    let resp = Request::get(url).send().await.map_err(transport)?;
    if !resp.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let text = resp.text().await.map_err(transport)?;
    LocationCatalog::from_json_str(&text)
}
