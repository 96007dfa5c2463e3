use reqwest::Url;

use crate::error::{ClientError, Result};

pub const CHAT_SOCKET_PATH: &str = "/ws/chat";

/// Derive the chat socket endpoint from the server origin.
///
/// The socket lives on the same host as the HTTP API; `https` origins map to
/// `wss` and `http` origins to `ws`. Any path on the origin is replaced.
pub fn socket_url(server_url: &str) -> Result<String> {
    let mut url = Url::parse(server_url)
        .map_err(|e| ClientError::invalid_url(format!("{server_url}: {e}")))?;

    let scheme = match url.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(ClientError::invalid_url(format!(
                "{server_url}: unsupported scheme '{other}'"
            )))
        }
    };

    url.set_scheme(scheme)
        .map_err(|_| ClientError::invalid_url(format!("{server_url}: cannot use {scheme}")))?;
    url.set_path(CHAT_SOCKET_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}
