use std::time::Duration;

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::{
        ACCEPT,
        USER_AGENT,
    },
};

use crate::core::{
    GlosorError,
    Glosa,
};

pub fn http_client(timeout_secs: u64) -> Result<Client, GlosorError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GlosorError::Custom(format!("HTTP client build failed: {e}")))
}

/// Downloads an importable vocabulary (a JSON array of entries).
///
/// Failures of any kind come back as `ImportFetch` carrying the url.
pub fn fetch_vocabulary(
    client: &Client,
    url: &str,
    attempts: usize,
) -> Result<Vec<Glosa>, GlosorError> {
    let import_error = |message: String| GlosorError::ImportFetch { url: url.to_string(), message };
    let attempts = attempts.max(1);
    let mut attempt: usize = 0;
    loop {
        attempt += 1;

        let resp = client
            .get(url)
            .header(USER_AGENT, "glosor/0.1 (+reqwest)")
            .header(ACCEPT, "application/json")
            .send();

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                if attempt < attempts {
                    log::warn!("GET {} failed (attempt {}): {}", url, attempt, e);
                    std::thread::sleep(Duration::from_secs(2 * attempt as u64));
                    continue;
                }
                return Err(import_error(e.to_string()));
            }
        };

        ensure_success(&resp).map_err(import_error)?;
        return resp.json::<Vec<Glosa>>().map_err(|e| import_error(e.to_string()));
    }
}

fn ensure_success(resp: &Response) -> Result<(), String> {
    if !resp.status().is_success() {
        return Err(format!("HTTP error {} from {}", resp.status(), resp.url()));
    }
    Ok(())
}
