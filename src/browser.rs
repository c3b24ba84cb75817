use log::{info, warn};
use webbrowser::Browser;

#[derive(Debug)]
pub enum BrowserError {
    EmptyUrl,
    Unavailable,
    Launch(std::io::Error),
}

impl std::fmt::Display for BrowserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowserError::EmptyUrl => write!(f, "Invalid URL!"),
            BrowserError::Unavailable => write!(f, "no web browser available"),
            BrowserError::Launch(err) => write!(f, "failed to open browser: {err}"),
        }
    }
}

impl std::error::Error for BrowserError {}

/// Trims the input and adds `https://` unless an http(s) scheme is present
pub fn normalize_url(raw: &str) -> Result<String, BrowserError> {
    let url = raw.trim();
    if url.is_empty() || url == "https://" || url == "http://" {
        return Err(BrowserError::EmptyUrl);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Ok(format!("https://{url}"))
    }
}

/// Opens `raw` in the system browser and returns the URL actually opened
pub fn open(raw: &str) -> Result<String, BrowserError> {
    let url = normalize_url(raw)?;
    if !Browser::is_available() {
        warn!("event=browser_open status=unavailable");
        return Err(BrowserError::Unavailable);
    }
    webbrowser::open(&url).map_err(BrowserError::Launch)?;
    info!("event=browser_open status=ok");
    Ok(url)
}
