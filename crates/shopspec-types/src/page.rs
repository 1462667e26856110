use crate::FALLBACK_DOMAIN;

/// Page the widget is embedded in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub hostname: String,
    pub url: String,
    pub title: String,
}

impl PageContext {
    pub fn new(
        hostname: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn domain(&self) -> String {
        detect_domain(&self.hostname)
    }
}

/// Strip a leading `www.` from the hostname
///
/// Pages without a hostname (e.g. `file://`) get [`FALLBACK_DOMAIN`].
pub fn detect_domain(hostname: &str) -> String {
    let hostname = hostname.trim();
    if hostname.is_empty() {
        return FALLBACK_DOMAIN.to_string();
    }
    hostname.strip_prefix("www.").unwrap_or(hostname).to_string()
}
