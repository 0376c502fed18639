//! Cross-site request forgery token lookup

/// Name of the cookie carrying the token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Name of the hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Header the token is sent in
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Places a token may come from, in order of precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfSources {
    /// Page-level token (the `<meta name="csrf-token">` equivalent)
    pub meta: Option<String>,
    /// Raw cookie header
    pub cookie_header: Option<String>,
    /// Value of the hidden form field
    pub hidden_field: Option<String>,
}

/// Extract a cookie value from a `name=value; other=value` header
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CsrfSources {
    /// First non-empty token: meta, then cookie, then hidden field
    pub fn resolve(&self) -> Option<String> {
        non_empty(self.meta.as_deref())
            .or_else(|| {
                let header = self.cookie_header.as_deref()?;
                non_empty(cookie_value(header, CSRF_COOKIE).as_deref())
            })
            .or_else(|| non_empty(self.hidden_field.as_deref()))
    }
}
