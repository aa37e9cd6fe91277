//! URL construction for the gateway.
//!
//! The device key, title, subtitle and body travel as percent-encoded path
//! segments; every other field goes into the query string. Flags are sent as
//! `1` only when set and empty text is never sent.

use url::Url;

use crate::errors::{BarkResult, ConfigurationError, ValidationError};
use crate::request::NotificationRequest;

/// Segments that URL path normalization removes instead of encoding
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

fn path_segment<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if is_dot_segment(value) {
        return Err(ValidationError::DotSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Builds request URLs for one `(server, key)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBuilder {
    device_url: Url,
}

impl EndpointBuilder {
    /// Parse the server URL and append the key as the first path segment.
    ///
    /// A trailing slash on the server URL is ignored and any path it carries
    /// (e.g. a reverse-proxy prefix) is kept in front of the key.
    pub fn new(server_url: &str, key: &str) -> Result<Self, ConfigurationError> {
        if key.is_empty() {
            return Err(ConfigurationError::EmptyKey);
        }
        if is_dot_segment(key) {
            return Err(ConfigurationError::DotSegmentKey {
                key: key.to_string(),
            });
        }

        let mut device_url =
            Url::parse(server_url).map_err(|source| ConfigurationError::InvalidServerUrl {
                url: server_url.to_string(),
                source,
            })?;

        if !matches!(device_url.scheme(), "http" | "https") {
            return Err(ConfigurationError::UnsupportedServerUrl {
                url: server_url.to_string(),
            });
        }

        device_url.set_query(None);
        device_url.set_fragment(None);
        device_url
            .path_segments_mut()
            .map_err(|_| ConfigurationError::UnsupportedServerUrl {
                url: server_url.to_string(),
            })?
            .pop_if_empty()
            .push(key);

        Ok(Self { device_url })
    }

    /// `{server}/{key}`, the POST target
    pub fn device_url(&self) -> &Url {
        &self.device_url
    }

    /// Full GET URL for a request.
    ///
    /// Path layout: `key/title/subtitle/body`, `key/title/body` or `key/body`.
    /// A subtitle is only placed in the path when a title is present too.
    /// Path text of exactly `.` or `..` is rejected with
    /// [`ValidationError::DotSegment`].
    pub fn get_url(&self, request: &NotificationRequest) -> BarkResult<Url> {
        let mut path = Vec::with_capacity(3);
        if let Some(title) = request.title() {
            path.push(path_segment("title", title)?);
            if let Some(subtitle) = request.subtitle() {
                path.push(path_segment("subtitle", subtitle)?);
            }
        }
        path.push(path_segment("body", request.body())?);

        let mut url = self.device_url.clone();

        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|_| ConfigurationError::UnsupportedServerUrl {
                        url: self.device_url.to_string(),
                    })?;
            segments.extend(path);
        }

        let params = query_params(request);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

/// Query parameters for the GET form, in gateway documentation order
pub fn query_params(request: &NotificationRequest) -> Vec<(&'static str, &str)> {
    let mut params = Vec::new();

    let text_fields = [
        ("url", request.url()),
        ("group", request.group()),
        ("icon", request.icon()),
        ("sound", request.sound()),
    ];
    params.extend(
        text_fields
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v))),
    );

    if request.call() {
        params.push(("call", "1"));
    }
    if let Some(level) = request.level().filter(|v| !v.is_empty()) {
        params.push(("level", level));
    }
    if request.is_archive() {
        params.push(("isArchive", "1"));
    }
    if let Some(copy) = request.copy().filter(|v| !v.is_empty()) {
        params.push(("copy", copy));
    }
    if let Some(ciphertext) = request.ciphertext().filter(|v| !v.is_empty()) {
        params.push(("ciphertext", ciphertext));
    }

    params
}
