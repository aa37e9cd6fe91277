use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Notification urgency recognized by the receiving device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Active,
    TimeSensitive,
    Passive,
    Critical,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Active,
        Level::TimeSensitive,
        Level::Passive,
        Level::Critical,
    ];

    /// Wire representation used by the gateway
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Active => "active",
            Level::TimeSensitive => "timeSensitive",
            Level::Passive => "passive",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidLevel {
                value: s.to_string(),
            })
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

/// One notification to deliver.
///
/// Built through [`NotificationRequest::builder`] and immutable afterwards.
/// Serializes to the sparse JSON document used by the POST transport: unset or
/// empty text and `false` flags are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    body: String,
    #[serde(skip_serializing_if = "is_unset")]
    title: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    url: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    group: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    sound: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    call: bool,
    #[serde(skip_serializing_if = "is_unset")]
    level: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    is_archive: bool,
    #[serde(skip_serializing_if = "is_unset")]
    copy: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    ciphertext: Option<String>,
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

impl NotificationRequest {
    /// Request carrying only a body
    pub fn new(body: impl Into<String>) -> Self {
        Self::builder(body).build()
    }

    pub fn builder(body: impl Into<String>) -> NotificationRequestBuilder {
        NotificationRequestBuilder {
            inner: NotificationRequest {
                body: body.into(),
                ..Default::default()
            },
        }
    }

    /// Check the request without touching the network; see [`validate`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    /// Repeat the sound for the gateway's call duration
    pub fn call(&self) -> bool {
        self.call
    }

    /// Raw level text as supplied; checked by [`validate`]
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn is_archive(&self) -> bool {
        self.is_archive
    }

    /// Text placed on the clipboard when the notification is opened
    pub fn copy(&self) -> Option<&str> {
        self.copy.as_deref()
    }

    pub fn ciphertext(&self) -> Option<&str> {
        self.ciphertext.as_deref()
    }
}

/// Builder for [`NotificationRequest`].
///
/// Empty strings are treated as "not set", so they never reach either transport.
#[derive(Debug, Clone)]
pub struct NotificationRequestBuilder {
    inner: NotificationRequest,
}

impl NotificationRequestBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = non_empty(title);
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.inner.subtitle = non_empty(subtitle);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = non_empty(url);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.inner.group = non_empty(group);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.inner.icon = non_empty(icon);
        self
    }

    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.inner.sound = non_empty(sound);
        self
    }

    pub fn call(mut self, call: bool) -> Self {
        self.inner.call = call;
        self
    }

    /// Accepts a [`Level`] or its wire text. Unknown text is kept as-is and
    /// rejected at validation time.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.inner.level = non_empty(level);
        self
    }

    pub fn archive(mut self, is_archive: bool) -> Self {
        self.inner.is_archive = is_archive;
        self
    }

    pub fn copy(mut self, copy: impl Into<String>) -> Self {
        self.inner.copy = non_empty(copy);
        self
    }

    pub fn ciphertext(mut self, ciphertext: impl Into<String>) -> Self {
        self.inner.ciphertext = non_empty(ciphertext);
        self
    }

    pub fn build(self) -> NotificationRequest {
        self.inner
    }
}

/// Validate a request before any URL or JSON is built.
///
/// Fails with [`ValidationError::EmptyBody`] when the body is empty and with
/// [`ValidationError::InvalidLevel`] when a level outside the four known values
/// is set. Pure: the same request always yields the same outcome.
pub fn validate(request: &NotificationRequest) -> Result<(), ValidationError> {
    if request.body.is_empty() {
        return Err(ValidationError::EmptyBody);
    }

    if let Some(level) = request.level.as_deref() {
        level.parse::<Level>()?;
    }

    Ok(())
}
