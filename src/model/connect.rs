//! Recording/transcription connections (`<connect>`).

use url::Url;

use crate::error::ColibriError;

use super::normalize_enum;

/// The protocol spoken on a connect link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectProtocol {
    MediaJson,
}

impl ConnectProtocol {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "mediajson" => Some(Self::MediaJson),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MediaJson => "mediajson",
        }
    }
}

/// What the remote service does with the media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectType {
    Recorder,
    Transcriber,
}

impl ConnectType {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "recorder" => Some(Self::Recorder),
            "transcriber" => Some(Self::Transcriber),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recorder => "recorder",
            Self::Transcriber => "transcriber",
        }
    }
}

/// One HTTP header forwarded when establishing a connect link
/// (`<http-header name='Authorization' value='...'/>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

/// A request to connect the conference to a recorder or transcriber.
#[derive(Clone, Debug, PartialEq)]
pub struct Connect {
    /// The service URL. Required; validated to parse as a URL, but stored as
    /// the literal text so re-encoding emits exactly what was received
    /// (URL normalization would otherwise rewrite e.g. `ws://x` as `ws://x/`).
    pub url: String,
    /// Required even when only the flags are present.
    pub protocol: ConnectProtocol,
    /// Required even when only the flags are present.
    pub connect_type: ConnectType,
    /// Whether audio is forwarded. Default false, only emitted when true.
    pub audio: bool,
    /// Whether video is forwarded. Default false, only emitted when true.
    pub video: bool,
    /// Headers to send on the outbound connection, in document order.
    pub http_headers: Vec<HttpHeader>,
}

impl Connect {
    pub fn builder() -> ConnectBuilder {
        ConnectBuilder::default()
    }
}

/// Builder for [`Connect`].
#[derive(Debug, Default)]
pub struct ConnectBuilder {
    url: Option<String>,
    protocol: Option<ConnectProtocol>,
    connect_type: Option<ConnectType>,
    audio: bool,
    video: bool,
    http_headers: Vec<HttpHeader>,
}

impl ConnectBuilder {
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Validate and set the URL, mapping parse failures to
    /// [`ColibriError::InvalidUri`]. The literal text is kept.
    pub fn url_str(mut self, url: &str) -> Result<Self, ColibriError> {
        Url::parse(url).map_err(|_| ColibriError::invalid_uri("connect", url))?;
        self.url = Some(url.to_owned());
        Ok(self)
    }

    pub fn protocol(mut self, protocol: ConnectProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn connect_type(mut self, t: ConnectType) -> Self {
        self.connect_type = Some(t);
        self
    }

    pub fn audio(mut self, v: bool) -> Self {
        self.audio = v;
        self
    }

    pub fn video(mut self, v: bool) -> Self {
        self.video = v;
        self
    }

    pub fn http_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_headers.push(HttpHeader {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> Result<Connect, ColibriError> {
        let url = self
            .url
            .ok_or_else(|| ColibriError::missing("connect", "url"))?;
        let protocol = self
            .protocol
            .ok_or_else(|| ColibriError::missing("connect", "protocol"))?;
        let connect_type = self
            .connect_type
            .ok_or_else(|| ColibriError::missing("connect", "type"))?;
        Ok(Connect {
            url,
            protocol,
            connect_type,
            audio: self.audio,
            video: self.video,
            http_headers: self.http_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_requires_url_protocol_and_type() {
        let err = Connect::builder().build().unwrap_err();
        assert_eq!(err, ColibriError::missing("connect", "url"));

        // Flags alone do not satisfy the protocol/type requirement.
        let err = Connect::builder()
            .url_str("ws://example.com/x")
            .unwrap()
            .audio(true)
            .build()
            .unwrap_err();
        assert_eq!(err, ColibriError::missing("connect", "protocol"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = Connect::builder().url_str("not a uri").unwrap_err();
        assert_eq!(err, ColibriError::invalid_uri("connect", "not a uri"));
    }

    #[test]
    fn url_literal_text_is_kept() {
        let connect = Connect::builder()
            .url_str("ws://x")
            .unwrap()
            .protocol(ConnectProtocol::MediaJson)
            .connect_type(ConnectType::Recorder)
            .build()
            .unwrap();
        // Url normalization would rewrite this as "ws://x/".
        assert_eq!(connect.url, "ws://x");
    }

    #[test]
    fn connect_type_parses_case_insensitively() {
        assert_eq!(ConnectType::parse("RECORDER"), Some(ConnectType::Recorder));
        assert_eq!(ConnectProtocol::parse("MediaJson"), Some(ConnectProtocol::MediaJson));
        assert_eq!(ConnectProtocol::parse("sip"), None);
    }
}
