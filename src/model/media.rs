//! Media descriptions: media type, payload types, RTP header extensions.

use indexmap::IndexMap;

use crate::error::ColibriError;

use super::normalize_enum;

// ============================================================================
// MEDIA TYPE
// ============================================================================

/// The type of a media stream or source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    Audio,
    Video,
}

impl MediaType {
    /// Parse a wire literal. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// The canonical wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MEDIA
// ============================================================================

/// One media description of a conference entity (`<media type='audio'>`).
#[derive(Clone, Debug, PartialEq)]
pub struct Media {
    /// The media type. Required.
    pub media_type: MediaType,
    /// XEP-0167 payload types, in document order.
    pub payload_types: Vec<PayloadType>,
    /// XEP-0294 RTP header extensions, in document order.
    pub rtp_header_extensions: Vec<RtpHdrExt>,
    /// Presence flag: the `extmap-allow-mixed` child element.
    pub extmap_allow_mixed: bool,
}

impl Media {
    pub fn builder() -> MediaBuilder {
        MediaBuilder::default()
    }
}

/// Builder for [`Media`].
#[derive(Default)]
pub struct MediaBuilder {
    media_type: Option<MediaType>,
    payload_types: Vec<PayloadType>,
    rtp_header_extensions: Vec<RtpHdrExt>,
    extmap_allow_mixed: bool,
}

impl MediaBuilder {
    pub fn media_type(mut self, t: MediaType) -> Self {
        self.media_type = Some(t);
        self
    }

    pub fn payload_type(mut self, pt: PayloadType) -> Self {
        self.payload_types.push(pt);
        self
    }

    pub fn rtp_header_extension(mut self, ext: RtpHdrExt) -> Self {
        self.rtp_header_extensions.push(ext);
        self
    }

    pub fn extmap_allow_mixed(mut self, allow: bool) -> Self {
        self.extmap_allow_mixed = allow;
        self
    }

    pub fn build(self) -> Result<Media, ColibriError> {
        let media_type = self
            .media_type
            .ok_or_else(|| ColibriError::missing("media", "type"))?;
        Ok(Media {
            media_type,
            payload_types: self.payload_types,
            rtp_header_extensions: self.rtp_header_extensions,
            extmap_allow_mixed: self.extmap_allow_mixed,
        })
    }
}

// ============================================================================
// PAYLOAD TYPE
// ============================================================================

/// A codec descriptor (`<payload-type>`, XEP-0167).
#[derive(Clone, Debug, PartialEq)]
pub struct PayloadType {
    /// The RTP payload type number. Required.
    pub id: u8,
    /// Codec name (`opus`, `VP8`, ...).
    pub name: Option<String>,
    /// Clock rate in Hz.
    pub clockrate: Option<u32>,
    /// Channel count (audio only).
    pub channels: Option<u16>,
    /// `fmtp`-style parameters, in document order. A parameter without a
    /// name is keyed by the empty string.
    pub parameters: IndexMap<String, String>,
    /// RTCP feedback entries, in document order.
    pub rtcp_fbs: Vec<RtcpFb>,
}

impl PayloadType {
    pub fn builder() -> PayloadTypeBuilder {
        PayloadTypeBuilder::default()
    }
}

/// Builder for [`PayloadType`].
#[derive(Default)]
pub struct PayloadTypeBuilder {
    id: Option<u8>,
    name: Option<String>,
    clockrate: Option<u32>,
    channels: Option<u16>,
    parameters: IndexMap<String, String>,
    rtcp_fbs: Vec<RtcpFb>,
}

impl PayloadTypeBuilder {
    pub fn id(mut self, id: u8) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn clockrate(mut self, clockrate: u32) -> Self {
        self.clockrate = Some(clockrate);
        self
    }

    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn rtcp_fb(mut self, fb: RtcpFb) -> Self {
        self.rtcp_fbs.push(fb);
        self
    }

    pub fn build(self) -> Result<PayloadType, ColibriError> {
        let id = self
            .id
            .ok_or_else(|| ColibriError::missing("payload-type", "id"))?;
        Ok(PayloadType {
            id,
            name: self.name,
            clockrate: self.clockrate,
            channels: self.channels,
            parameters: self.parameters,
            rtcp_fbs: self.rtcp_fbs,
        })
    }
}

/// An RTCP feedback entry of a payload type (`<rtcp-fb type='nack' subtype='pli'/>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtcpFb {
    pub fb_type: String,
    pub subtype: Option<String>,
}

// ============================================================================
// RTP HEADER EXTENSION
// ============================================================================

/// An RTP header extension description (`<rtp-hdrext>`, XEP-0294).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtpHdrExt {
    /// The extension ID. Required.
    pub id: u16,
    /// The extension URI. Required.
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_parses_case_insensitively() {
        assert_eq!(MediaType::parse("audio"), Some(MediaType::Audio));
        assert_eq!(MediaType::parse("VIDEO"), Some(MediaType::Video));
        assert_eq!(MediaType::parse("data"), None);
    }

    #[test]
    fn media_requires_type() {
        let err = Media::builder().build().unwrap_err();
        assert_eq!(err, ColibriError::missing("media", "type"));
    }

    #[test]
    fn payload_type_requires_id() {
        let err = PayloadType::builder().name("opus").build().unwrap_err();
        assert_eq!(err, ColibriError::missing("payload-type", "id"));
    }

    #[test]
    fn payload_type_parameters_keep_insertion_order() {
        let pt = PayloadType::builder()
            .id(111)
            .parameter("useinbandfec", "1")
            .parameter("minptime", "10")
            .build()
            .unwrap();
        let keys: Vec<_> = pt.parameters.keys().cloned().collect();
        assert_eq!(keys, ["useinbandfec", "minptime"]);
    }
}
