//! SSRC source descriptions (`<sources>`, `<media-source>`, XEP-0339).

use indexmap::IndexMap;

use crate::error::ColibriError;

use super::MediaType;

/// The `<sources>` container: an ordered sequence of media sources.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Sources {
    pub media_sources: Vec<MediaSource>,
}

impl Sources {
    pub fn new(media_sources: Vec<MediaSource>) -> Self {
        Self { media_sources }
    }
}

/// One media source (`<media-source type='video' id='bd9b6765-v1'>`): a set
/// of SSRCs and SSRC groups belonging to one logical stream.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSource {
    /// The media type. Required.
    pub media_type: MediaType,
    /// The source ID. Required.
    pub id: String,
    /// SSRC descriptions, in document order.
    pub sources: Vec<Source>,
    /// SSRC groups, in document order.
    pub ssrc_groups: Vec<SsrcGroup>,
}

impl MediaSource {
    pub fn builder() -> MediaSourceBuilder {
        MediaSourceBuilder::default()
    }
}

/// Builder for [`MediaSource`].
#[derive(Default)]
pub struct MediaSourceBuilder {
    media_type: Option<MediaType>,
    id: Option<String>,
    sources: Vec<Source>,
    ssrc_groups: Vec<SsrcGroup>,
}

impl MediaSourceBuilder {
    pub fn media_type(mut self, t: MediaType) -> Self {
        self.media_type = Some(t);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn ssrc_group(mut self, group: SsrcGroup) -> Self {
        self.ssrc_groups.push(group);
        self
    }

    pub fn build(self) -> Result<MediaSource, ColibriError> {
        let media_type = self
            .media_type
            .ok_or_else(|| ColibriError::missing("media-source", "type"))?;
        let id = self
            .id
            .ok_or_else(|| ColibriError::missing("media-source", "id"))?;
        Ok(MediaSource {
            media_type,
            id,
            sources: self.sources,
            ssrc_groups: self.ssrc_groups,
        })
    }
}

/// One SSRC description (`<source ssrc='803354056' name='...'/>`).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Source {
    /// The 32-bit synchronization source identifier.
    pub ssrc: u32,
    pub name: Option<String>,
    /// `<parameter>` children, in document order.
    pub parameters: IndexMap<String, String>,
}

impl Source {
    /// A source carrying nothing but its SSRC.
    pub fn new(ssrc: u32) -> Self {
        Self {
            ssrc,
            ..Self::default()
        }
    }

    /// True when only the SSRC is set; such sources have a compact scalar
    /// JSON form.
    pub fn is_bare(&self) -> bool {
        self.name.is_none() && self.parameters.is_empty()
    }
}

/// A named association between SSRCs (`<ssrc-group semantics='SIM'>`),
/// e.g. simulcast (`SIM`) or retransmission (`FID`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SsrcGroup {
    pub semantics: String,
    /// Member SSRCs, in document order.
    pub sources: Vec<u32>,
}
