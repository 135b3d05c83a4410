//! # colibri2
//!
//! Codec for the Colibri2 conference-control protocol: a typed model of
//! conference state (endpoints, relays, media, transports, sources) with
//! bidirectional conversion between its two wire forms, an XML element tree
//! and a JSON object tree. Child elements outside the core schema are parsed
//! through a provider registry, so deployments can register their own
//! extension element decoders.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! json      → JSON object-tree codec
//! xml       → XML codec: pull reader, decode, encode
//!   ↓
//! registry  → extension element providers, raw Extension trees
//!   ↓
//! model     → typed entity graph + builders
//!   ↓
//! error     → ColibriError taxonomy
//! ```
//!
//! ## Example
//!
//! ```
//! use colibri2::{ColibriMessage, ProviderRegistry};
//!
//! let registry = ProviderRegistry::new();
//! let message = ColibriMessage::from_xml(
//!     "<conference-modify xmlns='jitsi:colibri2' meeting-id='88ff288c'/>",
//!     &registry,
//! )?;
//! let json = message.to_json();
//! assert_eq!(json["meeting-id"], "88ff288c");
//! # Ok::<(), colibri2::ColibriError>(())
//! ```

// ============================================================================
// MODULES (dependency order: error → model → registry → xml/json)
// ============================================================================

/// Error taxonomy shared by both codecs
pub mod error;

/// Typed entity graph: IQs, entities, media, transport, sources
pub mod model;

/// Extension element providers and raw element trees
pub mod registry;

/// XML wire form: pull reader, decoder, encoder
pub mod xml;

/// JSON wire form: ordered object-tree decoder and encoder
pub mod json;

// Re-export the types nearly every caller needs
pub use error::ColibriError;
pub use model::{
    ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ, Connect,
    Endpoint, Media, MediaSource, MediaType, Notification, NotificationType, Relay, Sources,
    Transport, ns,
};
pub use registry::{Extension, ProviderRegistry};
