//! # Reinhardt OData Negotiation
//!
//! Content negotiation for OData responses: parsing of `Accept` and
//! `Accept-Charset` headers, and resolution of the output format, media type
//! and character encoding for a payload.
//!
//! ## Overview
//!
//! - [`AcceptHeader`] / [`MediaTypeRange`]: weighted media ranges
//! - [`charset::parse_charsets`] / [`Charset`]: charset preferences
//! - [`supported_media_types`]: the fixed media type table of each
//!   [`PayloadKind`], filtered by [`ODataVersion`]
//! - [`resolve`]: picks one [`FormatResolution`] for a [`NegotiationRequest`]
//!
//! Resolution is pure: it reads only its inputs and static tables, so it can
//! run concurrently from any number of threads.
//!
//! ## Example
//!
//! ```
//! use reinhardt_odata_negotiation::{Format, NegotiationRequest, PayloadKind, resolve};
//!
//! let request = NegotiationRequest::new(PayloadKind::Batch).with_accept("multipart/mixed");
//! let resolution = resolve(&request).unwrap();
//! assert_eq!(resolution.format(), Format::Batch);
//! assert_eq!(resolution.media_type(), "multipart/mixed");
//! assert_eq!(resolution.encoding(), None);
//! ```

pub mod accept;
pub mod charset;
pub mod error;
pub mod kind;
pub mod media_type;
pub mod resolution;
pub mod resolver;
pub mod supported;
pub mod version;

pub use accept::AcceptHeader;
pub use charset::{Charset, CharsetRange};
pub use error::{CharsetError, MediaTypeError, NegotiationError, NegotiationResult};
pub use kind::{Format, PayloadKind};
pub use media_type::MediaTypeRange;
pub use resolution::FormatResolution;
pub use resolver::{NegotiationRequest, default_media_type, resolve};
pub use supported::{SupportedMediaType, supported_media_types};
pub use version::ODataVersion;
