//! # Reinhardt OData
//!
//! Content negotiation for OData responses.
//!
//! Given the kind of payload about to be written, the protocol version and
//! the client's `Accept` / `Accept-Charset` headers, Reinhardt OData decides
//! the output format, the exact media type with its parameters and the
//! character encoding, and writes the matching `Content-Type` and
//! `OData-Version` headers.
//!
//! ## Feature Flags
//!
//! - `writer` (default) - Header writer over `http` messages
//!
//! ## Crates
//!
//! - [`negotiation`] - header parsing, supported media type tables and
//!   format resolution; pure and synchronous
//! - [`writer`] - materializes a resolution onto a response message
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_odata::prelude::*;
//!
//! let request = NegotiationRequest::new(PayloadKind::ResourceSet)
//!     .with_accept("application/json;odata.metadata=minimal;odata.streaming=false");
//! let resolution = resolve(&request).unwrap();
//! assert_eq!(resolution.format(), Format::Json);
//! assert_eq!(resolution.parameter("odata.streaming"), Some("false"));
//! ```
//!
//! With the `writer` feature, `ODataMessageWriter` writes the headers onto a
//! message; see the [`writer`] crate docs.

pub use reinhardt_odata_negotiation as negotiation;

#[cfg(feature = "writer")]
pub use reinhardt_odata_writer as writer;

pub use reinhardt_odata_negotiation::{
	Charset, Format, FormatResolution, NegotiationError, NegotiationRequest, ODataVersion,
	PayloadKind, resolve,
};

#[cfg(feature = "writer")]
pub use reinhardt_odata_writer::{
	ContentTypeHeader, InMemoryMessage, Message, ODataMessageWriter, WriterError, WriterSettings,
};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use reinhardt_odata::prelude::*;
/// ```
pub mod prelude {
	pub use reinhardt_odata_negotiation::{
		Charset, Format, FormatResolution, NegotiationError, NegotiationRequest, NegotiationResult,
		ODataVersion, PayloadKind, resolve, supported_media_types,
	};

	#[cfg(feature = "writer")]
	pub use reinhardt_odata_writer::{
		ContentTypeHeader, InMemoryMessage, Message, ODataMessageWriter, WriterError, WriterResult,
		WriterSettings,
	};
}
