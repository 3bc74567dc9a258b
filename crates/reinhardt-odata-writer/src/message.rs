//! Header access on response messages
//!
//! The writer only needs to read request-derived headers (`Accept`,
//! `Accept-Charset`, `OData-Version`) and set response headers, so any HTTP
//! message type can take part by implementing [`Message`].

use crate::error::{WriterError, WriterResult};
use http::{HeaderMap, HeaderName, HeaderValue};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ODATA_VERSION: &str = "OData-Version";
pub const ACCEPT: &str = "Accept";
pub const ACCEPT_CHARSET: &str = "Accept-Charset";

/// Read/write access to the headers of a message.
///
/// Header names are case-insensitive.
pub trait Message {
	/// Returns the header value, with repeated fields joined by `", "`.
	fn header(&self, name: &str) -> Option<String>;

	/// Sets a header, replacing any previous value.
	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()>;
}

impl Message for HeaderMap {
	fn header(&self, name: &str) -> Option<String> {
		// obs-text bytes are kept (lossily) so malformed values still reach the
		// parsers and get rejected there.
		let values: Vec<String> = self
			.get_all(name)
			.iter()
			.map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
			.collect();
		if values.is_empty() {
			return None;
		}
		Some(values.join(", "))
	}

	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()> {
		let invalid = || WriterError::InvalidHeaderValue {
			name: name.to_string(),
			value: value.to_string(),
		};
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
		self.insert(header_name, header_value);
		Ok(())
	}
}

impl<B> Message for http::Response<B> {
	fn header(&self, name: &str) -> Option<String> {
		self.headers().header(name)
	}

	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()> {
		self.headers_mut().set_header(name, value)
	}
}

impl<B> Message for http::Request<B> {
	fn header(&self, name: &str) -> Option<String> {
		self.headers().header(name)
	}

	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()> {
		self.headers_mut().set_header(name, value)
	}
}

impl<M: Message + ?Sized> Message for &mut M {
	fn header(&self, name: &str) -> Option<String> {
		(**self).header(name)
	}

	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()> {
		(**self).set_header(name, value)
	}
}

/// A standalone message backed by a [`HeaderMap`].
///
/// # Examples
///
/// ```
/// use reinhardt_odata_writer::{InMemoryMessage, Message};
///
/// let message = InMemoryMessage::new().with_header("accept", "application/json");
/// assert_eq!(message.header("Accept"), Some("application/json".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessage {
	headers: HeaderMap,
}

impl InMemoryMessage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a header. Invalid names or values are silently ignored.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		let _ = self.headers.set_header(name, value);
		self
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}
}

impl Message for InMemoryMessage {
	fn header(&self, name: &str) -> Option<String> {
		self.headers.header(name)
	}

	fn set_header(&mut self, name: &str, value: &str) -> WriterResult<()> {
		self.headers.set_header(name, value)
	}
}
