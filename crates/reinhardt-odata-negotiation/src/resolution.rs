//! The outcome of a negotiation

use crate::charset::Charset;
use crate::kind::Format;
use serde::Serialize;

/// Format, media type, parameters and encoding chosen for one payload.
///
/// Resolution is deterministic: the same inputs always produce an equal
/// value. The batch boundary is deliberately absent; it is generated when
/// the header is rendered.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{Charset, Format, FormatResolution};
///
/// let resolution = FormatResolution::new(Format::RawValue, "text", "plain")
///     .with_encoding(Some(Charset::Utf8));
/// assert_eq!(resolution.media_type(), "text/plain");
/// assert_eq!(resolution.encoding(), Some(Charset::Utf8));
/// assert!(resolution.parameters().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResolution {
	format: Format,
	type_name: String,
	subtype_name: String,
	parameters: Vec<(String, String)>,
	encoding: Option<Charset>,
}

impl FormatResolution {
	pub fn new(format: Format, type_name: impl Into<String>, subtype_name: impl Into<String>) -> Self {
		Self {
			format,
			type_name: type_name.into(),
			subtype_name: subtype_name.into(),
			parameters: Vec::new(),
			encoding: None,
		}
	}

	/// Appends a content-type parameter. `charset` is carried by
	/// [`with_encoding`](Self::with_encoding) instead.
	pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.push((name.into(), value.into()));
		self
	}

	pub fn with_encoding(mut self, encoding: Option<Charset>) -> Self {
		self.encoding = encoding;
		self
	}

	pub fn format(&self) -> Format {
		self.format
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn subtype_name(&self) -> &str {
		&self.subtype_name
	}

	/// `type/subtype` without parameters.
	pub fn media_type(&self) -> String {
		format!("{}/{}", self.type_name, self.subtype_name)
	}

	pub fn parameters(&self) -> &[(String, String)] {
		&self.parameters
	}

	/// Case-insensitive parameter lookup.
	pub fn parameter(&self, name: &str) -> Option<&str> {
		self.parameters
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn encoding(&self) -> Option<Charset> {
		self.encoding
	}
}
