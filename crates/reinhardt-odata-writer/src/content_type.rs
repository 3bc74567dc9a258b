//! Content-Type header rendering

use reinhardt_odata_negotiation::supported::{
	BOUNDARY, CHARSET, IEEE754_COMPATIBLE, ODATA_METADATA, ODATA_STREAMING, TYPE,
};
use reinhardt_odata_negotiation::{Format, FormatResolution};
use std::fmt;
use uuid::Uuid;

/// Position of a parameter in the rendered header; unknown names go last.
fn parameter_rank(name: &str) -> usize {
	[TYPE, ODATA_METADATA, ODATA_STREAMING, IEEE754_COMPATIBLE]
		.iter()
		.position(|known| known.eq_ignore_ascii_case(name))
		.unwrap_or(usize::MAX)
}

fn new_boundary() -> String {
	format!("batch{}", Uuid::new_v4().simple())
}

/// A rendered `Content-Type` value.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{Charset, Format, FormatResolution};
/// use reinhardt_odata_writer::ContentTypeHeader;
///
/// let resolution = FormatResolution::new(Format::Json, "application", "json")
///     .with_parameter("odata.streaming", "true")
///     .with_parameter("odata.metadata", "minimal")
///     .with_encoding(Some(Charset::Utf8));
///
/// let header = ContentTypeHeader::build(&resolution);
/// assert_eq!(
///     header.value(),
///     "application/json;odata.metadata=minimal;odata.streaming=true;charset=utf-8"
/// );
/// assert_eq!(header.boundary(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeHeader {
	value: String,
	boundary: Option<String>,
}

impl ContentTypeHeader {
	/// Renders a resolution. Batch resolutions get a fresh boundary on every
	/// call.
	pub fn build(resolution: &FormatResolution) -> Self {
		let mut parameters: Vec<(&str, &str)> = resolution
			.parameters()
			.iter()
			.filter(|(name, _)| !name.eq_ignore_ascii_case(CHARSET))
			.map(|(name, value)| (name.as_str(), value.as_str()))
			.collect();
		parameters.sort_by_key(|(name, _)| parameter_rank(name));

		let mut value = resolution.media_type();
		for (name, parameter) in parameters {
			value.push_str(&format!(";{name}={parameter}"));
		}

		let boundary = (resolution.format() == Format::Batch).then(new_boundary);
		if let Some(boundary) = &boundary {
			value.push_str(&format!(";{BOUNDARY}={boundary}"));
		}
		if let Some(encoding) = resolution.encoding() {
			value.push_str(&format!(";{CHARSET}={encoding}"));
		}

		Self { value, boundary }
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	/// The multipart boundary, for batch payloads.
	pub fn boundary(&self) -> Option<&str> {
		self.boundary.as_deref()
	}

	pub fn into_value(self) -> String {
		self.value
	}
}

impl fmt::Display for ContentTypeHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.value)
	}
}
