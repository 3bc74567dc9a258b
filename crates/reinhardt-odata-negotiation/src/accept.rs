//! Accept header parsing

use crate::error::MediaTypeError;
use crate::media_type::{MediaTypeRange, split_unquoted};

/// A parsed `Accept` header.
///
/// Ranges are kept in header order; ranking is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptHeader {
	ranges: Vec<MediaTypeRange>,
}

impl AcceptHeader {
	/// Parses an `Accept` header string.
	///
	/// An empty header, or one made only of empty list elements, accepts
	/// anything (`*/*`).
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_odata_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("application/json;q=0.2, application/atom+xml;q=0.5").unwrap();
	/// assert_eq!(accept.ranges().len(), 2);
	/// assert_eq!(accept.ranges()[0].quality(), 0.2);
	/// assert_eq!(accept.ranges()[1].subtype_name(), "atom+xml");
	///
	/// let any = AcceptHeader::parse("").unwrap();
	/// assert_eq!(any.ranges()[0].to_string(), "*/*");
	///
	/// assert!(AcceptHeader::parse("application/json;q=abc").is_err());
	/// ```
	pub fn parse(header: &str) -> Result<Self, MediaTypeError> {
		let mut ranges = Vec::new();
		for element in split_unquoted(header, b',', header)? {
			let element = element.trim();
			if element.is_empty() {
				continue;
			}
			ranges.push(MediaTypeRange::parse(element, header)?);
		}

		if ranges.is_empty() {
			return Ok(Self::any());
		}
		Ok(Self { ranges })
	}

	/// Accepts anything, as if no header had been sent.
	pub fn any() -> Self {
		Self {
			ranges: vec![MediaTypeRange::any()],
		}
	}

	pub fn ranges(&self) -> &[MediaTypeRange] {
		&self.ranges
	}
}
