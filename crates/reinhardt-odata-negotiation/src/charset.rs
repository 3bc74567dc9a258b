//! Accept-Charset parsing and charset selection

use crate::error::CharsetError;
use crate::media_type::{MAX_WEIGHT, is_token_byte, parse_quality};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A character encoding the writer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
	#[serde(rename = "utf-8")]
	Utf8,
	#[serde(rename = "utf-16")]
	Utf16,
	#[serde(rename = "utf-16be")]
	Utf16Be,
	#[serde(rename = "utf-16le")]
	Utf16Le,
	#[serde(rename = "utf-32")]
	Utf32,
	#[serde(rename = "us-ascii")]
	UsAscii,
	#[serde(rename = "iso-8859-1")]
	Iso8859_1,
}

impl Charset {
	/// Canonical lowercase name, as rendered in `charset=`.
	pub fn as_str(&self) -> &'static str {
		match self {
			Charset::Utf8 => "utf-8",
			Charset::Utf16 => "utf-16",
			Charset::Utf16Be => "utf-16be",
			Charset::Utf16Le => "utf-16le",
			Charset::Utf32 => "utf-32",
			Charset::UsAscii => "us-ascii",
			Charset::Iso8859_1 => "iso-8859-1",
		}
	}

	/// Looks up a charset by name or common alias, case-insensitively.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_odata_negotiation::Charset;
	///
	/// assert_eq!(Charset::from_name("UTF-8"), Some(Charset::Utf8));
	/// assert_eq!(Charset::from_name("latin1"), Some(Charset::Iso8859_1));
	/// assert_eq!(Charset::from_name("abc-pqr"), None);
	/// ```
	pub fn from_name(name: &str) -> Option<Self> {
		let charset = match name.to_ascii_lowercase().as_str() {
			"utf-8" | "utf8" => Charset::Utf8,
			"utf-16" | "utf16" | "unicode" => Charset::Utf16,
			"utf-16be" | "unicodefffe" => Charset::Utf16Be,
			"utf-16le" => Charset::Utf16Le,
			"utf-32" | "utf32" => Charset::Utf32,
			"us-ascii" | "ascii" => Charset::UsAscii,
			"iso-8859-1" | "iso8859-1" | "latin1" | "iso_8859-1" => Charset::Iso8859_1,
			_ => return None,
		};
		Some(charset)
	}
}

impl fmt::Display for Charset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One entry of a parsed `Accept-Charset` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetRange {
	name: String,
	weight: u16,
}

impl CharsetRange {
	/// The charset name exactly as sent.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn quality(&self) -> f32 {
		f32::from(self.weight) / f32::from(MAX_WEIGHT)
	}

	pub fn is_wildcard(&self) -> bool {
		self.name == "*"
	}
}

fn is_whitespace(b: u8) -> bool {
	b == b' ' || b == b'\t'
}

/// Parses an `Accept-Charset` header into its ranges, in header order.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::charset::parse_charsets;
///
/// let ranges = parse_charsets("utf-8, iso-8859-1;q=0.5, *;q=0.1").unwrap();
/// assert_eq!(ranges.len(), 3);
/// assert_eq!(ranges[1].name(), "iso-8859-1");
/// assert_eq!(ranges[1].quality(), 0.5);
///
/// assert!(parse_charsets("===,*").is_err());
/// assert!(parse_charsets("utf-8 utf-16").is_err());
/// ```
pub fn parse_charsets(header: &str) -> Result<Vec<CharsetRange>, CharsetError> {
	let bytes = header.as_bytes();
	let len = bytes.len();
	let mut pos = 0;
	let mut ranges = Vec::new();

	let invalid_name = |start: usize| {
		let end = header[start..]
			.find(',')
			.map_or(len, |offset| start + offset);
		CharsetError::InvalidCharsetName {
			name: header[start..end].trim().to_string(),
			header: header.to_string(),
		}
	};

	loop {
		while pos < len && (bytes[pos] == b',' || is_whitespace(bytes[pos])) {
			pos += 1;
		}
		if pos >= len {
			break;
		}

		let start = pos;
		while pos < len && is_token_byte(bytes[pos]) {
			pos += 1;
		}
		if pos == start {
			return Err(invalid_name(start));
		}
		let name = &header[start..pos];
		let mut weight = MAX_WEIGHT;

		while pos < len && is_whitespace(bytes[pos]) {
			pos += 1;
		}
		if pos < len && bytes[pos] == b';' {
			pos += 1;
			while pos < len && is_whitespace(bytes[pos]) {
				pos += 1;
			}
			let param_start = pos;
			while pos < len && is_token_byte(bytes[pos]) {
				pos += 1;
			}
			let param = &header[param_start..pos];
			if !param.eq_ignore_ascii_case("q") || pos >= len || bytes[pos] != b'=' {
				return Err(invalid_name(start));
			}
			pos += 1;

			let value_start = pos;
			while pos < len && !matches!(bytes[pos], b',' | b';' | b' ' | b'\t') {
				pos += 1;
			}
			let value = &header[value_start..pos];
			weight = parse_quality(value).ok_or_else(|| CharsetError::InvalidQualityValue {
				value: value.to_string(),
				header: header.to_string(),
			})?;

			while pos < len && is_whitespace(bytes[pos]) {
				pos += 1;
			}
		}

		if pos < len && bytes[pos] != b',' {
			if is_token_byte(bytes[pos]) {
				return Err(CharsetError::MissingSeparatorBetweenCharsets {
					header: header.to_string(),
				});
			}
			return Err(invalid_name(start));
		}

		ranges.push(CharsetRange {
			name: name.to_string(),
			weight,
		});
	}

	Ok(ranges)
}

/// Picks the charset to write with.
///
/// Ranges are tried by descending quality, ties in header order. `*` selects
/// `default`, an unknown name is skipped, `q=0` excludes. When nothing is
/// usable the writer falls back to UTF-8.
pub fn select_charset(ranges: &[CharsetRange], default: Charset) -> Charset {
	let mut preferred: Vec<&CharsetRange> = ranges.iter().filter(|r| r.weight > 0).collect();
	preferred.sort_by(|a, b| b.weight.cmp(&a.weight));

	for range in preferred {
		if range.is_wildcard() {
			return default;
		}
		if let Some(charset) = Charset::from_name(&range.name) {
			return charset;
		}
	}

	tracing::warn!(
		requested = ?ranges.iter().map(CharsetRange::name).collect::<Vec<_>>(),
		"no acceptable charset is supported, falling back to utf-8"
	);
	Charset::Utf8
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn select(header: &str, default: Charset) -> Charset {
		select_charset(&parse_charsets(header).unwrap(), default)
	}

	#[rstest]
	#[case("utf-8", Charset::Utf8)]
	#[case("iso-8859-1;q=0.9, utf-16", Charset::Utf16)]
	#[case("utf-16;q=0.5, utf-32;q=0.5", Charset::Utf16)]
	#[case("abc-pqr", Charset::Utf8)]
	#[case("abc-pqr, us-ascii;q=0.1", Charset::UsAscii)]
	#[case("*", Charset::Iso8859_1)]
	#[case("utf-16;q=0, *;q=0.3", Charset::Iso8859_1)]
	#[case("utf-32;q=0", Charset::Utf8)]
	fn test_select_charset(#[case] header: &str, #[case] expected: Charset) {
		assert_eq!(select(header, Charset::Iso8859_1), expected);
	}

	#[rstest]
	fn test_parse_tolerates_whitespace_around_separators() {
		let ranges = parse_charsets("  utf-8 ;q=0.5 ,\tutf-16 ").unwrap();
		assert_eq!(ranges.len(), 2);
		assert_eq!(ranges[0].quality(), 0.5);
		assert_eq!(ranges[1].name(), "utf-16");
	}

	#[rstest]
	#[case("===,*", "===")]
	#[case("utf-8, @@", "@@")]
	#[case("utf-8;level=1", "utf-8;level=1")]
	#[case("utf-8;q", "utf-8;q")]
	#[case("utf-8=x", "utf-8=x")]
	fn test_invalid_charset_name(#[case] header: &str, #[case] name: &str) {
		let err = parse_charsets(header).unwrap_err();
		assert_eq!(
			err,
			CharsetError::InvalidCharsetName {
				name: name.to_string(),
				header: header.to_string(),
			}
		);
	}

	#[rstest]
	#[case("utf-8 utf-16")]
	#[case("utf-8;q=0.5 utf-16")]
	#[case("iso-8859-5, unicode-1-1;q=0.8 utf-8")]
	fn test_missing_separator(#[case] header: &str) {
		let err = parse_charsets(header).unwrap_err();
		assert!(matches!(
			err,
			CharsetError::MissingSeparatorBetweenCharsets { .. }
		));
	}

	#[rstest]
	#[case("utf-8;q=2")]
	#[case("utf-8;q=abc")]
	#[case("utf-8;q=")]
	fn test_invalid_quality(#[case] header: &str) {
		let err = parse_charsets(header).unwrap_err();
		assert!(matches!(err, CharsetError::InvalidQualityValue { .. }));
	}
}
