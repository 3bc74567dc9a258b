//! Media type ranges and the lexical rules shared by the header parsers

use crate::error::MediaTypeError;
use std::fmt;

/// Quality weight of `q=1`, in thousandths.
pub(crate) const MAX_WEIGHT: u16 = 1000;

/// Returns true for RFC 7230 `tchar` bytes.
pub(crate) fn is_token_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric()
		|| matches!(
			b,
			b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
				| b'`' | b'|' | b'~'
		)
}

pub(crate) fn is_token(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(is_token_byte)
}

/// Parses an RFC 7231 `qvalue` into thousandths.
///
/// Accepts `0`, `0.` and up to three decimals, and `1` optionally followed by
/// up to three zeros. Everything else is rejected, never clamped.
pub(crate) fn parse_quality(value: &str) -> Option<u16> {
	let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
	if frac_part.len() > 3 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	let millis = frac_part
		.bytes()
		.zip([100u16, 10, 1])
		.map(|(digit, scale)| u16::from(digit - b'0') * scale)
		.sum::<u16>();

	match int_part {
		"0" => Some(millis),
		"1" if millis == 0 => Some(MAX_WEIGHT),
		_ => None,
	}
}

/// Splits `input` on `delimiter`, ignoring delimiters inside quoted strings.
pub(crate) fn split_unquoted<'a>(
	input: &'a str,
	delimiter: u8,
	header: &str,
) -> Result<Vec<&'a str>, MediaTypeError> {
	let bytes = input.as_bytes();
	let mut parts = Vec::new();
	let mut start = 0;
	let mut in_quotes = false;
	let mut escaped = false;

	for (i, &b) in bytes.iter().enumerate() {
		if in_quotes {
			if escaped {
				escaped = false;
			} else if b == b'\\' {
				escaped = true;
			} else if b == b'"' {
				in_quotes = false;
			}
		} else if b == b'"' {
			in_quotes = true;
		} else if b == delimiter {
			parts.push(&input[start..i]);
			start = i + 1;
		}
	}

	if in_quotes {
		return Err(MediaTypeError::UnterminatedQuotedString {
			header: header.to_string(),
		});
	}
	parts.push(&input[start..]);
	Ok(parts)
}

/// Removes surrounding quotes and backslash escapes from a parameter value.
/// Unquoted values must be tokens.
fn unquote(raw: &str, header: &str) -> Result<String, MediaTypeError> {
	let Some(inner) = raw.strip_prefix('"') else {
		if !is_token(raw) {
			return Err(MediaTypeError::InvalidToken {
				token: raw.to_string(),
				header: header.to_string(),
			});
		}
		return Ok(raw.to_string());
	};

	let inner = inner
		.strip_suffix('"')
		.ok_or_else(|| MediaTypeError::UnterminatedQuotedString {
			header: header.to_string(),
		})?;

	let mut value = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(c) = chars.next() {
		if c == '\\' {
			if let Some(escaped) = chars.next() {
				value.push(escaped);
			}
		} else {
			value.push(c);
		}
	}
	Ok(value)
}

/// One entry of a parsed `Accept` header.
///
/// Type and subtype are stored lowercased; parameter names keep the spelling
/// the client used but are looked up case-insensitively. The `q` parameter is
/// not kept in [`parameters`](Self::parameters); it becomes the quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeRange {
	type_name: String,
	subtype_name: String,
	parameters: Vec<(String, String)>,
	weight: u16,
}

impl MediaTypeRange {
	/// The `*/*` range with quality 1.
	pub fn any() -> Self {
		Self {
			type_name: "*".to_string(),
			subtype_name: "*".to_string(),
			parameters: Vec::new(),
			weight: MAX_WEIGHT,
		}
	}

	/// Parses a single media range (one comma-separated element).
	///
	/// `header` is the complete header text, embedded in diagnostics.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_odata_negotiation::MediaTypeRange;
	///
	/// let range = MediaTypeRange::parse(
	///     "application/json;odata.metadata=minimal;q=0.8",
	///     "application/json;odata.metadata=minimal;q=0.8",
	/// )
	/// .unwrap();
	/// assert_eq!(range.type_name(), "application");
	/// assert_eq!(range.subtype_name(), "json");
	/// assert_eq!(range.quality(), 0.8);
	/// assert_eq!(range.parameter("ODATA.METADATA"), Some("minimal"));
	/// assert_eq!(range.specificity(), 2);
	/// ```
	pub fn parse(element: &str, header: &str) -> Result<Self, MediaTypeError> {
		let mut segments = split_unquoted(element, b';', header)?.into_iter();
		let full_type = segments.next().unwrap_or_default().trim();

		let (type_name, subtype_name) =
			full_type
				.split_once('/')
				.ok_or_else(|| MediaTypeError::MissingSlash {
					media_type: full_type.to_string(),
					header: header.to_string(),
				})?;

		if type_name.is_empty() || subtype_name.is_empty() {
			return Err(MediaTypeError::EmptyTypeOrSubtype {
				media_type: full_type.to_string(),
				header: header.to_string(),
			});
		}
		for part in [type_name, subtype_name] {
			if !is_token(part) {
				return Err(MediaTypeError::InvalidToken {
					token: part.to_string(),
					header: header.to_string(),
				});
			}
		}
		if type_name == "*" && subtype_name != "*" {
			return Err(MediaTypeError::WildcardTypeWithSubtype {
				media_type: full_type.to_string(),
				header: header.to_string(),
			});
		}

		let mut parameters = Vec::new();
		let mut weight = MAX_WEIGHT;
		for segment in segments {
			let segment = segment.trim();
			// Tolerate a trailing `;`
			if segment.is_empty() {
				continue;
			}

			let (name, raw_value) =
				segment
					.split_once('=')
					.ok_or_else(|| MediaTypeError::MissingParameterValue {
						parameter: segment.to_string(),
						header: header.to_string(),
					})?;
			let name = name.trim();
			let raw_value = raw_value.trim();
			if !is_token(name) {
				return Err(MediaTypeError::InvalidToken {
					token: name.to_string(),
					header: header.to_string(),
				});
			}
			if raw_value.is_empty() {
				return Err(MediaTypeError::MissingParameterValue {
					parameter: name.to_string(),
					header: header.to_string(),
				});
			}

			let value = unquote(raw_value, header)?;
			if name.eq_ignore_ascii_case("q") {
				weight = parse_quality(&value).ok_or_else(|| {
					MediaTypeError::InvalidQualityValue {
						value: value.clone(),
						header: header.to_string(),
					}
				})?;
			} else {
				parameters.push((name.to_string(), value));
			}
		}

		Ok(Self {
			type_name: type_name.to_ascii_lowercase(),
			subtype_name: subtype_name.to_ascii_lowercase(),
			parameters,
			weight,
		})
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn subtype_name(&self) -> &str {
		&self.subtype_name
	}

	/// Parameters other than `q`, in the order the client wrote them.
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

	/// Quality value in `[0.0, 1.0]`.
	pub fn quality(&self) -> f32 {
		f32::from(self.weight) / f32::from(MAX_WEIGHT)
	}

	/// Quality in thousandths, exact for comparisons.
	pub fn weight(&self) -> u16 {
		self.weight
	}

	/// 0 for `*/*`, 1 for `type/*`, 2 for `type/subtype`.
	pub fn specificity(&self) -> u8 {
		match (self.type_name.as_str(), self.subtype_name.as_str()) {
			("*", _) => 0,
			(_, "*") => 1,
			_ => 2,
		}
	}

	/// Whether this range covers `type_name/subtype_name`, ignoring parameters.
	pub fn matches_type(&self, type_name: &str, subtype_name: &str) -> bool {
		(self.type_name == "*" || self.type_name.eq_ignore_ascii_case(type_name))
			&& (self.subtype_name == "*" || self.subtype_name.eq_ignore_ascii_case(subtype_name))
	}
}

impl fmt::Display for MediaTypeRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_name, self.subtype_name)?;
		for (name, value) in &self.parameters {
			write!(f, ";{name}={value}")?;
		}
		if self.weight != MAX_WEIGHT {
			write!(f, ";q={}", self.quality())?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("0", Some(0))]
	#[case("0.", Some(0))]
	#[case("0.5", Some(500))]
	#[case("0.25", Some(250))]
	#[case("0.125", Some(125))]
	#[case("1", Some(1000))]
	#[case("1.0", Some(1000))]
	#[case("1.000", Some(1000))]
	#[case("1.001", None)]
	#[case("1.5", None)]
	#[case("2", None)]
	#[case("0.1234", None)]
	#[case("-0.5", None)]
	#[case(".5", None)]
	#[case("abc", None)]
	#[case("", None)]
	fn test_parse_quality(#[case] input: &str, #[case] expected: Option<u16>) {
		assert_eq!(parse_quality(input), expected);
	}

	#[rstest]
	fn test_split_unquoted_respects_quotes() {
		let parts = split_unquoted(r#"a/b;x="1,2";y=3, c/d"#, b',', "h").unwrap();
		assert_eq!(parts, vec![r#"a/b;x="1,2";y=3"#, " c/d"]);
	}

	#[rstest]
	fn test_split_unquoted_handles_escaped_quote() {
		let parts = split_unquoted(r#"a/b;x="say \"hi\", ok",c/d"#, b',', "h").unwrap();
		assert_eq!(parts.len(), 2);
	}

	#[rstest]
	fn test_split_unquoted_rejects_unterminated_quote() {
		let err = split_unquoted(r#"a/b;x="open"#, b',', "h").unwrap_err();
		assert!(matches!(err, MediaTypeError::UnterminatedQuotedString { .. }));
	}

	#[rstest]
	fn test_parse_quoted_parameter_value() {
		let range = MediaTypeRange::parse(r#"multipart/mixed;boundary="a b\"c""#, "h").unwrap();
		assert_eq!(range.parameter("boundary"), Some(r#"a b"c"#));
	}

	#[rstest]
	fn test_parse_lowercases_type_but_keeps_parameter_spelling() {
		let range = MediaTypeRange::parse("Application/JSON;IEEE754Compatible=true", "h").unwrap();
		assert_eq!(range.type_name(), "application");
		assert_eq!(range.subtype_name(), "json");
		assert_eq!(range.parameters()[0].0, "IEEE754Compatible");
		assert_eq!(range.parameter("ieee754compatible"), Some("true"));
	}

	#[rstest]
	#[case("*/*", 0)]
	#[case("application/*", 1)]
	#[case("application/json", 2)]
	fn test_specificity(#[case] input: &str, #[case] expected: u8) {
		let range = MediaTypeRange::parse(input, input).unwrap();
		assert_eq!(range.specificity(), expected);
	}

	#[rstest]
	fn test_display_renders_quality_only_when_not_one() {
		let range = MediaTypeRange::parse("text/plain;q=0.5", "h").unwrap();
		assert_eq!(range.to_string(), "text/plain;q=0.5");

		let range = MediaTypeRange::parse("text/plain", "h").unwrap();
		assert_eq!(range.to_string(), "text/plain");
	}
}
