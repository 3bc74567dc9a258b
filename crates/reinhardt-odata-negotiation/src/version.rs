//! OData protocol versions

use serde::{Deserialize, Serialize};
use std::fmt;

/// OData protocol version, as carried by the `OData-Version` header.
///
/// Versions are ordered, so range checks such as "offered since 4.01" can be
/// written with comparison operators.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::ODataVersion;
///
/// assert_eq!(ODataVersion::parse("4.01"), Some(ODataVersion::V401));
/// assert_eq!(ODataVersion::parse("5.0"), None);
/// assert!(ODataVersion::V3 < ODataVersion::V4);
/// assert_eq!(ODataVersion::default().as_str(), "4.0");
/// ```
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ODataVersion {
	/// Legacy 3.0 protocol, still able to produce Atom and plain XML.
	#[serde(rename = "3.0")]
	V3,
	#[default]
	#[serde(rename = "4.0")]
	V4,
	#[serde(rename = "4.01")]
	V401,
}

impl ODataVersion {
	pub fn as_str(&self) -> &'static str {
		match self {
			ODataVersion::V3 => "3.0",
			ODataVersion::V4 => "4.0",
			ODataVersion::V401 => "4.01",
		}
	}

	/// Parses an `OData-Version` header value.
	///
	/// Surrounding whitespace is ignored, as is a trailing `;`-separated
	/// agent suffix (`3.0;NetFx`). Returns `None` for anything else.
	pub fn parse(value: &str) -> Option<Self> {
		let version = value.split(';').next().unwrap_or_default().trim();
		match version {
			"3.0" => Some(ODataVersion::V3),
			"4.0" => Some(ODataVersion::V4),
			"4.01" => Some(ODataVersion::V401),
			_ => None,
		}
	}
}

impl fmt::Display for ODataVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("3.0", Some(ODataVersion::V3))]
	#[case("4.0", Some(ODataVersion::V4))]
	#[case("4.01", Some(ODataVersion::V401))]
	#[case(" 4.0 ", Some(ODataVersion::V4))]
	#[case("3.0;NetFx", Some(ODataVersion::V3))]
	#[case("4", None)]
	#[case("4.1", None)]
	#[case("2.0", None)]
	#[case("", None)]
	#[case("abc", None)]
	fn test_parse(#[case] input: &str, #[case] expected: Option<ODataVersion>) {
		assert_eq!(ODataVersion::parse(input), expected);
	}

	#[rstest]
	fn test_display_round_trips_through_parse() {
		for version in [ODataVersion::V3, ODataVersion::V4, ODataVersion::V401] {
			assert_eq!(ODataVersion::parse(&version.to_string()), Some(version));
		}
	}

	#[rstest]
	fn test_serde_uses_header_form() {
		let json = serde_json::to_string(&ODataVersion::V401).unwrap();
		assert_eq!(json, "\"4.01\"");

		let version: ODataVersion = serde_json::from_str("\"3.0\"").unwrap();
		assert_eq!(version, ODataVersion::V3);
	}
}
