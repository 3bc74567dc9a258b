//! Negotiation property-based tests
//!
//! Property-based and fuzz tests for header parsing and format resolution.

use proptest::prelude::*;
use reinhardt_odata_negotiation::{
	Format, NegotiationRequest, ODataVersion, PayloadKind, resolve, supported_media_types,
};
use rstest::*;

const VERSIONS: [ODataVersion; 3] = [ODataVersion::V3, ODataVersion::V4, ODataVersion::V401];

fn kind_strategy() -> impl Strategy<Value = PayloadKind> {
	prop::sample::select(PayloadKind::ALL.to_vec())
}

fn version_strategy() -> impl Strategy<Value = ODataVersion> {
	prop::sample::select(VERSIONS.to_vec())
}

fn accept_strategy() -> impl Strategy<Value = Option<&'static str>> {
	prop::sample::select(vec![
		None,
		Some(""),
		Some("*/*"),
		Some("application/json"),
		Some("application/json;odata.metadata=none;q=0.4, application/*;q=0.9"),
		Some("application/atom+xml;type=feed, application/json;q=0.1"),
		Some("text/plain;charset=utf-16, application/octet-stream;q=0.5"),
		Some("multipart/mixed;boundary=abc"),
		Some("application/xml, text/xml;q=0.8"),
		Some("application/json;a=b"),
		Some("application/json;q=abc"),
	])
}

fn charset_strategy() -> impl Strategy<Value = Option<&'static str>> {
	prop::sample::select(vec![
		None,
		Some("utf-8"),
		Some("abc-pqr"),
		Some("iso-8859-1;q=0.5, utf-16"),
		Some("*"),
		Some("===,*"),
	])
}

fn quality(weight: u16) -> String {
	if weight == 1000 {
		"1".to_string()
	} else {
		format!("0.{weight:03}")
	}
}

// ============================================================================
// Property-Based Tests: resolve
// ============================================================================

proptest! {
	/// Test: Resolution is deterministic
	///
	/// Category: Property
	/// Verifies that resolving the same request twice yields equal results.
	#[test]
	fn prop_resolution_is_idempotent(
		kind in kind_strategy(),
		version in version_strategy(),
		accept in accept_strategy(),
		accept_charset in charset_strategy(),
	) {
		let request = NegotiationRequest {
			payload_kind: kind,
			format: None,
			accept,
			accept_charset,
			version,
		};

		prop_assert_eq!(resolve(&request), resolve(&request));
	}

	/// Test: Arbitrary headers never panic
	///
	/// Category: Fuzz
	/// Verifies that resolution returns a result for any header text.
	#[test]
	fn prop_arbitrary_headers_do_not_panic(
		kind in kind_strategy(),
		accept in ".{0,64}",
		accept_charset in ".{0,32}",
	) {
		let request = NegotiationRequest::new(kind)
			.with_accept(&accept)
			.with_accept_charset(&accept_charset);

		let _ = resolve(&request);
	}

	/// Test: Higher quality wins
	///
	/// Category: Property
	/// Verifies that the range with the higher quality decides the format.
	#[test]
	fn prop_higher_quality_decides_format(json_weight in 1u16..=1000, atom_weight in 1u16..=1000) {
		prop_assume!(json_weight != atom_weight);
		let accept = format!(
			"application/json;q={}, application/atom+xml;q={}",
			quality(json_weight),
			quality(atom_weight)
		);
		let request = NegotiationRequest::new(PayloadKind::Resource)
			.with_accept(&accept)
			.with_version(ODataVersion::V3);

		let resolution = resolve(&request).unwrap();

		let expected = if json_weight > atom_weight { Format::Json } else { Format::Atom };
		prop_assert_eq!(resolution.format(), expected);
	}
}

// ============================================================================
// Exhaustive Tests: supported media types
// ============================================================================

/// Test: Every supported media type is acceptable as itself
///
/// Category: Property
/// Verifies that an Accept header naming a supported media type resolves to a
/// media type carrying all of its parameters.
#[rstest]
fn test_supported_media_type_accepts_itself() {
	for version in VERSIONS {
		for kind in PayloadKind::ALL {
			for candidate in supported_media_types(kind, version) {
				// Arrange
				let accept = candidate.to_string();
				let request = NegotiationRequest::new(kind)
					.with_accept(&accept)
					.with_version(version);

				// Act
				let resolution = resolve(&request).unwrap();

				// Assert
				assert_eq!(resolution.type_name(), candidate.type_name, "{kind} {accept}");
				assert_eq!(resolution.subtype_name(), candidate.subtype_name, "{kind} {accept}");
				for (name, value) in candidate.fixed_parameters {
					assert_eq!(resolution.parameter(name), Some(*value), "{kind} {accept}");
				}
			}
		}
	}
}

/// Test: Explicit format never depends on headers
///
/// Category: Property
/// Verifies that a pinned format resolves identically with or without headers.
#[rstest]
fn test_explicit_format_ignores_headers() {
	for version in VERSIONS {
		for kind in PayloadKind::ALL {
			for format in [Format::Json, Format::Batch, Format::Metadata, Format::RawValue, Format::Atom] {
				let bare = NegotiationRequest::new(kind)
					.with_format(format)
					.with_version(version);
				let with_headers = bare
					.with_accept("image/png;q=abc")
					.with_accept_charset("===");

				assert_eq!(resolve(&bare), resolve(&with_headers), "{kind} {format} {version}");
			}
		}
	}
}
