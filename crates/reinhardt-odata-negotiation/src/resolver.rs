//! Response format resolution.
//!
//! Resolution either pins the format the caller asked for, or negotiates it
//! from the client's `Accept` and `Accept-Charset` headers against the media
//! types supported for the payload kind.

use crate::accept::AcceptHeader;
use crate::charset::{Charset, parse_charsets, select_charset};
use crate::error::{NegotiationError, NegotiationResult};
use crate::kind::{Format, PayloadKind};
use crate::media_type::MediaTypeRange;
use crate::resolution::FormatResolution;
use crate::supported::{
	BOUNDARY, CHARSET, IEEE754_COMPATIBLE, ODATA_METADATA, ODATA_STREAMING, SupportedMediaType,
	TYPE, supported_media_types,
};
use crate::version::ODataVersion;
use std::cmp::Reverse;

/// Parameters the resolver understands on an Accept range. Anything else
/// disqualifies the range.
const RECOGNIZED_PARAMETERS: [&str; 6] = [
	ODATA_METADATA,
	ODATA_STREAMING,
	IEEE754_COMPATIBLE,
	TYPE,
	BOUNDARY,
	CHARSET,
];

/// Inputs of one negotiation.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{NegotiationRequest, ODataVersion, PayloadKind};
///
/// let request = NegotiationRequest::new(PayloadKind::ResourceSet)
///     .with_accept("application/json")
///     .with_accept_charset("utf-8")
///     .with_version(ODataVersion::V401);
/// assert_eq!(request.accept, Some("application/json"));
/// assert_eq!(request.format, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NegotiationRequest<'a> {
	pub payload_kind: PayloadKind,
	/// Pins the format and bypasses the Accept headers.
	pub format: Option<Format>,
	pub accept: Option<&'a str>,
	pub accept_charset: Option<&'a str>,
	pub version: ODataVersion,
}

impl<'a> NegotiationRequest<'a> {
	pub fn new(payload_kind: PayloadKind) -> Self {
		Self {
			payload_kind,
			..Default::default()
		}
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = Some(format);
		self
	}

	pub fn with_accept(mut self, accept: &'a str) -> Self {
		self.accept = Some(accept);
		self
	}

	pub fn with_accept_charset(mut self, accept_charset: &'a str) -> Self {
		self.accept_charset = Some(accept_charset);
		self
	}

	pub fn with_version(mut self, version: ODataVersion) -> Self {
		self.version = version;
		self
	}
}

/// Resolves the response format for a payload.
///
/// # Errors
///
/// - [`NegotiationError::InvalidPayloadKind`] for [`PayloadKind::Unsupported`]
/// - [`NegotiationError::NoDefaultMediaTypeForFormat`] when the pinned format
///   cannot represent the payload kind
/// - [`NegotiationError::ContentTypeNegotiation`] when nothing supported
///   satisfies the `Accept` header
/// - [`NegotiationError::MediaType`] / [`NegotiationError::Charset`] for
///   malformed headers
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{Charset, Format, NegotiationRequest, PayloadKind, resolve};
///
/// let request = NegotiationRequest::new(PayloadKind::ResourceSet)
///     .with_accept("application/json;odata.metadata=minimal;odata.streaming=false");
/// let resolution = resolve(&request).unwrap();
///
/// assert_eq!(resolution.format(), Format::Json);
/// assert_eq!(resolution.parameter("odata.streaming"), Some("false"));
/// assert_eq!(resolution.encoding(), Some(Charset::Utf8));
/// ```
pub fn resolve(request: &NegotiationRequest<'_>) -> NegotiationResult<FormatResolution> {
	if request.payload_kind == PayloadKind::Unsupported {
		return Err(NegotiationError::InvalidPayloadKind(request.payload_kind));
	}

	let candidates = supported_media_types(request.payload_kind, request.version);
	match request.format {
		Some(format) => resolve_explicit(request, format, &candidates),
		None => negotiate(request, &candidates),
	}
}

/// The media type used for `kind` when `format` is pinned, if any.
pub fn default_media_type(
	kind: PayloadKind,
	format: Format,
	version: ODataVersion,
) -> Option<SupportedMediaType> {
	supported_media_types(kind, version)
		.into_iter()
		.find(|candidate| candidate.format == format)
}

fn resolve_explicit(
	request: &NegotiationRequest<'_>,
	format: Format,
	candidates: &[SupportedMediaType],
) -> NegotiationResult<FormatResolution> {
	let candidate = candidates
		.iter()
		.find(|candidate| candidate.format == format)
		.ok_or(NegotiationError::NoDefaultMediaTypeForFormat(format))?;

	let mut resolution = base_resolution(candidate);
	if candidate.format == Format::Json {
		resolution = resolution.with_parameter(IEEE754_COMPATIBLE, "false");
	}

	tracing::debug!(
		kind = %request.payload_kind,
		%format,
		media_type = %candidate,
		"using default media type for explicit format"
	);
	Ok(resolution.with_encoding(candidate.encoding.map(|_| Charset::Utf8)))
}

/// Ranking key of an (Accept range, candidate) pairing; greater wins.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct MatchRank {
	weight: u16,
	specificity: u8,
	matched_parameters: usize,
	range_order: Reverse<usize>,
	candidate_order: Reverse<usize>,
}

fn negotiate(
	request: &NegotiationRequest<'_>,
	candidates: &[SupportedMediaType],
) -> NegotiationResult<FormatResolution> {
	let accept_text = request.accept.unwrap_or_default();
	let accept = AcceptHeader::parse(accept_text)?;

	let mut best: Option<(MatchRank, &MediaTypeRange, &SupportedMediaType)> = None;
	for (range_index, range) in accept.ranges().iter().enumerate() {
		for (candidate_index, candidate) in candidates.iter().enumerate() {
			let Some(matched_parameters) = match_parameters(range, candidate, request.version) else {
				continue;
			};
			let rank = MatchRank {
				weight: range.weight(),
				specificity: range.specificity(),
				matched_parameters,
				range_order: Reverse(range_index),
				candidate_order: Reverse(candidate_index),
			};
			if best.as_ref().is_none_or(|(current, _, _)| rank > *current) {
				best = Some((rank, range, candidate));
			}
		}
	}

	let Some((_, range, candidate)) = best else {
		let supported = candidates
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ");
		return Err(NegotiationError::ContentTypeNegotiation {
			kind: request.payload_kind,
			supported,
			accept: accept_text.to_string(),
		});
	};

	let mut resolution = base_resolution(candidate);
	if candidate.format == Format::Json {
		match range_parameter(range, IEEE754_COMPATIBLE, request.version) {
			Some(value) => {
				resolution = resolution.with_parameter(IEEE754_COMPATIBLE, value.to_ascii_lowercase());
			}
			// A client that names no format parameter gets the full default rendition
			None if !names_format_parameters(range, request.version) => {
				resolution = resolution.with_parameter(IEEE754_COMPATIBLE, "false");
			}
			None => {}
		}
	}

	let encoding = match candidate.encoding {
		Some(default) => Some(negotiate_encoding(request.accept_charset, range, default)?),
		None => None,
	};

	tracing::debug!(
		kind = %request.payload_kind,
		range = %range,
		media_type = %candidate,
		encoding = ?encoding,
		"negotiated response media type"
	);
	Ok(resolution.with_encoding(encoding))
}

fn base_resolution(candidate: &SupportedMediaType) -> FormatResolution {
	candidate.fixed_parameters.iter().fold(
		FormatResolution::new(candidate.format, candidate.type_name, candidate.subtype_name),
		|resolution, (name, value)| resolution.with_parameter(*name, *value),
	)
}

/// Maps an Accept parameter name to the name the resolver knows it by.
fn canonical_parameter(name: &str, version: ODataVersion) -> Option<&'static str> {
	if let Some(known) = RECOGNIZED_PARAMETERS
		.into_iter()
		.find(|known| known.eq_ignore_ascii_case(name))
	{
		return Some(known);
	}
	if version >= ODataVersion::V401 {
		if name.eq_ignore_ascii_case("metadata") {
			return Some(ODATA_METADATA);
		}
		if name.eq_ignore_ascii_case("streaming") {
			return Some(ODATA_STREAMING);
		}
	}
	None
}

fn range_parameter<'r>(
	range: &'r MediaTypeRange,
	canonical: &str,
	version: ODataVersion,
) -> Option<&'r str> {
	range
		.parameters()
		.iter()
		.find(|(name, _)| canonical_parameter(name, version) == Some(canonical))
		.map(|(_, value)| value.as_str())
}

fn names_format_parameters(range: &MediaTypeRange, version: ODataVersion) -> bool {
	range
		.parameters()
		.iter()
		.any(|(name, _)| canonical_parameter(name, version) != Some(CHARSET))
}

/// Returns the number of structural parameters of `range` satisfied by
/// `candidate`, or `None` when the pairing does not match.
fn match_parameters(
	range: &MediaTypeRange,
	candidate: &SupportedMediaType,
	version: ODataVersion,
) -> Option<usize> {
	if range.weight() == 0 || !range.matches_type(candidate.type_name, candidate.subtype_name) {
		return None;
	}

	let mut matched = 0;
	for (name, value) in range.parameters() {
		let satisfied = match canonical_parameter(name, version) {
			Some(canonical @ (ODATA_METADATA | ODATA_STREAMING | TYPE)) => candidate
				.parameter(canonical)
				.is_some_and(|fixed| fixed.eq_ignore_ascii_case(value)),
			Some(IEEE754_COMPATIBLE) => {
				candidate.format == Format::Json
					&& (value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false"))
			}
			Some(BOUNDARY) => candidate.format == Format::Batch,
			Some(CHARSET) => {
				if candidate.has_text_encoding() {
					continue;
				}
				false
			}
			_ => false,
		};

		if !satisfied {
			tracing::trace!(
				range = %range,
				candidate = %candidate,
				parameter = %name,
				"accept parameter not satisfied"
			);
			return None;
		}
		matched += 1;
	}
	Some(matched)
}

fn negotiate_encoding(
	accept_charset: Option<&str>,
	range: &MediaTypeRange,
	default: Charset,
) -> NegotiationResult<Charset> {
	if let Some(header) = accept_charset.filter(|header| !header.trim().is_empty()) {
		let ranges = parse_charsets(header)?;
		return Ok(select_charset(&ranges, default));
	}

	Ok(range
		.parameter(CHARSET)
		.and_then(Charset::from_name)
		.unwrap_or(default))
}
