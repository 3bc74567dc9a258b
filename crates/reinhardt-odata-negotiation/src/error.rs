//! Negotiation error types.
//!
//! Every message below is part of the observable contract: callers build
//! `406 Not Acceptable` and `400 Bad Request` responses from them verbatim.

use crate::kind::{Format, PayloadKind};
use thiserror::Error;

/// Result type for negotiation operations.
pub type NegotiationResult<T> = Result<T, NegotiationError>;

/// Errors raised while parsing an `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MediaTypeError {
	/// The `q` parameter is not a decimal between 0 and 1.
	#[error(
		"The quality value '{value}' is invalid in the header value '{header}'; it must be a decimal between 0 and 1."
	)]
	InvalidQualityValue {
		/// The offending `q` value.
		value: String,
		/// The whole header text.
		header: String,
	},

	/// A media range without a `/` between type and subtype.
	#[error(
		"The media type '{media_type}' requires a '/' character between its type and subtype in the header value '{header}'."
	)]
	MissingSlash { media_type: String, header: String },

	/// A media range with an empty type or subtype (`/json`, `application/`).
	#[error(
		"The media type '{media_type}' must name both a type and a subtype in the header value '{header}'."
	)]
	EmptyTypeOrSubtype { media_type: String, header: String },

	/// `*/json` and similar ranges.
	#[error(
		"The media type '{media_type}' uses a wildcard type with a specific subtype in the header value '{header}'."
	)]
	WildcardTypeWithSubtype { media_type: String, header: String },

	/// A type, subtype, parameter name or unquoted value that is not a token.
	#[error("The value '{token}' is not a valid token in the header value '{header}'.")]
	InvalidToken { token: String, header: String },

	/// A parameter with no `=` or an empty value.
	#[error("The parameter '{parameter}' has no value in the header value '{header}'.")]
	MissingParameterValue { parameter: String, header: String },

	#[error("The header value '{header}' contains an unterminated quoted string.")]
	UnterminatedQuotedString { header: String },
}

/// Errors raised while parsing an `Accept-Charset` header.
///
/// An unknown but well-formed charset name is not an error; it is simply
/// skipped during selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CharsetError {
	/// A list element that is not a charset token (`===`), or a parameter
	/// other than `q`.
	#[error("The character set '{name}' is invalid in the Accept-Charset header value '{header}'.")]
	InvalidCharsetName { name: String, header: String },

	/// Two charsets run together without a comma (`utf-8 utf-16`).
	#[error(
		"Missing separator between character sets in the Accept-Charset header value '{header}'."
	)]
	MissingSeparatorBetweenCharsets { header: String },

	#[error(
		"The quality value '{value}' is invalid in the header value '{header}'; it must be a decimal between 0 and 1."
	)]
	InvalidQualityValue { value: String, header: String },
}

/// Errors raised by format resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NegotiationError {
	#[error("Cannot set message headers for the invalid payload kind '{0}'.")]
	InvalidPayloadKind(PayloadKind),

	/// The pinned format has no media type for the payload kind.
	#[error("A default MIME type could not be found for the requested payload in format '{0}'.")]
	NoDefaultMediaTypeForFormat(Format),

	/// No supported media type satisfies the `Accept` header.
	#[error(
		"A supported MIME type could not be found that matches the acceptable MIME types for the request. The supported type(s) '{supported}' do not match any of the acceptable MIME types '{accept}'."
	)]
	ContentTypeNegotiation {
		kind: PayloadKind,
		/// Supported media types for the kind, joined with `", "`.
		supported: String,
		/// The `Accept` header text, verbatim.
		accept: String,
	},

	#[error(transparent)]
	MediaType(#[from] MediaTypeError),

	#[error(transparent)]
	Charset(#[from] CharsetError),
}
