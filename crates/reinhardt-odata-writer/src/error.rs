//! Writer error types.

use reinhardt_odata_negotiation::NegotiationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for writer operations.
pub type WriterResult<T> = Result<T, WriterError>;

/// Errors raised while preparing the headers of a response message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriterError {
	/// Format resolution failed.
	#[error(transparent)]
	Negotiation(#[from] NegotiationError),

	/// The message carries an `OData-Version` header the writer cannot speak.
	#[error(
		"The value '{0}' of the OData-Version HTTP header is invalid. Only '3.0', '4.0' and '4.01' are supported as values of the OData-Version header."
	)]
	UnsupportedVersionHeader(String),

	/// A header name or value the underlying message refuses.
	#[error("The value '{value}' is not valid for the HTTP header '{name}'.")]
	InvalidHeaderValue { name: String, value: String },

	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse writer settings: {message}")]
	Settings { message: String },
}
