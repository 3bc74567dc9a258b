//! Writer configuration.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! version = "4.01"
//! accept = "application/json;odata.metadata=full"
//! accept_charset = "utf-8"
//! ```

use crate::error::{WriterError, WriterResult};
use reinhardt_odata_negotiation::{Format, ODataVersion};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the writer picks the response format and protocol version.
///
/// An explicit `format` and explicit content-type preferences
/// (`accept` / `accept_charset`) are mutually exclusive; each builder clears
/// the other. When neither is set the message's own `Accept` headers are
/// negotiated.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{Format, ODataVersion};
/// use reinhardt_odata_writer::WriterSettings;
///
/// let settings = WriterSettings::default()
///     .with_accept("application/json")
///     .with_format(Format::RawValue)
///     .with_version(ODataVersion::V401);
/// assert_eq!(settings.format, Some(Format::RawValue));
/// assert_eq!(settings.accept, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
	/// Overrides any `OData-Version` header on the message.
	pub version: Option<ODataVersion>,

	/// Pins the output format; Accept headers are then ignored.
	pub format: Option<Format>,

	pub accept: Option<String>,

	pub accept_charset: Option<String>,
}

impl WriterSettings {
	pub fn with_version(mut self, version: ODataVersion) -> Self {
		self.version = Some(version);
		self
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = Some(format);
		self.accept = None;
		self.accept_charset = None;
		self
	}

	pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
		self.accept = Some(accept.into());
		self.format = None;
		self
	}

	pub fn with_accept_charset(mut self, accept_charset: impl Into<String>) -> Self {
		self.accept_charset = Some(accept_charset.into());
		self.format = None;
		self
	}

	/// Sets both content-type preferences at once.
	pub fn with_content_type(
		self,
		accept: impl Into<String>,
		accept_charset: impl Into<String>,
	) -> Self {
		self.with_accept(accept).with_accept_charset(accept_charset)
	}

	/// Whether the settings carry their own Accept preferences.
	pub fn has_content_type(&self) -> bool {
		self.accept.is_some() || self.accept_charset.is_some()
	}

	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> WriterResult<Self> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| WriterError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse settings from a TOML string.
	pub fn from_toml(content: &str) -> WriterResult<Self> {
		let settings: Self = toml::from_str(content).map_err(|e| WriterError::Settings {
			message: e.to_string(),
		})?;

		if settings.format.is_some() && settings.has_content_type() {
			return Err(WriterError::Settings {
				message: "`format` cannot be combined with `accept` or `accept_charset`".to_string(),
			});
		}
		Ok(settings)
	}
}
