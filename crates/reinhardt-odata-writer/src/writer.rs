//! Response message writer.

use crate::content_type::ContentTypeHeader;
use crate::error::{WriterError, WriterResult};
use crate::message::{ACCEPT, ACCEPT_CHARSET, CONTENT_TYPE, Message, ODATA_VERSION};
use crate::settings::WriterSettings;
use reinhardt_odata_negotiation::{
	FormatResolution, NegotiationRequest, ODataVersion, PayloadKind, resolve,
};

/// Prepares the `Content-Type` and `OData-Version` headers of a response.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::PayloadKind;
/// use reinhardt_odata_writer::{InMemoryMessage, Message, ODataMessageWriter, WriterSettings};
///
/// let message = InMemoryMessage::new()
///     .with_header("Accept", "application/json;odata.metadata=full");
/// let mut writer = ODataMessageWriter::new(message, WriterSettings::default()).unwrap();
///
/// writer.set_headers_for_payload(PayloadKind::Resource).unwrap();
///
/// let message = writer.into_message();
/// assert_eq!(
///     message.header("Content-Type").as_deref(),
///     Some("application/json;odata.metadata=full;odata.streaming=true;charset=utf-8")
/// );
/// assert_eq!(message.header("OData-Version").as_deref(), Some("4.0"));
/// ```
#[derive(Debug)]
pub struct ODataMessageWriter<M: Message> {
	message: M,
	settings: WriterSettings,
	version: ODataVersion,
	batch_boundary: Option<String>,
}

impl<M: Message> ODataMessageWriter<M> {
	/// Creates a writer over `message`.
	///
	/// The protocol version comes from the settings when given (and is
	/// written to the message right away), otherwise from the message's
	/// `OData-Version` header, otherwise 4.0.
	///
	/// # Errors
	///
	/// Returns [`WriterError::UnsupportedVersionHeader`] when the message
	/// carries an `OData-Version` value other than 3.0, 4.0 or 4.01.
	pub fn new(mut message: M, settings: WriterSettings) -> WriterResult<Self> {
		let version = match settings.version {
			Some(version) => {
				message.set_header(ODATA_VERSION, version.as_str())?;
				version
			}
			None => match message.header(ODATA_VERSION) {
				Some(value) => match ODataVersion::parse(&value) {
					Some(version) => version,
					None => return Err(WriterError::UnsupportedVersionHeader(value)),
				},
				None => ODataVersion::default(),
			},
		};

		tracing::trace!(%version, "created message writer");
		Ok(Self {
			message,
			settings,
			version,
			batch_boundary: None,
		})
	}

	pub fn version(&self) -> ODataVersion {
		self.version
	}

	pub fn settings(&self) -> &WriterSettings {
		&self.settings
	}

	pub fn message(&self) -> &M {
		&self.message
	}

	pub fn into_message(self) -> M {
		self.message
	}

	/// Boundary of the last batch payload prepared by this writer.
	pub fn batch_boundary(&self) -> Option<&str> {
		self.batch_boundary.as_deref()
	}

	/// Resolves the format for `kind` and writes `Content-Type` and
	/// `OData-Version`. A failed resolution leaves the message as it was,
	/// which still includes the `OData-Version` written by [`Self::new`]
	/// for a configured version.
	///
	/// # Errors
	///
	/// Any [`NegotiationError`](reinhardt_odata_negotiation::NegotiationError)
	/// from resolution, or [`WriterError::InvalidHeaderValue`] if the
	/// message refuses a header.
	pub fn set_headers_for_payload(&mut self, kind: PayloadKind) -> WriterResult<FormatResolution> {
		let resolution = self.resolve_format(kind)?;
		let content_type = ContentTypeHeader::build(&resolution);

		self.message.set_header(CONTENT_TYPE, content_type.value())?;
		self.message.set_header(ODATA_VERSION, self.version.as_str())?;
		self.batch_boundary = content_type.boundary().map(str::to_string);

		tracing::debug!(
			%kind,
			content_type = %content_type,
			version = %self.version,
			"set response headers for payload"
		);
		Ok(resolution)
	}

	fn resolve_format(&self, kind: PayloadKind) -> WriterResult<FormatResolution> {
		let mut request = NegotiationRequest::new(kind).with_version(self.version);

		if let Some(format) = self.settings.format {
			return Ok(resolve(&request.with_format(format))?);
		}

		if self.settings.has_content_type() {
			request.accept = self.settings.accept.as_deref();
			request.accept_charset = self.settings.accept_charset.as_deref();
			return Ok(resolve(&request)?);
		}

		let accept = self.message.header(ACCEPT);
		let accept_charset = self.message.header(ACCEPT_CHARSET);
		request.accept = accept.as_deref();
		request.accept_charset = accept_charset.as_deref();
		Ok(resolve(&request)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::message::InMemoryMessage;
	use reinhardt_odata_negotiation::Format;
	use rstest::rstest;

	#[rstest]
	#[case(None, ODataVersion::V4)]
	#[case(Some("4.01"), ODataVersion::V401)]
	#[case(Some("3.0;NetFx"), ODataVersion::V3)]
	fn test_version_from_message(#[case] header: Option<&str>, #[case] expected: ODataVersion) {
		// Arrange
		let mut message = InMemoryMessage::new();
		if let Some(header) = header {
			message = message.with_header(ODATA_VERSION, header);
		}

		// Act
		let writer = ODataMessageWriter::new(message, WriterSettings::default()).unwrap();

		// Assert
		assert_eq!(writer.version(), expected);
	}

	#[rstest]
	fn test_settings_version_overwrites_header() {
		let message = InMemoryMessage::new().with_header(ODATA_VERSION, "4.0");
		let settings = WriterSettings::default().with_version(ODataVersion::V3);

		let writer = ODataMessageWriter::new(message, settings).unwrap();

		assert_eq!(writer.version(), ODataVersion::V3);
		assert_eq!(writer.message().header(ODATA_VERSION).as_deref(), Some("3.0"));
	}

	#[rstest]
	fn test_invalid_version_header() {
		let message = InMemoryMessage::new().with_header(ODATA_VERSION, "5.0");

		let err = ODataMessageWriter::new(message, WriterSettings::default()).unwrap_err();

		assert!(matches!(err, WriterError::UnsupportedVersionHeader(ref value) if value == "5.0"));
	}

	#[rstest]
	fn test_failed_resolution_writes_nothing() {
		// Arrange
		let settings = WriterSettings::default().with_format(Format::Batch);
		let mut writer = ODataMessageWriter::new(InMemoryMessage::new(), settings).unwrap();

		// Act
		let result = writer.set_headers_for_payload(PayloadKind::Resource);

		// Assert
		assert!(result.is_err());
		assert!(writer.message().headers().is_empty());
		assert_eq!(writer.batch_boundary(), None);
	}

	#[rstest]
	fn test_failed_resolution_keeps_configured_version() {
		// Arrange
		let settings = WriterSettings::default()
			.with_version(ODataVersion::V401)
			.with_format(Format::Batch);
		let mut writer = ODataMessageWriter::new(InMemoryMessage::new(), settings).unwrap();

		// Act
		let result = writer.set_headers_for_payload(PayloadKind::Resource);

		// Assert
		assert!(result.is_err());
		assert_eq!(writer.message().header(CONTENT_TYPE), None);
		assert_eq!(writer.message().header(ODATA_VERSION).as_deref(), Some("4.01"));
	}

	#[rstest]
	fn test_batch_boundary_tracks_last_payload() {
		let mut writer =
			ODataMessageWriter::new(InMemoryMessage::new(), WriterSettings::default()).unwrap();

		writer.set_headers_for_payload(PayloadKind::Batch).unwrap();
		let boundary = writer.batch_boundary().map(str::to_string);
		assert!(boundary.is_some());

		writer.set_headers_for_payload(PayloadKind::Resource).unwrap();
		assert_eq!(writer.batch_boundary(), None);
	}
}
