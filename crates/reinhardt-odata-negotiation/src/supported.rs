//! Supported media type tables, per payload kind and protocol version.
//!
//! Table order is significant: for equally good matches the earlier entry
//! wins, and the first entry of a given format is that format's default.

use crate::charset::Charset;
use crate::kind::{Format, PayloadKind};
use crate::version::ODataVersion;
use std::fmt;

pub const ODATA_METADATA: &str = "odata.metadata";
pub const ODATA_STREAMING: &str = "odata.streaming";
pub const IEEE754_COMPATIBLE: &str = "IEEE754Compatible";
pub const TYPE: &str = "type";
pub const BOUNDARY: &str = "boundary";
pub const CHARSET: &str = "charset";

/// A media type the server can produce for a payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedMediaType {
	pub type_name: &'static str,
	pub subtype_name: &'static str,
	pub fixed_parameters: &'static [(&'static str, &'static str)],
	/// Encoding used when the client expresses no charset preference.
	/// `None` for payloads without a text encoding.
	pub encoding: Option<Charset>,
	pub format: Format,
	pub min_version: ODataVersion,
	pub max_version: ODataVersion,
}

impl SupportedMediaType {
	const fn new(
		type_name: &'static str,
		subtype_name: &'static str,
		fixed_parameters: &'static [(&'static str, &'static str)],
		encoding: Option<Charset>,
		format: Format,
	) -> Self {
		Self {
			type_name,
			subtype_name,
			fixed_parameters,
			encoding,
			format,
			min_version: ODataVersion::V3,
			max_version: ODataVersion::V401,
		}
	}

	const fn until(mut self, max_version: ODataVersion) -> Self {
		self.max_version = max_version;
		self
	}

	const fn since(mut self, min_version: ODataVersion) -> Self {
		self.min_version = min_version;
		self
	}

	pub fn is_available_in(&self, version: ODataVersion) -> bool {
		self.min_version <= version && version <= self.max_version
	}

	/// Case-insensitive lookup of a fixed parameter.
	pub fn parameter(&self, name: &str) -> Option<&'static str> {
		self.fixed_parameters
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| *value)
	}

	pub fn has_text_encoding(&self) -> bool {
		self.encoding.is_some()
	}
}

impl fmt::Display for SupportedMediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_name, self.subtype_name)?;
		for (name, value) in self.fixed_parameters {
			write!(f, ";{name}={value}")?;
		}
		Ok(())
	}
}

const fn json(fixed_parameters: &'static [(&'static str, &'static str)]) -> SupportedMediaType {
	SupportedMediaType::new(
		"application",
		"json",
		fixed_parameters,
		Some(Charset::Utf8),
		Format::Json,
	)
}

const fn xml(
	type_name: &'static str,
	subtype_name: &'static str,
	fixed_parameters: &'static [(&'static str, &'static str)],
) -> SupportedMediaType {
	SupportedMediaType::new(
		type_name,
		subtype_name,
		fixed_parameters,
		Some(Charset::Utf8),
		Format::Atom,
	)
	.until(ODataVersion::V3)
}

static JSON_MEDIA_TYPES: [SupportedMediaType; 12] = [
	json(&[(ODATA_METADATA, "minimal"), (ODATA_STREAMING, "true")]),
	json(&[(ODATA_METADATA, "minimal"), (ODATA_STREAMING, "false")]),
	json(&[(ODATA_METADATA, "minimal")]),
	json(&[(ODATA_METADATA, "full"), (ODATA_STREAMING, "true")]),
	json(&[(ODATA_METADATA, "full"), (ODATA_STREAMING, "false")]),
	json(&[(ODATA_METADATA, "full")]),
	json(&[(ODATA_METADATA, "none"), (ODATA_STREAMING, "true")]),
	json(&[(ODATA_METADATA, "none"), (ODATA_STREAMING, "false")]),
	json(&[(ODATA_METADATA, "none")]),
	json(&[(ODATA_STREAMING, "true")]),
	json(&[(ODATA_STREAMING, "false")]),
	json(&[]),
];

static ATOM_ENTRY_MEDIA_TYPES: [SupportedMediaType; 2] = [
	xml("application", "atom+xml", &[(TYPE, "entry")]),
	xml("application", "atom+xml", &[]),
];

static ATOM_FEED_MEDIA_TYPES: [SupportedMediaType; 2] = [
	xml("application", "atom+xml", &[(TYPE, "feed")]),
	xml("application", "atom+xml", &[]),
];

static XML_MEDIA_TYPES: [SupportedMediaType; 2] = [
	xml("application", "xml", &[]),
	xml("text", "xml", &[]),
];

static ATOM_SERVICE_DOCUMENT_MEDIA_TYPES: [SupportedMediaType; 2] = [
	xml("application", "atomsvc+xml", &[]),
	xml("application", "xml", &[]),
];

static BATCH_MEDIA_TYPES: [SupportedMediaType; 1] = [SupportedMediaType::new(
	"multipart",
	"mixed",
	&[],
	None,
	Format::Batch,
)];

static METADATA_MEDIA_TYPES: [SupportedMediaType; 2] = [
	SupportedMediaType::new("application", "xml", &[], Some(Charset::Utf8), Format::Metadata),
	// CSDL JSON
	SupportedMediaType::new("application", "json", &[], Some(Charset::Utf8), Format::Metadata)
		.since(ODataVersion::V401),
];

static TEXT_VALUE_MEDIA_TYPES: [SupportedMediaType; 1] = [SupportedMediaType::new(
	"text",
	"plain",
	&[],
	Some(Charset::Iso8859_1),
	Format::RawValue,
)];

static BINARY_VALUE_MEDIA_TYPES: [SupportedMediaType; 1] = [SupportedMediaType::new(
	"application",
	"octet-stream",
	&[],
	None,
	Format::RawValue,
)];

fn table_groups(kind: PayloadKind) -> [&'static [SupportedMediaType]; 2] {
	match kind {
		PayloadKind::Unsupported => [&[], &[]],
		PayloadKind::Resource => [&ATOM_ENTRY_MEDIA_TYPES, &JSON_MEDIA_TYPES],
		PayloadKind::ResourceSet => [&ATOM_FEED_MEDIA_TYPES, &JSON_MEDIA_TYPES],
		PayloadKind::Property
		| PayloadKind::EntityReferenceLink
		| PayloadKind::EntityReferenceLinks
		| PayloadKind::Collection
		| PayloadKind::Error => [&JSON_MEDIA_TYPES, &XML_MEDIA_TYPES],
		PayloadKind::ServiceDocument => [&ATOM_SERVICE_DOCUMENT_MEDIA_TYPES, &JSON_MEDIA_TYPES],
		PayloadKind::Parameter => [&JSON_MEDIA_TYPES, &[]],
		PayloadKind::Batch => [&BATCH_MEDIA_TYPES, &[]],
		PayloadKind::MetadataDocument => [&METADATA_MEDIA_TYPES, &[]],
		PayloadKind::Value => [&TEXT_VALUE_MEDIA_TYPES, &[]],
		PayloadKind::BinaryValue => [&BINARY_VALUE_MEDIA_TYPES, &[]],
	}
}

/// Media types offered for `kind` at `version`, in preference order.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::{ODataVersion, PayloadKind, supported_media_types};
///
/// let batch = supported_media_types(PayloadKind::Batch, ODataVersion::V4);
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch[0].to_string(), "multipart/mixed");
///
/// assert!(supported_media_types(PayloadKind::Unsupported, ODataVersion::V4).is_empty());
/// ```
pub fn supported_media_types(kind: PayloadKind, version: ODataVersion) -> Vec<SupportedMediaType> {
	table_groups(kind)
		.into_iter()
		.flatten()
		.filter(|media_type| media_type.is_available_in(version))
		.copied()
		.collect()
}
