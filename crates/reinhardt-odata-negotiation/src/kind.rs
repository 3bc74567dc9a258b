//! Payload kinds and output formats

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of resource representation being written.
///
/// Every response payload belongs to exactly one kind, and the kind decides
/// which media types the server is able to produce for it.
///
/// # Examples
///
/// ```
/// use reinhardt_odata_negotiation::PayloadKind;
///
/// assert_eq!(PayloadKind::ResourceSet.to_string(), "ResourceSet");
/// assert_eq!(PayloadKind::default(), PayloadKind::Unsupported);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PayloadKind {
	/// No valid kind. Headers can never be produced for it.
	#[default]
	Unsupported,
	/// A single entity.
	Resource,
	/// A collection of entities (a feed).
	ResourceSet,
	/// A single property value.
	Property,
	/// A single entity reference link.
	EntityReferenceLink,
	/// A collection of entity reference links.
	EntityReferenceLinks,
	/// A collection of primitive or complex values.
	Collection,
	/// A multipart batch response.
	Batch,
	/// The service metadata document.
	MetadataDocument,
	/// An error payload.
	Error,
	/// The service document.
	ServiceDocument,
	/// A raw primitive value.
	Value,
	/// A raw binary value.
	BinaryValue,
	/// Action or function parameters.
	Parameter,
}

impl PayloadKind {
	/// Every payload kind, in declaration order.
	pub const ALL: [PayloadKind; 14] = [
		PayloadKind::Unsupported,
		PayloadKind::Resource,
		PayloadKind::ResourceSet,
		PayloadKind::Property,
		PayloadKind::EntityReferenceLink,
		PayloadKind::EntityReferenceLinks,
		PayloadKind::Collection,
		PayloadKind::Batch,
		PayloadKind::MetadataDocument,
		PayloadKind::Error,
		PayloadKind::ServiceDocument,
		PayloadKind::Value,
		PayloadKind::BinaryValue,
		PayloadKind::Parameter,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			PayloadKind::Unsupported => "Unsupported",
			PayloadKind::Resource => "Resource",
			PayloadKind::ResourceSet => "ResourceSet",
			PayloadKind::Property => "Property",
			PayloadKind::EntityReferenceLink => "EntityReferenceLink",
			PayloadKind::EntityReferenceLinks => "EntityReferenceLinks",
			PayloadKind::Collection => "Collection",
			PayloadKind::Batch => "Batch",
			PayloadKind::MetadataDocument => "MetadataDocument",
			PayloadKind::Error => "Error",
			PayloadKind::ServiceDocument => "ServiceDocument",
			PayloadKind::Value => "Value",
			PayloadKind::BinaryValue => "BinaryValue",
			PayloadKind::Parameter => "Parameter",
		}
	}
}

impl fmt::Display for PayloadKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The output format a payload is serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
	/// OData JSON.
	#[serde(alias = "json")]
	Json,
	/// Multipart batch.
	#[serde(alias = "batch")]
	Batch,
	/// CSDL metadata document.
	#[serde(alias = "metadata")]
	Metadata,
	/// Raw value (text or binary).
	#[serde(alias = "raw_value", alias = "rawvalue")]
	RawValue,
	/// Atom / plain XML, only offered by protocol version 3.0.
	#[serde(alias = "atom")]
	Atom,
}

impl Format {
	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Json => "Json",
			Format::Batch => "Batch",
			Format::Metadata => "Metadata",
			Format::RawValue => "RawValue",
			Format::Atom => "Atom",
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
