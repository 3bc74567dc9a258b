//! End-to-end negotiation scenarios through the facade crate.

use reinhardt_odata::prelude::*;
use rstest::rstest;

fn write_headers(
	kind: PayloadKind,
	settings: WriterSettings,
	accept: Option<&str>,
) -> Result<(FormatResolution, String), WriterError> {
	let mut message = InMemoryMessage::new();
	if let Some(accept) = accept {
		message = message.with_header("Accept", accept);
	}
	let mut writer = ODataMessageWriter::new(message, settings)?;
	let resolution = writer.set_headers_for_payload(kind)?;
	let content_type = writer.message().header("Content-Type").unwrap_or_default();
	Ok((resolution, content_type))
}

#[rstest]
fn test_batch_with_multipart_accept() {
	let (resolution, content_type) =
		write_headers(PayloadKind::Batch, WriterSettings::default(), Some("multipart/mixed")).unwrap();

	assert_eq!(resolution.format(), Format::Batch);
	assert!(content_type.starts_with("multipart/mixed;boundary="));
}

#[rstest]
fn test_value_with_explicit_raw_value() {
	let settings = WriterSettings::default().with_format(Format::RawValue);

	let (resolution, content_type) = write_headers(PayloadKind::Value, settings, None).unwrap();

	assert_eq!(resolution.format(), Format::RawValue);
	assert_eq!(content_type, "text/plain;charset=utf-8");
}

#[rstest]
fn test_resource_with_explicit_batch() {
	let settings = WriterSettings::default().with_format(Format::Batch);

	let err = write_headers(PayloadKind::Resource, settings, None).unwrap_err();

	assert!(matches!(
		err,
		WriterError::Negotiation(NegotiationError::NoDefaultMediaTypeForFormat(Format::Batch))
	));
}

#[rstest]
fn test_resource_set_without_streaming() {
	let (_, content_type) = write_headers(
		PayloadKind::ResourceSet,
		WriterSettings::default(),
		Some("application/json;odata.metadata=minimal;odata.streaming=false"),
	)
	.unwrap();

	assert_eq!(
		content_type,
		"application/json;odata.metadata=minimal;odata.streaming=false;charset=utf-8"
	);
}

#[rstest]
#[case(WriterSettings::default(), None)]
#[case(WriterSettings::default().with_format(Format::Json), None)]
#[case(WriterSettings::default(), Some("application/json"))]
#[case(WriterSettings::default().with_version(ODataVersion::V3), Some("*/*"))]
fn test_unsupported_kind_always_fails(
	#[case] settings: WriterSettings,
	#[case] accept: Option<&str>,
) {
	let err = write_headers(PayloadKind::Unsupported, settings, accept).unwrap_err();

	assert!(matches!(
		err,
		WriterError::Negotiation(NegotiationError::InvalidPayloadKind(PayloadKind::Unsupported))
	));
}

#[rstest]
fn test_default_media_type_for_every_kind() {
	for kind in PayloadKind::ALL {
		if kind == PayloadKind::Unsupported {
			continue;
		}

		let missing = resolve(&NegotiationRequest::new(kind)).unwrap();
		let empty = resolve(&NegotiationRequest::new(kind).with_accept("")).unwrap();
		let default = supported_media_types(kind, ODataVersion::V4)[0];

		assert_eq!(missing, empty, "{kind}");
		assert_eq!(missing.format(), default.format, "{kind}");
		assert_eq!(missing.media_type(), format!("{}/{}", default.type_name, default.subtype_name));
	}
}
