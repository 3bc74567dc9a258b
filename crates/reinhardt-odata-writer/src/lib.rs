//! # Reinhardt OData Writer
//!
//! Materializes a negotiated format onto a response message: the
//! `Content-Type` header (with canonical parameter order, charset and batch
//! boundary) and the `OData-Version` header.
//!
//! ## Example
//!
//! ```
//! use reinhardt_odata_negotiation::PayloadKind;
//! use reinhardt_odata_writer::{Message, ODataMessageWriter, WriterSettings};
//!
//! let response = http::Response::builder()
//!     .body(())
//!     .unwrap();
//! let mut writer = ODataMessageWriter::new(response, WriterSettings::default()).unwrap();
//! writer.set_headers_for_payload(PayloadKind::Batch).unwrap();
//!
//! let boundary = writer.batch_boundary().unwrap().to_string();
//! let response = writer.into_message();
//! assert_eq!(
//!     response.header("content-type"),
//!     Some(format!("multipart/mixed;boundary={boundary}"))
//! );
//! ```

pub mod content_type;
pub mod error;
pub mod message;
pub mod settings;
pub mod writer;

pub use content_type::ContentTypeHeader;
pub use error::{WriterError, WriterResult};
pub use message::{InMemoryMessage, Message};
pub use settings::WriterSettings;
pub use writer::ODataMessageWriter;
