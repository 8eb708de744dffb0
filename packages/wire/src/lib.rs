//! anet-wire - Schema-driven XML mapping for the Authorize.Net gateway API.
//!
//! Domain entities declare an ordered field table (a [`schema::Schema`]).
//! From that table alone the mapper parses entities out of gateway XML and
//! projects them back into nested [`Structure`] values, which the generic
//! renderer turns into request XML.
//!
//! # Example
//!
//! ```
//! use anet_wire::entities::CreditCard;
//! use anet_wire::{render, Entity, Structure};
//! use roxmltree::Document;
//!
//! let doc = Document::parse("<creditCard><cardNumber>XXXX1111</cardNumber></creditCard>").unwrap();
//! let card = CreditCard::parse(&doc).unwrap();
//! assert_eq!(card.card_num.as_deref(), Some("XXXX1111"));
//!
//! let xml = render(&Structure::from(card.to_wire_form(false)), Some("creditCard"));
//! assert_eq!(xml, "<creditCard><cardNumber>XXXX1111</cardNumber></creditCard>");
//! ```
//!
//! # Architecture
//!
//! - [`xml`]: selector queries over parsed documents
//! - [`structure`]: the nested map/sequence/scalar value
//! - [`schema`]: field descriptors and schema construction
//! - [`mapper`]: the [`Entity`] trait and the parse/project engine
//! - [`entities`]: credit card, address, payment profile, customer profile, transaction
//! - [`render`]: structure to XML text
//! - [`classify`]: error code and text classification
//! - [`response`]: gateway response envelopes
//! - [`error_handler`]: gateway faults from responses
//! - [`request`]: request envelopes, transport seam and gateway client
//! - [`config`]: constants and settings
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod classify;
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod error_handler;
pub mod mapper;
pub mod render;
pub mod request;
pub mod response;
pub mod schema;
pub mod structure;
pub mod xml;

// Re-export commonly used items
pub use classify::{classify, ClassifiedError, ErrorCategory, ErrorField};
pub use error::{GatewayError, Result, SchemaError, WireError};
pub use mapper::Entity;
pub use render::render;
pub use structure::{Fields, Structure};
