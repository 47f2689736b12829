//! Front matter codec for the entry console.
//!
//! An entry travels to and from the storage backend as one text blob: a
//! `---`-delimited header of `key: value` lines followed by a blank line and
//! the body. [`FrontMatterCodec::encode`] writes that blob from typed
//! metadata; [`FrontMatterCodec::decode`] reads it back on a best-effort
//! basis and never fails.
//!
//! # Key Types
//!
//! - [`FrontMatterCodec`] -- Encode/decode entry points
//! - [`Decoded`] -- Result of decoding: partial metadata plus body
//! - [`PartialMetadata`] -- Metadata where every field may be absent

pub mod front_matter;
pub mod partial;

pub use front_matter::{Decoded, FrontMatterCodec, DELIMITER};
pub use partial::PartialMetadata;
