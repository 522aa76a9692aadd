//! Snapshot codec.
//!
//! Serializes the comparable fields of an ingredient link or a step into a
//! canonical JSON text. The same text serves two purposes: string equality is
//! the change-detection test used by the revision diff engine, and the text is
//! stored verbatim as the previous/new payload of a revision entry.
//!
//! ## Determinism Guarantees
//!
//! - Same field values → byte-identical encoding (fixed field order)
//! - Quantities are encoded in normalized decimal form, so `1.0` and `1.00`
//!   encode identically

pub mod codec;

pub use codec::{encode_ingredient, encode_step, IngredientSnapshot, StepSnapshot};
