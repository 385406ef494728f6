//! Layered result merging with explicit precedence.
//!
//! Store operations return the stored document reshaped against the
//! caller's own context: lookup fields (and, for account `set`, the
//! registration payload) fill in whatever the stored document lacks. The
//! original implementation expressed this as chained object spreads with
//! precedence implied by argument order; here it is one function with the
//! order spelled out.

use bson::Document;

/// Merge `fallbacks` under `stored`.
///
/// Precedence, highest first: `stored`, then `fallbacks[0]`, then
/// `fallbacks[1]`, and so on. A layer contributes a field only when every
/// higher layer lacks it; stored values always win on conflict, even when
/// the stored value is BSON null.
pub fn layered(stored: Document, fallbacks: &[Document]) -> Document {
    let mut merged = Document::new();
    for layer in fallbacks.iter().rev() {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in stored {
        merged.insert(key, value);
    }
    merged
}
