//! Random identifiers for new schedule documents.
//!
//! Ids have the shape of a version-4 UUID (`8-4-4-4-12` uppercase hex,
//! version nibble `4`, variant nibble in `8..=B`). Downstream systems only
//! rely on the shape, not on any particular bit source.

use rand::Rng;

/// Fresh document id from the thread-local generator.
pub fn generate_document_id() -> String {
    generate_document_id_with(&mut rand::rng())
}

/// Fresh document id from a caller-provided generator.
pub fn generate_document_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes: [u8; 16] = rng.random();
    bytes[6] = (bytes[6] & 0x0F) | 0x40;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
