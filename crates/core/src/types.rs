//! Shared identifier and timestamp aliases.
//!
//! The document store assigns opaque string ids and manages RFC 3339
//! timestamps, so the whole codebase works in `String` ids and UTC
//! `chrono` datetimes.

use uuid::Uuid;

/// Opaque document identifier (`$id` in the store).
pub type DocumentId = String;

/// Identifier of the owning user, as issued by the external identity
/// provider. Stored verbatim in the `userId` field of every document.
pub type UserId = String;

/// UTC timestamp, serialized as RFC 3339 on the wire.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new document id.
///
/// Uses a v7 UUID (millisecond timestamp + randomness) in simple form, so
/// ids are unique, time-ordered, and within the store's 36-character id
/// limit.
pub fn new_document_id() -> DocumentId {
    Uuid::now_v7().simple().to_string()
}
