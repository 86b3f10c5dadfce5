//! Test fixtures for integration tests.

#![allow(dead_code)]

use mongodb::bson::{Document, doc};

/// Generate a batch of test documents.
pub fn generate_test_documents(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| {
            doc! {
                "index": i as i32,
                "name": format!("Document {}", i),
                "category": if i % 2 == 0 { "even" } else { "odd" },
                "value": (i * 10) as i32,
            }
        })
        .collect()
}

/// Documents with a padded payload, so data size grows with `payload_len`.
pub fn padded_documents(count: usize, payload_len: usize) -> Vec<Document> {
    (0..count)
        .map(|i| doc! { "index": i as i32, "payload": "x".repeat(payload_len) })
        .collect()
}
