//! Macro-generated test suite for `InvoiceStore` contract validation.
//!
//! The `invoice_store_tests!` macro generates a test module that validates
//! any `InvoiceStore` implementation: id assignment, lookups, ordering,
//! partial updates, deletes and the invoice number constraint, including
//! under concurrent writers.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use invoice_tracker::storage::InMemoryInvoiceStore;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find` — insert then read back by id and by number
//! - `test_insert_assigns_increasing_ids`
//! - `test_find_unknown` — unknown id and number give `None`
//! - `test_list_empty` / `test_list_newest_first` / `test_list_ties_by_id`
//! - `test_update_changes_only_given_columns`
//! - `test_update_unknown` — `None`, nothing written
//! - `test_delete_existing` / `test_delete_unknown`
//!
//! ## Constraint
//! - `test_insert_duplicate_number` — `UniqueViolation`, original kept
//! - `test_update_to_taken_number` — `UniqueViolation`, row untouched
//! - `test_update_keeps_own_number`
//! - `test_concurrent_duplicate_inserts` — exactly one writer wins
//! - `test_concurrent_distinct_inserts`

/// Generate a full `InvoiceStore` conformance test suite.
///
/// `$factory` must evaluate to an empty store implementing `InvoiceStore`.
/// It is re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use invoice_tracker::core::error::StorageError;
            use invoice_tracker::core::invoice::InvoiceChanges;
            use invoice_tracker::core::store::InvoiceStore;
            use rust_decimal::Decimal;
            use std::sync::Arc;

            // ==================================================================
            // CRUD — Insert & Find
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find() {
                let store = $factory;
                let created_at = now();

                let inserted = store
                    .insert(new_invoice_at("INV-001", created_at))
                    .await
                    .unwrap();
                assert_eq!(inserted.invoice_number, "INV-001");
                assert_eq!(inserted.amount_due, Decimal::new(15075, 2));
                assert_eq!(inserted.created_at, created_at);
                assert_eq!(inserted.updated_at, created_at);
                assert!(!inserted.paid);

                let by_id = store.find_by_id(inserted.id).await.unwrap();
                assert_eq!(by_id, Some(inserted.clone()));

                let by_number = store.find_by_number("INV-001").await.unwrap();
                assert_eq!(by_number.map(|r| r.id), Some(inserted.id));
            }

            #[tokio::test]
            async fn test_insert_assigns_increasing_ids() {
                let store = $factory;
                let first = store.insert(new_invoice("INV-001")).await.unwrap();
                let second = store.insert(new_invoice("INV-002")).await.unwrap();
                assert!(first.id >= 1);
                assert!(second.id > first.id);
            }

            #[tokio::test]
            async fn test_find_unknown() {
                let store = $factory;
                assert!(store.find_by_id(9_999).await.unwrap().is_none());
                assert!(store.find_by_number("INV-404").await.unwrap().is_none());
            }

            // ==================================================================
            // CRUD — List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;
                let base = now();
                let oldest = store
                    .insert(new_invoice_at("INV-001", offset(base, -20)))
                    .await
                    .unwrap();
                let newest = store
                    .insert(new_invoice_at("INV-002", base))
                    .await
                    .unwrap();
                let middle = store
                    .insert(new_invoice_at("INV-003", offset(base, -10)))
                    .await
                    .unwrap();

                let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
            }

            #[tokio::test]
            async fn test_list_ties_by_id() {
                let store = $factory;
                let created_at = now();
                let first = store
                    .insert(new_invoice_at("INV-001", created_at))
                    .await
                    .unwrap();
                let second = store
                    .insert(new_invoice_at("INV-002", created_at))
                    .await
                    .unwrap();

                let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![second.id, first.id]);
            }

            // ==================================================================
            // CRUD — Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_changes_only_given_columns() {
                let store = $factory;
                let inserted = store.insert(new_invoice("INV-001")).await.unwrap();
                let updated_at = offset(inserted.updated_at, 1);

                let changes = InvoiceChanges {
                    paid: Some(true),
                    amount_due: Some(Decimal::new(20000, 2)),
                    ..Default::default()
                };
                let updated = store
                    .update(inserted.id, changes, updated_at)
                    .await
                    .unwrap()
                    .expect("row exists");

                assert!(updated.paid);
                assert_eq!(updated.amount_due, Decimal::new(200, 0));
                assert_eq!(updated.updated_at, updated_at);
                assert_eq!(updated.invoice_number, inserted.invoice_number);
                assert_eq!(updated.client_name, inserted.client_name);
                assert_eq!(updated.client_email, inserted.client_email);
                assert_eq!(updated.due_date, inserted.due_date);
                assert_eq!(updated.created_at, inserted.created_at);

                let stored = store.find_by_id(inserted.id).await.unwrap();
                assert_eq!(stored, Some(updated));
            }

            #[tokio::test]
            async fn test_update_unknown() {
                let store = $factory;
                let changes = InvoiceChanges {
                    paid: Some(true),
                    ..Default::default()
                };
                let result = store.update(9_999, changes, now()).await.unwrap();
                assert!(result.is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            // ==================================================================
            // CRUD — Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let doomed = store.insert(new_invoice("INV-001")).await.unwrap();
                let kept = store.insert(new_invoice("INV-002")).await.unwrap();

                assert!(store.delete(doomed.id).await.unwrap());
                assert!(store.find_by_id(doomed.id).await.unwrap().is_none());
                assert_eq!(store.find_by_id(kept.id).await.unwrap(), Some(kept));
            }

            #[tokio::test]
            async fn test_delete_unknown() {
                let store = $factory;
                assert!(!store.delete(9_999).await.unwrap());
            }

            #[tokio::test]
            async fn test_deleted_id_not_reused() {
                let store = $factory;
                let first = store.insert(new_invoice("INV-001")).await.unwrap();
                store.delete(first.id).await.unwrap();
                let second = store.insert(new_invoice("INV-002")).await.unwrap();
                assert!(second.id > first.id);
            }

            // ==================================================================
            // Invoice number constraint
            // ==================================================================

            #[tokio::test]
            async fn test_insert_duplicate_number() {
                let store = $factory;
                let original = store.insert(new_invoice("INV-001")).await.unwrap();

                let err = store.insert(new_invoice("INV-001")).await.unwrap_err();
                assert!(
                    matches!(&err, StorageError::UniqueViolation { invoice_number, .. } if invoice_number == "INV-001"),
                    "unexpected error: {err:?}"
                );

                let rows = store.list().await.unwrap();
                assert_eq!(rows, vec![original]);
            }

            #[tokio::test]
            async fn test_update_to_taken_number() {
                let store = $factory;
                store.insert(new_invoice("INV-001")).await.unwrap();
                let other = store.insert(new_invoice("INV-002")).await.unwrap();

                let changes = InvoiceChanges {
                    invoice_number: Some("INV-001".to_string()),
                    paid: Some(true),
                    ..Default::default()
                };
                let err = store
                    .update(other.id, changes, offset(other.updated_at, 1))
                    .await
                    .unwrap_err();
                assert!(matches!(err, StorageError::UniqueViolation { .. }));

                assert_eq!(store.find_by_id(other.id).await.unwrap(), Some(other));
            }

            #[tokio::test]
            async fn test_update_keeps_own_number() {
                let store = $factory;
                let inserted = store.insert(new_invoice("INV-001")).await.unwrap();

                let changes = InvoiceChanges {
                    invoice_number: Some("INV-001".to_string()),
                    ..Default::default()
                };
                let updated = store
                    .update(inserted.id, changes, offset(inserted.updated_at, 1))
                    .await
                    .unwrap()
                    .expect("row exists");
                assert_eq!(updated.invoice_number, "INV-001");
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_duplicate_inserts() {
                let store = Arc::new($factory);
                let mut handles = Vec::new();
                for _ in 0..8 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.insert(new_invoice("INV-RACE")).await
                    }));
                }

                let mut winners = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Ok(_) => winners += 1,
                        Err(StorageError::UniqueViolation { .. }) => {}
                        Err(other) => panic!("unexpected error: {other:?}"),
                    }
                }

                assert_eq!(winners, 1);
                assert_eq!(store.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_distinct_inserts() {
                let store = Arc::new($factory);
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.insert(new_invoice(&format!("INV-{i:03}"))).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(store.list().await.unwrap().len(), 10);
            }
        }
    };
}
