//! End-to-end CRUD tests driving `CollectionClient` over the in-memory
//! backend.

use bson::{Document, doc};
use docshelf::memory::InMemoryCollection;
use docshelf::prelude::*;
use serde::{Deserialize, Serialize};

async fn seeded_client() -> CollectionClient<InMemoryCollection> {
    let backend = InMemoryCollection::new();
    let client = CollectionClient::new(backend);
    let animals = [
        ("Luna", "Dog", 3),
        ("Milo", "Cat", 2),
        ("Bella", "Dog", 5),
        ("Oliver", "Cat", 1),
        ("Rocky", "Dog", 7),
        ("Daisy", "Dog", 4),
        ("Simba", "Cat", 6),
        ("Coco", "Bird", 2),
        ("Max", "Dog", 9),
        ("Lily", "Cat", 3),
    ];
    for (id, (name, animal_type, age)) in animals.iter().enumerate() {
        let inserted = client
            .create(doc! {
                "id": (id + 1) as i64,
                "name": *name,
                "animal_type": *animal_type,
                "age": *age,
            })
            .await;
        assert!(inserted);
    }
    client
}

fn names(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .map(|document| document.get_str("name").unwrap())
        .collect()
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let client = CollectionClient::new(InMemoryCollection::new());

    assert!(client.create(doc! { "name": "Luna", "age": 3 }).await);

    let found = client
        .read(ReadQuery::builder().filter(doc! { "name": "Luna" }).build())
        .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_i32("age").unwrap(), 3);
    // The backend assigns an identifier on insert.
    assert!(found[0].contains_key("_id"));
}

#[tokio::test]
async fn create_empty_document_returns_false_without_side_effects() {
    let client = CollectionClient::new(InMemoryCollection::new());

    assert!(!client.create(doc! {}).await);

    let all = client.read(ReadQuery::builder().build()).await;
    assert!(all.is_empty());
}

#[tokio::test]
async fn read_empty_collection_returns_empty_vec() {
    let client = CollectionClient::new(InMemoryCollection::new());

    let found = client
        .read(ReadQuery::builder().filter(doc! { "name": "Luna" }).build())
        .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn read_with_sort_skip_and_limit_pages_results() {
    let mut client = seeded_client().await;

    let page = client
        .read(
            ReadQuery::builder()
                .filter(doc! { "animal_type": "Dog" })
                .sort("age", SortDirection::Asc)
                .skip(1)
                .limit(2)
                .build(),
        )
        .await;

    // Dogs by ascending age: Luna 3, Daisy 4, Bella 5, Rocky 7, Max 9.
    assert_eq!(names(&page), vec!["Daisy", "Bella"]);
    client.close().await;
}

#[tokio::test]
async fn read_with_operator_filter_and_projection() {
    let client = seeded_client().await;

    let found = client
        .read(
            ReadQuery::builder()
                .filter(doc! { "age": { "$gte": 6 } })
                .projection(doc! { "name": 1, "_id": 0 })
                .sort("age", SortDirection::Desc)
                .build(),
        )
        .await;

    assert_eq!(names(&found), vec!["Max", "Rocky", "Simba"]);
    for document in &found {
        assert_eq!(document.len(), 1);
    }
}

#[tokio::test]
async fn update_one_wraps_plain_fields_and_touches_only_the_target() {
    let client = seeded_client().await;

    let modified = client
        .update(doc! { "id": 1_i64 }, doc! { "name": "Luna Jr" }, false)
        .await
        .unwrap();
    assert_eq!(modified, 1);

    let updated = client
        .read(ReadQuery::builder().filter(doc! { "id": 1_i64 }).build())
        .await;
    assert_eq!(updated[0].get_str("name").unwrap(), "Luna Jr");
    assert_eq!(updated[0].get_i32("age").unwrap(), 3);

    // Nobody else was renamed.
    let renamed = client
        .read(ReadQuery::builder().filter(doc! { "name": "Luna Jr" }).build())
        .await;
    assert_eq!(renamed.len(), 1);
}

#[tokio::test]
async fn update_many_with_operator_document() {
    let client = seeded_client().await;

    let modified = client
        .update(
            doc! { "animal_type": "Cat" },
            doc! { "$inc": { "age": 1 } },
            true,
        )
        .await
        .unwrap();
    assert_eq!(modified, 4);

    let cats = client
        .read(
            ReadQuery::builder()
                .filter(doc! { "animal_type": "Cat" })
                .sort("age", SortDirection::Asc)
                .build(),
        )
        .await;
    let ages: Vec<i64> = cats
        .iter()
        .map(|document| document.get("age").unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(ages, vec![2, 3, 4, 7]);
}

#[tokio::test]
async fn update_with_empty_document_is_rejected() {
    let client = seeded_client().await;

    let err = client
        .update(doc! { "id": 1_i64 }, doc! {}, false)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreClientError::InvalidArgument(_)));
}

#[tokio::test]
async fn update_with_no_match_returns_zero() {
    let client = seeded_client().await;

    let modified = client
        .update(doc! { "name": "Ghost" }, doc! { "age": 1 }, true)
        .await
        .unwrap();
    assert_eq!(modified, 0);
}

#[tokio::test]
async fn delete_many_removes_every_match() {
    let client = seeded_client().await;

    let removed = client
        .delete(doc! { "animal_type": "Cat" }, true)
        .await
        .unwrap();
    assert_eq!(removed, 4);

    let leftovers = client
        .read(ReadQuery::builder().filter(doc! { "animal_type": "Cat" }).build())
        .await;
    assert!(leftovers.is_empty());

    let remaining = client.read(ReadQuery::builder().build()).await;
    assert_eq!(remaining.len(), 6);
}

#[tokio::test]
async fn delete_one_removes_a_single_match() {
    let client = seeded_client().await;

    let removed = client
        .delete(doc! { "animal_type": "Dog" }, false)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let dogs = client
        .read(ReadQuery::builder().filter(doc! { "animal_type": "Dog" }).build())
        .await;
    assert_eq!(dogs.len(), 4);
}

#[tokio::test]
async fn close_is_idempotent_and_later_operations_degrade() {
    let mut client = seeded_client().await;

    client.close().await;
    assert!(!client.is_open());
    client.close().await;

    assert!(!client.create(doc! { "name": "Late" }).await);
    assert!(client.read(ReadQuery::builder().build()).await.is_empty());
    assert_eq!(
        client.update(doc! {}, doc! { "age": 1 }, true).await.unwrap(),
        0
    );
    assert_eq!(client.delete(doc! {}, true).await.unwrap(), 0);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Animal {
    name: String,
    animal_type: String,
    age: i64,
}

#[tokio::test]
async fn typed_documents_round_trip_through_the_client() {
    let client = CollectionClient::new(InMemoryCollection::new());

    let animal = Animal {
        name: "Luna".to_string(),
        animal_type: "Dog".to_string(),
        age: 3,
    };
    assert!(client.create(to_document(&animal).unwrap()).await);

    let mut found = client
        .read(ReadQuery::builder().filter(doc! { "name": "Luna" }).build())
        .await;
    let mut document = found.remove(0);
    document.remove("_id");

    let decoded: Animal = from_document(document).unwrap();
    assert_eq!(decoded, animal);
}
