//! HTTP backend against an in-process axum server that behaves like a JSON REST store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use inventory_app::backends::HttpItemStore;
use inventory_core::{
    InventoryActor, InventoryItem, ItemPatch, ItemStore, MutationOutcome, Section, StoreError,
    VehicleType,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Db = Arc<Mutex<Vec<Value>>>;

async fn list(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.lock().unwrap().clone())
}

async fn create(State(db): State<Db>, Json(item): Json<Value>) -> (StatusCode, Json<Value>) {
    db.lock().unwrap().push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn replace(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(item): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let slot = db
        .iter_mut()
        .find(|i| i["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = item.clone();
    Ok(Json(item))
}

async fn patch(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(fields): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let slot = db
        .iter_mut()
        .find(|i| i["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    if let (Some(target), Some(fields)) = (slot.as_object_mut(), fields.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(slot.clone()))
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut db = db.lock().unwrap();
    let before = db.len();
    db.retain(|i| i["id"] != id.as_str());
    if db.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn rest_server(seed: Vec<InventoryItem>) -> (String, Db) {
    let db: Db = Arc::new(Mutex::new(
        seed.iter().map(|i| serde_json::to_value(i).unwrap()).collect(),
    ));
    let app = Router::new()
        .route("/items", get(list).post(create))
        .route("/items/:id", axum::routing::put(replace).patch(patch).delete(remove))
        .with_state(db.clone());
    let addr = serve(app).await;
    (format!("http://{}", addr), db)
}

fn part(id: &str, quantity: u32) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: "Sprocket".to_string(),
        vehicle_type: VehicleType::Motorbike,
        section: Section::Drivetrain,
        price: 18000.0,
        quantity,
        description: "428 pitch".to_string(),
        image: None,
        min_stock_threshold: 2,
    }
}

#[tokio::test]
async fn crud_roundtrip_against_rest_server() {
    let (base_url, db) = rest_server(vec![part("1", 5)]).await;
    let store = HttpItemStore::new(base_url, None).unwrap();

    assert_eq!(store.list().await.unwrap(), vec![part("1", 5)]);

    let created = store.create(&part("2", 1)).await.unwrap();
    assert_eq!(created.id, "2");

    let mut edited = part("1", 5);
    edited.price = 20000.0;
    assert_eq!(store.replace(&edited).await.unwrap().price, 20000.0);

    let patched = store
        .patch("1", &ItemPatch::quantity(4))
        .await
        .unwrap()
        .expect("server echoes the patched item");
    assert_eq!(patched.quantity, 4);
    assert_eq!(patched.price, 20000.0);

    store.delete("2").await.unwrap();

    let stored = db.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["quantity"], 4);
    assert_eq!(stored[0]["type"], "motorbike");
    assert_eq!(stored[0]["minStockThreshold"], 2);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base_url, _db) = rest_server(vec![]).await;
    let store = HttpItemStore::new(base_url, None).unwrap();

    let err = store.patch("missing", &ItemPatch::quantity(1)).await.unwrap_err();
    assert!(matches!(err, StoreError::Status(404)));

    let app = Router::new().route(
        "/items",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let broken = HttpItemStore::new(format!("http://{}", serve(app).await), None).unwrap();
    assert!(matches!(broken.list().await, Err(StoreError::Status(500))));
}

#[tokio::test]
async fn malformed_list_body_is_a_decode_error() {
    let app = Router::new().route("/items", get(|| async { "not json" }));
    let store = HttpItemStore::new(format!("http://{}", serve(app).await), None).unwrap();
    assert!(matches!(store.list().await, Err(StoreError::Decode(_))));
}

/// Store that acknowledges writes without echoing the item.
async fn silent_server() -> (String, Db) {
    let db: Db = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/items",
            get(list).post(|State(db): State<Db>, Json(item): Json<Value>| async move {
                db.lock().unwrap().push(item);
                StatusCode::CREATED
            }),
        )
        .route(
            "/items/:id",
            axum::routing::put(|| async { StatusCode::NO_CONTENT })
                .patch(|| async { StatusCode::NO_CONTENT })
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .with_state(db.clone());
    (format!("http://{}", serve(app).await), db)
}

#[tokio::test]
async fn success_without_body_is_still_success() {
    let (base_url, _db) = silent_server().await;
    let store = HttpItemStore::new(base_url, None).unwrap();

    assert_eq!(store.create(&part("5", 2)).await.unwrap(), part("5", 2));
    assert_eq!(store.replace(&part("5", 3)).await.unwrap(), part("5", 3));
    assert_eq!(store.patch("5", &ItemPatch::quantity(1)).await.unwrap(), None);
}

#[tokio::test]
async fn unrecognised_success_body_is_ignored() {
    let app = Router::new().route(
        "/items/:id",
        axum::routing::put(|| async { Json(serde_json::json!({ "ok": true })) }),
    );
    let store = HttpItemStore::new(format!("http://{}", serve(app).await), None).unwrap();
    assert_eq!(store.replace(&part("5", 3)).await.unwrap(), part("5", 3));
}

#[tokio::test]
async fn coordinator_confirms_writes_acknowledged_without_body() {
    let (base_url, db) = silent_server().await;
    let store = Arc::new(HttpItemStore::new(base_url, None).unwrap());
    let (actor, client) = InventoryActor::new(8);
    let handle = tokio::spawn(actor.run(store));
    client.reload().await.unwrap();

    let added = client
        .add_item(inventory_core::ItemDraft {
            name: "Clutch cable".to_string(),
            vehicle_type: VehicleType::Motorbike,
            section: Section::Cockpit,
            price: 6000.0,
            quantity: 2,
            description: String::new(),
            image: None,
            min_stock_threshold: 1,
        })
        .await
        .unwrap();
    assert_eq!(added.outcome, MutationOutcome::Confirmed);
    assert_eq!(db.lock().unwrap().len(), 1);

    let mut item = client.get(added.id.clone()).await.unwrap().unwrap();
    item.price = 6500.0;
    assert_eq!(client.update_item(item).await.unwrap(), MutationOutcome::Confirmed);
    assert_eq!(client.buy_item(&added.id).await.unwrap(), MutationOutcome::Confirmed);

    let snapshot = client.snapshot().await.unwrap();
    assert!(!snapshot.unreachable);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].quantity, 1);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpItemStore::new(format!("http://{}/", addr), None).unwrap();
    assert!(matches!(store.list().await, Err(StoreError::Transport(_))));
}

#[tokio::test]
async fn coordinator_persists_through_rest_store() {
    let (base_url, db) = rest_server(vec![part("1", 1)]).await;
    let store = Arc::new(HttpItemStore::new(base_url, None).unwrap());
    let (actor, client) = InventoryActor::new(8);
    let handle = tokio::spawn(actor.run(store));

    client.reload().await.unwrap();
    assert_eq!(client.buy_item("1").await.unwrap(), MutationOutcome::Confirmed);
    // out of stock now: no second request
    assert_eq!(client.buy_item("1").await.unwrap(), MutationOutcome::Skipped);

    client.request_delete("1").await.unwrap();
    assert_eq!(client.confirm_delete().await.unwrap(), MutationOutcome::Confirmed);
    assert!(db.lock().unwrap().is_empty());

    // deleting again fails remotely but nothing is restored locally
    client.request_delete("1").await.unwrap();
    assert_eq!(client.confirm_delete().await.unwrap(), MutationOutcome::Diverged);
    assert!(client.snapshot().await.unwrap().unreachable);

    drop(client);
    handle.await.unwrap();
}
