use inventory_app::auth::AuthError;
use inventory_app::config::AppConfig;
use inventory_app::form::ItemForm;
use inventory_app::system::{InventorySystem, SystemError};
use inventory_core::mock::{MockItemStore, StoreCall};
use inventory_core::{InventoryItem, MutationOutcome, Section, VehicleType};
use std::sync::Arc;

fn config(dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.session_flag_path = dir.path().join("is_auth");
    config.assistant.api_key = None;
    config
}

fn part(id: &str, vehicle_type: VehicleType, section: Section, quantity: u32) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: format!("Part {}", id),
        vehicle_type,
        section,
        price: 1000.0,
        quantity,
        description: String::new(),
        image: None,
        min_stock_threshold: 2,
    }
}

fn stock() -> Vec<InventoryItem> {
    vec![
        part("1", VehicleType::Bicycle, Section::Wheels, 10),
        part("2", VehicleType::Bicycle, Section::Frame, 1),
        part("3", VehicleType::Motorbike, Section::Drivetrain, 0),
    ]
}

#[tokio::test]
async fn login_gates_the_initial_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = MockItemStore::new();
    let mut system = InventorySystem::start_with_store(&config(&dir), Arc::new(store.clone()))
        .await
        .unwrap();
    assert!(!system.auth.is_authenticated());
    assert!(store.calls().is_empty());

    let err = system.login("aa", "wrong").await.unwrap_err();
    assert!(matches!(err, SystemError::Auth(AuthError::AuthenticationFailed)));
    assert!(store.calls().is_empty());

    store.expect_list().return_ok(stock());
    system.login("aa", "1234").await.unwrap();
    assert_eq!(system.client.items().await.unwrap().len(), 3);

    system.shutdown().await;
    store.verify();
}

#[tokio::test]
async fn restored_session_loads_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("is_auth"), "true").unwrap();

    let store = MockItemStore::new();
    store.expect_list().return_ok(stock());
    let mut system = InventorySystem::start_with_store(&config(&dir), Arc::new(store.clone()))
        .await
        .unwrap();
    assert!(system.auth.is_authenticated());
    assert_eq!(store.calls(), vec![StoreCall::List]);

    system.logout();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("is_auth")).unwrap(),
        "false"
    );
    system.shutdown().await;
}

#[tokio::test]
async fn view_follows_the_catalog_filter() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("is_auth"), "true").unwrap();
    let store = MockItemStore::new();
    store.expect_list().return_ok(stock());
    let mut system = InventorySystem::start_with_store(&config(&dir), Arc::new(store.clone()))
        .await
        .unwrap();

    let view = system.view().await.unwrap();
    assert_eq!(view.filtered_items.len(), 2);
    assert_eq!(view.summary.low_stock_count, 1);
    assert_eq!(view.summary.total_quantity, 11);

    system.filter.toggle_section(Section::Frame);
    assert_eq!(system.view().await.unwrap().filtered_items[0].id, "2");

    system.filter.set_vehicle_type(VehicleType::Motorbike);
    let view = system.view().await.unwrap();
    assert_eq!(view.filtered_items.len(), 1);
    assert_eq!(view.summary.out_of_stock_count, 1);
    assert_eq!(view.summary.total_value, 0.0);

    system.shutdown().await;
}

#[tokio::test]
async fn saving_forms_goes_through_the_coordinator() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("is_auth"), "true").unwrap();
    let store = MockItemStore::new();
    store.expect_list().return_ok(stock());
    let system = InventorySystem::start_with_store(&config(&dir), Arc::new(store.clone()))
        .await
        .unwrap();

    let mut form = ItemForm::for_add();
    form.name = "Bell".to_string();
    form.price = "၂,၅၀၀".to_string();
    form.quantity = "၄".to_string();
    store
        .expect_create()
        .return_ok(part("srv-1", VehicleType::Bicycle, Section::Accessories, 4));
    assert_eq!(system.save(&form).await.unwrap(), MutationOutcome::Confirmed);

    let calls = store.calls();
    let StoreCall::Create(sent) = &calls[1] else {
        panic!("expected a create call");
    };
    assert_eq!(sent.name, "Bell");
    assert_eq!(sent.price, 2500.0);
    assert_eq!(sent.quantity, 4);
    assert_eq!(sent.min_stock_threshold, 3);
    assert_eq!(sent.section, Section::Accessories);

    let existing = system.client.get("1").await.unwrap().unwrap();
    let mut form = ItemForm::for_edit(&existing);
    form.quantity = "၉".to_string();
    store.expect_replace().return_err(inventory_core::StoreError::Status(500));
    assert_eq!(system.save(&form).await.unwrap(), MutationOutcome::Diverged);
    assert_eq!(system.client.get("1").await.unwrap().unwrap().quantity, 9);

    let blank = ItemForm::for_add();
    assert!(matches!(system.save(&blank).await, Err(SystemError::Form(_))));

    system.shutdown().await;
    store.verify();
}

#[tokio::test]
async fn blank_name_is_never_sent_to_the_assistant() {
    let dir = tempfile::tempdir().unwrap();
    let system = InventorySystem::start_with_store(&config(&dir), Arc::new(MockItemStore::new()))
        .await
        .unwrap();
    assert_eq!(system.suggest(&ItemForm::for_add()).await, None);
    system.shutdown().await;
}
