use inventory_app::config::AppConfig;
use inventory_app::system::InventorySystem;
use inventory_core::numeral;
use inventory_core::tracing::setup_tracing;
use inventory_core::{view, VehicleType};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    info!(backend = ?config.store.backend, "Starting inventory");

    let mut system = InventorySystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;

    if !system.auth.is_authenticated() {
        let (username, password) = (config.auth.username.clone(), config.auth.password.clone());
        system
            .login(&username, &password)
            .await
            .map_err(|e| e.to_string())?;
    }

    let snapshot = system.client.snapshot().await.map_err(|e| e.to_string())?;
    if snapshot.unreachable {
        warn!("Store unreachable; figures reflect cached data only");
    }

    for vehicle_type in VehicleType::ALL {
        let summary = view::summarize(&snapshot.items, vehicle_type);
        info!(
            vehicle = vehicle_type.label(),
            low_stock = %numeral::encode(summary.low_stock_count),
            out_of_stock = %numeral::encode(summary.out_of_stock_count),
            total_value = %numeral::encode(summary.total_value),
            total_quantity = %numeral::encode(summary.total_quantity),
            "Dashboard"
        );
    }

    system.shutdown().await;
    Ok(())
}
