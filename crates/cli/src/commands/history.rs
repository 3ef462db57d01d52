use anyhow::Result;
use algae_history_core::{HistoryPayload, Measurement};

use crate::{database_config, history_service};

pub(crate) async fn run_list() -> Result<()> {
    let service = history_service(database_config()?);
    let records = service.list().await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

pub(crate) async fn run_record(
    file_name: String,
    timestamp: String,
    total_cells: Option<String>,
    density: Option<String>,
) -> Result<()> {
    let payload = HistoryPayload {
        timestamp: Some(timestamp),
        file_name: Some(file_name),
        total_cells: total_cells.map(Measurement::Text),
        density_cells_ml: density.map(Measurement::Text),
    };
    // Validate before touching configuration so bad input fails fast.
    let record = payload.validate()?;

    let service = history_service(database_config()?);
    let id = service.save(record).await?;
    println!("{}", serde_json::json!({ "id": id }));
    Ok(())
}
