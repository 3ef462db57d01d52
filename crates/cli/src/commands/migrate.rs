use anyhow::Result;
use algae_history_storage::PgHistoryStore;

use crate::database_config;

pub(crate) async fn run() -> Result<()> {
    let store = PgHistoryStore::new(database_config()?);
    store.migrate().await?;
    println!("history table ready");
    Ok(())
}
