use anyhow::Result;
use serde::Serialize;

use karma::config::KarmaConfig;
use karma::plugin::KarmaRecord;

/// Export format: every record plus a count.
#[derive(Debug, Serialize)]
struct ExportData {
    total: usize,
    records: Vec<KarmaRecord>,
}

/// Export all karma records as JSON to stdout, highest score first.
pub fn export(config: &KarmaConfig) -> Result<()> {
    let engine = crate::server::setup_engine(config)?;
    let records = engine.store().all()?;

    let data = ExportData {
        total: records.len(),
        records,
    };

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!("Exported {} karma records.", data.total);
    Ok(())
}
