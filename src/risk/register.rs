//! Load a risk register from CSV (`name,probability,impact`)

use super::scoring::{RiskItem, DEFAULT_RISK_NAME};
use csv::Reader;
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Raw CSV row; blank cells take the usual defaults
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    probability: Option<i64>,
    #[serde(default)]
    impact: Option<i64>,
}

impl CsvRow {
    fn into_item(self) -> RiskItem {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_RISK_NAME.to_string());
        RiskItem::new(name, self.probability.unwrap_or(1), self.impact.unwrap_or(1))
    }
}

/// Read risk items from any CSV source with a header row
pub fn read_risk_register<R: Read>(source: R) -> Result<Vec<RiskItem>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(source);
    let mut items = Vec::new();

    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| format!("risk register row {}: {}", line + 1, e))?;
        items.push(row.into_item());
    }

    Ok(items)
}

/// Load risk items from a CSV file
pub fn load_risk_register(path: &Path) -> Result<Vec<RiskItem>, Box<dyn Error>> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("cannot open risk register {}: {}", path.display(), e))?;
    let items = read_risk_register(file)?;
    log::info!("Loaded {} risks from {}", items.len(), path.display());
    Ok(items)
}
