//! Item catalog
//!
//! Items are static configuration: loaded once at startup, immutable
//! during a run. A JSON file can override the built-in defaults.

use shared::error::AppError;
use shared::models::Item;

/// Load the item catalog.
///
/// Reads `path` if given (a JSON array of items), otherwise returns the
/// built-in default catalog. A present-but-broken file is a startup
/// error, not a silent fallback.
pub fn load_items(path: Option<&str>) -> Result<Vec<Item>, AppError> {
    let items = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .map_err(|e| AppError::internal(format!("Cannot read item catalog {p}: {e}")))?;
            serde_json::from_str::<Vec<Item>>(&raw)
                .map_err(|e| AppError::internal(format!("Invalid item catalog {p}: {e}")))?
        }
        None => default_items(),
    };

    if items.is_empty() {
        return Err(AppError::internal("Item catalog is empty"));
    }
    for item in &items {
        if item.id.is_empty() || item.daily_rate < 0.0 || item.initial_qty < 0.0 {
            return Err(AppError::internal(format!(
                "Invalid catalog entry: {:?}",
                item.id
            )));
        }
    }
    Ok(items)
}

/// Built-in demo catalog: a small industrial supplies portfolio
fn default_items() -> Vec<Item> {
    vec![
        Item {
            id: "ITM-STEEL".into(),
            name: "Steel Coil".into(),
            unit: "t".into(),
            base_price: 412.50,
            daily_rate: 3.2,
            initial_qty: 480.0,
        },
        Item {
            id: "ITM-COPPER".into(),
            name: "Copper Wire".into(),
            unit: "kg".into(),
            base_price: 8.75,
            daily_rate: 140.0,
            initial_qty: 21_000.0,
        },
        Item {
            id: "ITM-RESIN".into(),
            name: "Polymer Resin".into(),
            unit: "kg".into(),
            base_price: 2.10,
            daily_rate: 520.0,
            initial_qty: 78_000.0,
        },
        Item {
            id: "ITM-PALLET".into(),
            name: "Euro Pallet".into(),
            unit: "pcs".into(),
            base_price: 11.40,
            daily_rate: 60.0,
            initial_qty: 9_000.0,
        },
        Item {
            id: "ITM-LUBE".into(),
            name: "Machine Lubricant".into(),
            unit: "l".into(),
            base_price: 6.30,
            daily_rate: 18.0,
            initial_qty: 2_700.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let items = load_items(None).unwrap();
        assert!(!items.is_empty());
        for item in &items {
            assert!(item.daily_rate > 0.0);
            assert!(item.initial_qty > 0.0);
            assert!(item.base_price > 0.0);
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_items(Some("/nonexistent/items.json")).is_err());
    }
}
