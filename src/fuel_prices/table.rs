use crate::error::AppError;
use crate::models::FuelType;
use std::collections::HashMap;
use tracing::debug;

/// Scraped unit prices keyed by fuel type
///
/// Values are kept exactly as scraped; [`resolve_price`] normalizes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelPriceTable {
    prices: HashMap<FuelType, String>,
}

impl FuelPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from page labels such as "Diesel prices"
    ///
    /// Rows whose label does not name a supported fuel type are dropped.
    pub fn from_labels<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (label, price) in rows {
            match FuelType::from_price_label(label.as_ref()) {
                Some(fuel) => table.insert(fuel, price),
                None => debug!(label = label.as_ref(), "Ignoring unrelated price row"),
            }
        }
        table
    }

    pub fn insert(&mut self, fuel: FuelType, price: impl Into<String>) {
        self.prices.insert(fuel, price.into());
    }

    /// Raw price string, if the listing had one
    pub fn get(&self, fuel: FuelType) -> Option<&str> {
        self.prices.get(&fuel).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Parse a scraped price, accepting a decimal comma
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

/// Resolve the unit price for `fuel`
///
/// Fails with [`AppError::PriceNotFound`] when the table has no entry, when
/// the entry is not a number, or when it is not strictly positive.
pub fn resolve_price(table: &FuelPriceTable, fuel: FuelType) -> Result<f64, AppError> {
    let raw = table.get(fuel).ok_or_else(|| {
        AppError::PriceNotFound(format!("no '{}' entry in the price listing", fuel.price_label()))
    })?;

    let price = parse_price(raw).ok_or_else(|| {
        AppError::PriceNotFound(format!("listed {} price '{}' is not a number", fuel, raw))
    })?;

    if !(price.is_finite() && price > 0.0) {
        return Err(AppError::PriceNotFound(format!(
            "listed {} price '{}' is not positive",
            fuel, raw
        )));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_price_normalizes_decimal_comma() {
        let table = FuelPriceTable::from_labels([("Diesel prices", "12,34")]);
        assert_eq!(resolve_price(&table, FuelType::Diesel).unwrap(), 12.34);
    }

    #[test]
    fn test_resolve_price_accepts_decimal_point() {
        let table = FuelPriceTable::from_labels([("Gasoline prices", " 14.07 ")]);
        assert_eq!(resolve_price(&table, FuelType::Gasoline).unwrap(), 14.07);
    }

    #[test]
    fn test_empty_table_is_price_not_found() {
        let table = FuelPriceTable::new();
        for fuel in FuelType::ALL {
            assert!(matches!(resolve_price(&table, fuel), Err(AppError::PriceNotFound(_))));
        }
    }

    #[test]
    fn test_other_fuel_missing() {
        let table = FuelPriceTable::from_labels([("Diesel prices", "12,34")]);
        assert!(matches!(
            resolve_price(&table, FuelType::Gasoline),
            Err(AppError::PriceNotFound(_))
        ));
    }

    #[test]
    fn test_zero_and_garbage_are_rejected() {
        let mut table = FuelPriceTable::new();
        table.insert(FuelType::Diesel, "0,00");
        table.insert(FuelType::Gasoline, "n/a");

        let zero = resolve_price(&table, FuelType::Diesel).unwrap_err();
        assert!(zero.to_string().contains("not positive"));

        let garbage = resolve_price(&table, FuelType::Gasoline).unwrap_err();
        assert!(garbage.to_string().contains("not a number"));
    }

    #[test]
    fn test_from_labels_drops_unknown_rows() {
        let table = FuelPriceTable::from_labels([
            ("Diesel prices", "12,34"),
            ("LPG prices", "5,00"),
            ("Electricity prices", "1,20"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(FuelType::Diesel), Some("12,34"));
    }
}
