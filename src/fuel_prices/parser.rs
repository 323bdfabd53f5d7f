use crate::error::AppError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;

/// Container id used by the listing page layout this parser targets
pub const DEFAULT_CONTAINER_ID: &str = "graphPageLeft";

fn selector(css: &'static str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::Internal(format!("Invalid CSS selector '{}': {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract `label -> price` rows from the price listing page
///
/// Looks for `div#<container_id>`, takes the first table inside it and reads
/// every body row: the first link's text is the label, the second cell holds
/// the price. A page without the container or table yields an empty map.
pub fn parse_price_page(html: &str, container_id: &str) -> Result<HashMap<String, String>, AppError> {
    let div_selector = selector("div")?;
    let table_selector = selector("table")?;
    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let link_selector = selector("a")?;

    let document = Html::parse_document(html);
    let mut prices = HashMap::new();

    let Some(container) = document
        .select(&div_selector)
        .find(|div| div.value().id() == Some(container_id))
    else {
        debug!(container_id, "Price container not found in page");
        return Ok(prices);
    };

    let Some(table) = container.select(&table_selector).next() else {
        debug!(container_id, "No table inside price container");
        return Ok(prices);
    };

    let Some(body) = table.select(&tbody_selector).next() else {
        return Ok(prices);
    };

    for row in body.select(&row_selector) {
        let Some(link) = row.select(&link_selector).next() else {
            debug!("Skipping price row without a label link");
            continue;
        };
        let Some(price_cell) = row.select(&cell_selector).nth(1) else {
            debug!("Skipping price row without a price cell");
            continue;
        };

        prices.insert(element_text(link), element_text(price_cell));
    }

    debug!(rows = prices.len(), "Parsed price listing");
    Ok(prices)
}
