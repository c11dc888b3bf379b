use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::billing::amounts::InvoiceStats;
use crate::billing::listing::{query_invoices, InvoiceQuery, Page};
use crate::billing::status::merge_records;
use crate::error::AppError;
use crate::models::invoice::{GatewayFattura, Invoice, StoredFattura};

/// Largest page the list endpoint serves.
pub const MAX_PER_PAGE: usize = 100;

fn invoice_stats(invoices: &[Invoice]) -> Result<InvoiceStats, AppError> {
    InvoiceStats::from_invoices(invoices).map_err(|_| {
        AppError::BadRequest("Invoice amounts exceed the supported range".into())
    })
}

/// Upstream records to render plus the table query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    pub local: Vec<StoredFattura>,
    #[serde(default)]
    pub gateway: Vec<GatewayFattura>,
    #[serde(flatten)]
    pub query: InvoiceQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub page: Page<Invoice>,
    /// Computed over every record, not only the returned page
    pub stats: InvoiceStats,
}

/// Dashboard statistics for a posted invoice list.
pub async fn stats_handler(
    Json(invoices): Json<Vec<Invoice>>,
) -> Result<Json<InvoiceStats>, AppError> {
    Ok(Json(invoice_stats(&invoices)?))
}

/// Normalizes a mixed local/gateway listing and returns one page of rows.
///
/// Local records are folded through their gateway status code, legacy
/// gateway records through their SDI identifier. Statistics cover every
/// record, the page only the rows matching the query.
///
/// # Errors
///
/// Returns `BadRequest` when `perPage` exceeds `MAX_PER_PAGE` or when the
/// amounts cannot be summed.
pub async fn list_handler(Json(request): Json<ListRequest>) -> Result<Json<ListResponse>, AppError> {
    if request.query.per_page > MAX_PER_PAGE {
        return Err(AppError::BadRequest(format!(
            "perPage must be at most {MAX_PER_PAGE}"
        )));
    }

    let rows = merge_records(&request.local, &request.gateway);
    let stats = invoice_stats(&rows)?;
    let page = query_invoices(&rows, &request.query);

    info!(
        "Listed {} of {} invoice(s), page {}/{}",
        page.items.len(),
        page.total_items,
        page.page,
        page.total_pages
    );

    Ok(Json(ListResponse { page, stats }))
}
