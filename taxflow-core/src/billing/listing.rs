use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::models::invoice::{Invoice, InvoiceStatus};

pub const DEFAULT_PER_PAGE: usize = 10;

/// Status filter of the invoice list; `all` disables filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: InvoiceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatusFilter::All => serializer.serialize_str("all"),
            StatusFilter::Only(status) => serializer.serialize_str(status.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == "all" {
            return Ok(StatusFilter::All);
        }
        value
            .parse::<InvoiceStatus>()
            .map(StatusFilter::Only)
            .map_err(D::Error::custom)
    }
}

/// Search, filter and pagination parameters of the invoice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceQuery {
    pub search: Option<String>,
    pub status: StatusFilter,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl Default for InvoiceQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: StatusFilter::All,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Case-insensitive match on number, client name and description.
pub fn matches_search(invoice: &Invoice, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    invoice.numero.to_lowercase().contains(&term)
        || invoice.cliente.to_lowercase().contains(&term)
        || invoice
            .descrizione
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
}

pub fn filter_invoices<'a>(invoices: &'a [Invoice], query: &InvoiceQuery) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|invoice| query.status.matches(invoice.status))
        .filter(|invoice| {
            query
                .search
                .as_deref()
                .map_or(true, |term| matches_search(invoice, term))
        })
        .collect()
}

/// Slices `items` into the requested page.
///
/// Page 0 is treated as page 1; a zero page size as one item per page.
/// Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Filter then paginate, cloning only the rows of the returned page.
pub fn query_invoices(invoices: &[Invoice], query: &InvoiceQuery) -> Page<Invoice> {
    let matching = filter_invoices(invoices, query);
    let page = paginate(matching, query.page, query.per_page);

    Page {
        items: page.items.into_iter().cloned().collect(),
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}
