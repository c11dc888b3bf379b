//! Dashboard-side invoice logic: amounts, status folding and listing.

pub mod amounts;
pub mod handlers;
pub mod listing;
pub mod status;

pub use amounts::{format_currency, total, vat_amount, AmountOverflow, InvoiceStats};
pub use listing::{query_invoices, InvoiceQuery, Page, StatusFilter};
pub use status::{merge_records, normalize_gateway, normalize_local, normalize_status, RecordOrigin};
