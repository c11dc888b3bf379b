pub mod client;
pub mod invoice;

pub use client::{Cliente, Fornitore, InvoiceFormData};
pub use invoice::{
    GatewayFattura, GatewayStatus, Invoice, InvoiceStatus, StatusParseError, StoredFattura,
};
