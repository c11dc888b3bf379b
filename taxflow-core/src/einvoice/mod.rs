//! Electronic invoice (Fattura Elettronica) construction for the SDI gateway.

pub mod builder;
pub mod handlers;
pub mod types;
pub mod validate;


pub use builder::{build_document, document_totals};
pub use handlers::{build_handler, validate_handler};
pub use types::{
    Destinatario, DocumentTotals, Documento, FatturaElettronica, Pagamento, Riga,
    ValidationResult,
};
pub use validate::validate_invoice;
