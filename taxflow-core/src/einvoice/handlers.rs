use axum::{response::Json, Extension};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{CurrentUser, UserRole};
use crate::einvoice::builder::{build_document, document_totals};
use crate::einvoice::types::{DocumentTotals, FatturaElettronica, ValidationResult};
use crate::einvoice::validate::{validate_invoice, ERR_IMPORTO_TROPPO_ELEVATO};
use crate::error::AppError;
use crate::models::client::InvoiceFormData;

/// Response of `POST /api/fatture/build`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    pub document: FatturaElettronica,
    pub totals: DocumentTotals,
}

/// Validation endpoint handler.
///
/// Always answers 200; the body tells whether the form is valid.
pub async fn validate_handler(Json(form): Json<InvoiceFormData>) -> Json<ValidationResult> {
    Json(validate_invoice(&form))
}

/// Build endpoint handler.
///
/// Only business accounts issue invoices. Invalid forms are rejected with
/// the full list of messages before anything is built.
pub async fn build_handler(
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<InvoiceFormData>,
) -> Result<Json<BuildResponse>, AppError> {
    if user.role != UserRole::Business {
        return Err(AppError::Forbidden(
            "Only business users can send invoices".into(),
        ));
    }

    let validation = validate_invoice(&form);
    if !validation.valid {
        warn!(
            "Invoice {} from user {} failed validation with {} error(s)",
            form.numero,
            user.id,
            validation.errors.len()
        );
        return Err(AppError::Validation(validation.errors));
    }

    let document = build_document(&form);
    let totals = document_totals(&form)
        .map_err(|_| AppError::Validation(vec![ERR_IMPORTO_TROPPO_ELEVATO.to_string()]))?;

    info!(
        "Built electronic invoice {} for user {} (totale {})",
        document.documento.numero, user.id, totals.totale
    );

    Ok(Json(BuildResponse { document, totals }))
}
