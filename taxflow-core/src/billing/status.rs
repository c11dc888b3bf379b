use tracing::warn;

use crate::models::client::non_blank;
use crate::models::invoice::{GatewayFattura, GatewayStatus, Invoice, InvoiceStatus, StoredFattura};

/// Where an upstream invoice record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    /// Recorded in local storage after submission, carries a gateway code.
    Local,
    /// Legacy record listed by the gateway, carries only an SDI identifier.
    Gateway,
}

/// Folds a locally-stored gateway code onto the dashboard vocabulary.
///
/// Missing and unrecognized codes fall back to `Pending` so lists always
/// render. Unrecognized non-empty codes are logged.
pub fn normalize_local(code: Option<&str>) -> InvoiceStatus {
    let Some(code) = code else {
        return InvoiceStatus::Pending;
    };

    match code.parse::<GatewayStatus>() {
        Ok(status) => status.ui_status(),
        Err(_) => {
            if !code.trim().is_empty() {
                warn!("Unrecognized gateway status code {:?}, defaulting to pending", code);
            }
            InvoiceStatus::Pending
        }
    }
}

/// Gateway-listed records are `Sent` once SDI assigned an identifier,
/// `Draft` otherwise.
pub fn normalize_gateway(identifier: Option<&str>) -> InvoiceStatus {
    if non_blank(identifier).is_some() {
        InvoiceStatus::Sent
    } else {
        InvoiceStatus::Draft
    }
}

/// Single entry point over both origins.
///
/// `value` is the status code for `Local` records and the SDI identifier
/// for `Gateway` records.
pub fn normalize_status(value: Option<&str>, origin: RecordOrigin) -> InvoiceStatus {
    match origin {
        RecordOrigin::Local => normalize_local(value),
        RecordOrigin::Gateway => normalize_gateway(value),
    }
}

impl From<&StoredFattura> for Invoice {
    fn from(record: &StoredFattura) -> Self {
        Invoice {
            numero: record.documento.numero.clone(),
            cliente: record.destinatario.denominazione.clone(),
            importo: record.importo_totale,
            iva: record.importo_iva,
            totale: record.importo_totale_con_iva,
            status: normalize_local(record.status.as_deref()),
            data_emissione: record.documento.data.clone(),
            data_scadenza: record
                .pagamento
                .as_ref()
                .and_then(|p| p.data_scadenza.clone())
                .unwrap_or_default(),
            descrizione: record.descrizione.clone(),
            note: None,
        }
    }
}

impl From<&GatewayFattura> for Invoice {
    fn from(record: &GatewayFattura) -> Self {
        // Older listings only report the taxable base.
        let totale = if record.totale.is_zero() {
            record.imponibile.checked_add(record.iva).unwrap_or_else(|| {
                warn!("Gateway invoice {} has an out-of-range total", record.numero);
                record.totale
            })
        } else {
            record.totale
        };

        Invoice {
            numero: record.numero.clone(),
            cliente: record.denominazione.clone(),
            importo: record.imponibile,
            iva: record.iva,
            totale,
            status: normalize_gateway(record.identifier.as_deref()),
            data_emissione: record.data.clone(),
            data_scadenza: String::new(),
            descrizione: None,
            note: None,
        }
    }
}

/// Builds the dashboard rows for a mixed upstream listing, local records first.
pub fn merge_records(local: &[StoredFattura], gateway: &[GatewayFattura]) -> Vec<Invoice> {
    local
        .iter()
        .map(Invoice::from)
        .chain(gateway.iter().map(Invoice::from))
        .collect()
}
