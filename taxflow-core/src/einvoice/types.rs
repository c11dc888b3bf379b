use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Electronic invoice payload accepted by the SDI gateway.
///
/// Field names and casing are part of the gateway contract and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatturaElettronica {
    /// Issuer VAT id, always `IT`-prefixed
    pub piva_mittente: String,

    pub destinatario: Destinatario,

    pub documento: Documento,

    pub righe: Vec<Riga>,

    /// Omitted entirely when no payment detail was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagamento: Option<Pagamento>,
}

/// Recipient block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destinatario {
    #[serde(rename = "CodiceSDI")]
    pub codice_sdi: String,

    /// VAT id without the `IT` prefix
    #[serde(rename = "PartitaIVA")]
    pub partita_iva: String,

    pub codice_fiscale: String,
    pub denominazione: String,
    pub indirizzo: String,

    #[serde(rename = "CAP")]
    pub cap: String,

    pub comune: String,
    pub provincia: String,
    pub nazione: String,

    #[serde(rename = "PEC", default, skip_serializing_if = "Option::is_none")]
    pub pec: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Documento {
    pub data: String,
    pub numero: String,
}

/// Invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Riga {
    pub descrizione: String,

    /// Fixed two-decimal string, the gateway rejects plain numbers here
    pub prezzo_unitario: String,

    pub quantita: Decimal,
    pub unita_misura: String,

    #[serde(rename = "AliquotaIVA")]
    pub aliquota_iva: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pagamento {
    pub modalita_pagamento: String,

    #[serde(rename = "IBAN", default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_scadenza: Option<String>,
}

/// Amounts of a built document, stored alongside the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Taxable base (importoTotale)
    pub imponibile: Decimal,
    /// VAT (importoIVA)
    pub iva: Decimal,
    /// Base plus VAT (importoTotaleConIVA)
    pub totale: Decimal,
}

/// Outcome of form validation. Errors are Italian, user-facing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}
