use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Invoice status as shown in the dashboard.
///
/// This is the only status vocabulary TaxFlow defines itself; every upstream
/// code is folded onto one of these five values by `billing::status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Pending,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    /// Italian label used by the invoice table badges.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Bozza",
            InvoiceStatus::Sent => "Inviata",
            InvoiceStatus::Pending => "In Attesa",
            InvoiceStatus::Paid => "Pagata",
            InvoiceStatus::Overdue => "Scaduta",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string is not part of a closed status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status code: {0:?}")]
pub struct StatusParseError(pub String);

impl FromStr for InvoiceStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Status codes owned by the SDI gateway.
///
/// The vocabulary is fixed by the external service. Use `FromStr` when an
/// unknown code must be rejected; `billing::status::normalize_local` is the
/// lenient counterpart used to render lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    Inviata,
    PresaInCarico,
    Consegnata,
    Accettata,
    NonConsegnata,
    Errore,
    Rifiutata,
    InAttesa,
}

impl GatewayStatus {
    pub const ALL: [GatewayStatus; 8] = [
        GatewayStatus::Inviata,
        GatewayStatus::PresaInCarico,
        GatewayStatus::Consegnata,
        GatewayStatus::Accettata,
        GatewayStatus::NonConsegnata,
        GatewayStatus::Errore,
        GatewayStatus::Rifiutata,
        GatewayStatus::InAttesa,
    ];

    /// Wire value as sent by the gateway.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayStatus::Inviata => "inviata",
            GatewayStatus::PresaInCarico => "presa_in_carico",
            GatewayStatus::Consegnata => "consegnata",
            GatewayStatus::Accettata => "accettata",
            GatewayStatus::NonConsegnata => "non_consegnata",
            GatewayStatus::Errore => "errore",
            GatewayStatus::Rifiutata => "rifiutata",
            GatewayStatus::InAttesa => "in_attesa",
        }
    }

    /// Many-to-one fold onto the dashboard vocabulary.
    pub fn ui_status(&self) -> InvoiceStatus {
        match self {
            GatewayStatus::Inviata | GatewayStatus::PresaInCarico => InvoiceStatus::Sent,
            GatewayStatus::Consegnata | GatewayStatus::Accettata => InvoiceStatus::Paid,
            GatewayStatus::NonConsegnata | GatewayStatus::Errore | GatewayStatus::Rifiutata => {
                InvoiceStatus::Overdue
            }
            GatewayStatus::InAttesa => InvoiceStatus::Pending,
        }
    }
}

impl fmt::Display for GatewayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for GatewayStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GatewayStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Invoice row as rendered by the dashboard tables and fed to the statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number
    #[serde(default)]
    pub numero: String,

    /// Client display name
    #[serde(default)]
    pub cliente: String,

    /// Taxable base
    #[serde(default)]
    pub importo: Decimal,

    /// VAT amount
    #[serde(default)]
    pub iva: Decimal,

    /// importo + iva
    pub totale: Decimal,

    pub status: InvoiceStatus,

    /// Issue date (YYYY-MM-DD)
    #[serde(default)]
    pub data_emissione: String,

    /// Due date (YYYY-MM-DD)
    #[serde(default)]
    pub data_scadenza: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descrizione: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Invoice {
    /// Whether `totale == importo + iva`.
    ///
    /// Legacy records may fail this check; they are displayed as they are.
    pub fn is_consistent(&self) -> bool {
        self.importo.checked_add(self.iva) == Some(self.totale)
    }
}

/// Destination party as stored with a locally-recorded electronic invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDestinatario {
    #[serde(default)]
    pub denominazione: String,
    #[serde(default)]
    pub partita_iva: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredDocumento {
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPagamento {
    #[serde(default)]
    pub modalita_pagamento: Option<String>,
    #[serde(default)]
    pub data_scadenza: Option<String>,
}

/// Electronic invoice recorded in local storage after submission.
///
/// `status` holds the raw gateway code, which may be missing or outside the
/// known vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFattura {
    #[serde(default)]
    pub destinatario: StoredDestinatario,
    #[serde(default)]
    pub documento: StoredDocumento,
    #[serde(default)]
    pub pagamento: Option<StoredPagamento>,
    #[serde(default)]
    pub descrizione: Option<String>,
    #[serde(default)]
    pub importo_totale: Decimal,
    #[serde(default, rename = "importoIVA")]
    pub importo_iva: Decimal,
    #[serde(default, rename = "importoTotaleConIVA")]
    pub importo_totale_con_iva: Decimal,
    #[serde(default)]
    pub status: Option<String>,
}

/// Legacy invoice as listed directly by the gateway.
///
/// These records carry no status code; an `identifier` is assigned by SDI
/// once the document has been transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayFattura {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub denominazione: String,
    #[serde(default)]
    pub imponibile: Decimal,
    #[serde(default)]
    pub iva: Decimal,
    #[serde(default)]
    pub totale: Decimal,
}
