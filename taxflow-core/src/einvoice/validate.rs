use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::einvoice::builder::document_totals;
use crate::einvoice::types::ValidationResult;
use crate::models::client::{non_blank, Cliente, InvoiceFormData};

pub const ERR_CLIENTE_ID_FISCALE: &str = "Il cliente deve avere almeno P.IVA o Codice Fiscale";
pub const ERR_CLIENTE_NOME: &str = "Specificare Denominazione oppure Nome e Cognome del cliente";
pub const ERR_CLIENTE_INDIRIZZO: &str = "Indirizzo completo del cliente richiesto";
pub const ERR_FORNITORE_FISCALE: &str = "Dati fiscali del fornitore incompleti";
pub const ERR_NUMERO_DATA: &str = "Numero e data fattura sono obbligatori";
pub const ERR_DESCRIZIONE: &str = "Descrizione servizio/prodotto richiesta";
pub const ERR_PREZZO: &str = "Prezzo unitario deve essere maggiore di zero";
pub const ERR_QUANTITA: &str = "Quantità deve essere maggiore di zero";
pub const ERR_UNITA_MISURA: &str = "Unità di misura richiesta";
pub const ERR_IMPORTO_TROPPO_ELEVATO: &str = "Importo troppo elevato";

pub const ERR_CAP_FORMATO: &str = "CAP del cliente non valido (5 cifre)";
pub const ERR_PROVINCIA_FORMATO: &str = "Provincia del cliente non valida (2 lettere)";
pub const ERR_CODICE_DESTINATARIO_FORMATO: &str =
    "Codice destinatario non valido (7 caratteri alfanumerici)";
pub const ERR_DATA_FORMATO: &str = "Data fattura non valida (formato AAAA-MM-GG)";

fn cap_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{5}$").expect("valid CAP pattern"))
}

fn provincia_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid provincia pattern"))
}

fn codice_destinatario_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]{7}$").expect("valid codice destinatario pattern")
    })
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Checks the invoice form before the document is built.
///
/// Every rule runs and contributes its own message; nothing short-circuits.
/// Format rules only apply to fields that were filled in.
pub fn validate_invoice(form: &InvoiceFormData) -> ValidationResult {
    let mut errors = Vec::new();

    validate_cliente(&form.cliente, &mut errors);

    if !present(&form.fornitore.partita_iva) || !present(&form.fornitore.codice_fiscale) {
        errors.push(ERR_FORNITORE_FISCALE.to_string());
    }

    if !present(&form.numero) || !present(&form.data) {
        errors.push(ERR_NUMERO_DATA.to_string());
    } else if NaiveDate::parse_from_str(form.data.trim(), "%Y-%m-%d").is_err() {
        errors.push(ERR_DATA_FORMATO.to_string());
    }

    if !present(&form.descrizione) {
        errors.push(ERR_DESCRIZIONE.to_string());
    }

    if form.prezzo_unitario <= Decimal::ZERO {
        errors.push(ERR_PREZZO.to_string());
    }

    if form.quantita <= Decimal::ZERO {
        errors.push(ERR_QUANTITA.to_string());
    }

    if document_totals(form).is_err() {
        errors.push(ERR_IMPORTO_TROPPO_ELEVATO.to_string());
    }

    if !present(&form.unita_misura) {
        errors.push(ERR_UNITA_MISURA.to_string());
    }

    ValidationResult::from_errors(errors)
}

fn validate_cliente(cliente: &Cliente, errors: &mut Vec<String>) {
    if !present(&cliente.partita_iva) && !present(&cliente.codice_fiscale) {
        errors.push(ERR_CLIENTE_ID_FISCALE.to_string());
    }

    let has_denominazione = non_blank(cliente.denominazione.as_deref()).is_some();
    let has_nome_cognome = non_blank(cliente.nome.as_deref()).is_some()
        && non_blank(cliente.cognome.as_deref()).is_some();
    if !has_denominazione && !has_nome_cognome {
        errors.push(ERR_CLIENTE_NOME.to_string());
    }

    if !present(&cliente.indirizzo)
        || !present(&cliente.cap)
        || !present(&cliente.comune)
        || !present(&cliente.provincia)
    {
        errors.push(ERR_CLIENTE_INDIRIZZO.to_string());
    }

    // CAP and provincia formats are Italian conventions.
    let italian = non_blank(cliente.nazione.as_deref())
        .map_or(true, |nazione| nazione.eq_ignore_ascii_case("IT"));

    if italian && present(&cliente.cap) && !cap_pattern().is_match(cliente.cap.trim()) {
        errors.push(ERR_CAP_FORMATO.to_string());
    }

    if italian
        && present(&cliente.provincia)
        && !provincia_pattern().is_match(cliente.provincia.trim())
    {
        errors.push(ERR_PROVINCIA_FORMATO.to_string());
    }

    if let Some(codice) = non_blank(cliente.codice_destinatario.as_deref()) {
        if !codice_destinatario_pattern().is_match(codice) {
            errors.push(ERR_CODICE_DESTINATARIO_FORMATO.to_string());
        }
    }
}
