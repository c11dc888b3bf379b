//! Shapes form input into the gateway's electronic invoice payload.
//!
//! Pure data transformation: no clock, no randomness, no I/O. Submission and
//! its failure handling belong to the caller.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::billing::amounts::{self, AmountOverflow};
use crate::einvoice::types::{
    Destinatario, DocumentTotals, Documento, FatturaElettronica, Pagamento, Riga,
};
use crate::models::client::{non_blank, Cliente, InvoiceFormData};

/// Routing code used when the recipient has none (delivery through PEC or
/// the tax drawer).
pub const DEFAULT_CODICE_SDI: &str = "0000000";

pub const DEFAULT_NAZIONE: &str = "IT";

/// MP05, bank transfer.
pub const DEFAULT_MODALITA_PAGAMENTO: &str = "MP05";

const COUNTRY_PREFIX: &str = "IT";

/// Builds the gateway payload for a single-line invoice.
///
/// Expects input that already passed `validate_invoice`; missing optional
/// data is filled with the gateway defaults.
pub fn build_document(form: &InvoiceFormData) -> FatturaElettronica {
    FatturaElettronica {
        piva_mittente: sender_vat_id(&form.fornitore.partita_iva),
        destinatario: build_destinatario(&form.cliente),
        documento: Documento {
            data: form.data.trim().to_string(),
            numero: form.numero.trim().to_string(),
        },
        righe: vec![Riga {
            descrizione: form.descrizione.trim().to_string(),
            prezzo_unitario: format_unit_price(form.prezzo_unitario),
            quantita: form.quantita,
            unita_misura: form.unita_misura.trim().to_string(),
            aliquota_iva: form.aliquota_iva,
        }],
        pagamento: build_pagamento(form),
    }
}

/// Taxable base, VAT and gross total of the invoice line.
///
/// Fails when price, quantity and rate multiply past the `Decimal` range;
/// `validate_invoice` reports such forms before they get here.
pub fn document_totals(form: &InvoiceFormData) -> Result<DocumentTotals, AmountOverflow> {
    let imponibile = form
        .prezzo_unitario
        .checked_mul(form.quantita)
        .ok_or(AmountOverflow)?;

    Ok(DocumentTotals {
        imponibile,
        iva: amounts::vat_amount(imponibile, form.aliquota_iva)?,
        totale: amounts::total(imponibile, form.aliquota_iva)?,
    })
}

/// The sender id carries exactly one uppercase country prefix, whatever
/// prefix the input had.
pub fn sender_vat_id(partita_iva: &str) -> String {
    format!("{COUNTRY_PREFIX}{}", recipient_vat_id(partita_iva))
}

/// The recipient id goes out without the country prefix, whatever its case.
pub fn recipient_vat_id(partita_iva: &str) -> String {
    let mut rest = partita_iva.trim();
    while let Some(prefix) = rest.get(..COUNTRY_PREFIX.len()) {
        if !prefix.eq_ignore_ascii_case(COUNTRY_PREFIX) {
            break;
        }
        rest = &rest[COUNTRY_PREFIX.len()..];
    }
    rest.to_string()
}

/// `denominazione`, else `nome cognome`, else empty.
pub fn display_name(cliente: &Cliente) -> String {
    if let Some(denominazione) = non_blank(cliente.denominazione.as_deref()) {
        return denominazione.to_string();
    }

    [cliente.nome.as_deref(), cliente.cognome.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Street and civic number, joined with `", "` only when a number exists.
pub fn street_address(indirizzo: &str, numero_civico: Option<&str>) -> String {
    let indirizzo = indirizzo.trim();
    match non_blank(numero_civico) {
        Some(civico) => format!("{indirizzo}, {civico}"),
        None => indirizzo.to_string(),
    }
}

/// Two decimals, half away from zero.
pub fn format_unit_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn build_destinatario(cliente: &Cliente) -> Destinatario {
    Destinatario {
        codice_sdi: non_blank(cliente.codice_destinatario.as_deref())
            .unwrap_or(DEFAULT_CODICE_SDI)
            .to_string(),
        partita_iva: recipient_vat_id(&cliente.partita_iva),
        codice_fiscale: cliente.codice_fiscale.trim().to_string(),
        denominazione: display_name(cliente),
        indirizzo: street_address(&cliente.indirizzo, cliente.numero_civico.as_deref()),
        cap: cliente.cap.trim().to_string(),
        comune: cliente.comune.trim().to_string(),
        provincia: cliente.provincia.trim().to_string(),
        nazione: non_blank(cliente.nazione.as_deref())
            .unwrap_or(DEFAULT_NAZIONE)
            .to_string(),
        pec: non_blank(cliente.pec.as_deref()).map(str::to_string),
    }
}

fn build_pagamento(form: &InvoiceFormData) -> Option<Pagamento> {
    let metodo = non_blank(form.metodo_pagamento.as_deref());
    let iban = non_blank(form.iban.as_deref());
    let scadenza = non_blank(form.data_scadenza.as_deref());

    if metodo.is_none() && iban.is_none() && scadenza.is_none() {
        return None;
    }

    Some(Pagamento {
        modalita_pagamento: metodo.unwrap_or(DEFAULT_MODALITA_PAGAMENTO).to_string(),
        iban: iban.map(str::to_string),
        data_scadenza: scadenza.map(str::to_string),
    })
}
