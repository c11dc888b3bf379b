use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice recipient (Cessionario/Committente).
///
/// Either `denominazione` (companies) or `nome` + `cognome` (private
/// individuals) identifies the party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cliente {
    pub denominazione: Option<String>,
    pub nome: Option<String>,
    pub cognome: Option<String>,

    /// VAT number, with or without the `IT` prefix
    pub partita_iva: String,

    pub codice_fiscale: String,

    pub indirizzo: String,
    pub numero_civico: Option<String>,
    pub cap: String,
    pub comune: String,
    pub provincia: String,

    /// ISO country code, `IT` when absent
    pub nazione: Option<String>,

    /// Certified mailbox
    pub pec: Option<String>,

    /// SDI routing code (seven characters)
    pub codice_destinatario: Option<String>,
}

/// Invoice issuer (Cedente/Prestatore), taken from the configured company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fornitore {
    pub denominazione: String,
    pub partita_iva: String,
    pub codice_fiscale: String,
    pub indirizzo: Option<String>,
    pub numero_civico: Option<String>,
    pub cap: Option<String>,
    pub comune: Option<String>,
    pub provincia: Option<String>,
    pub nazione: Option<String>,

    /// RF19 for the regime forfettario
    pub regime_fiscale: Option<String>,
}

/// Input of the invoice creation form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceFormData {
    pub cliente: Cliente,
    pub fornitore: Fornitore,

    pub numero: String,

    /// Issue date (YYYY-MM-DD)
    pub data: String,

    pub descrizione: String,
    pub prezzo_unitario: Decimal,
    pub quantita: Decimal,
    pub unita_misura: String,

    /// VAT rate in percent, 0 for forfettari
    #[serde(rename = "aliquotaIVA")]
    pub aliquota_iva: Decimal,

    pub metodo_pagamento: Option<String>,
    pub iban: Option<String>,
    pub data_scadenza: Option<String>,
}

/// Treats `None`, empty and whitespace-only strings alike.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_deserializes_from_camel_case_json() {
        let form: InvoiceFormData = serde_json::from_value(serde_json::json!({
            "cliente": {
                "denominazione": "Acme S.r.l.",
                "partitaIva": "IT01234567890",
                "indirizzo": "Via Roma",
                "numeroCivico": "10",
                "cap": "00100",
                "comune": "Roma",
                "provincia": "RM"
            },
            "fornitore": { "partitaIva": "09876543210", "codiceFiscale": "RSSMRA80A01H501U" },
            "numero": "1",
            "data": "2024-01-01",
            "descrizione": "Consulenza",
            "prezzoUnitario": 150.5,
            "quantita": 2,
            "unitaMisura": "NR",
            "aliquotaIVA": 0
        }))
        .unwrap();

        assert_eq!(form.cliente.numero_civico.as_deref(), Some("10"));
        assert_eq!(form.cliente.codice_fiscale, "");
        assert_eq!(form.quantita, Decimal::from(2));
        assert_eq!(form.iban, None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" RM ")), Some("RM"));
    }
}
