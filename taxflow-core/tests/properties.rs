/// Property-based tests for the invoice amount, status and document rules.
use proptest::prelude::*;
use rust_decimal::Decimal;
use taxflow_core::billing::{
    normalize_local, normalize_status, total, vat_amount, InvoiceStats, RecordOrigin,
};
use taxflow_core::einvoice::builder::{build_document, recipient_vat_id, sender_vat_id};
use taxflow_core::models::{
    Cliente, Fornitore, GatewayStatus, Invoice, InvoiceFormData, InvoiceStatus,
};

/// Amounts in cents up to one million euro.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Anywhere in the integer range of `Decimal`.
fn huge_amount() -> impl Strategy<Value = Decimal> {
    (0i128..=79_228_162_514_264_337_593_543_950_335i128)
        .prop_map(|units| Decimal::from_i128_with_scale(units, 0))
}

fn rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::from(4)),
        Just(Decimal::from(10)),
        Just(Decimal::from(22)),
        (0i64..10_000).prop_map(|bp| Decimal::new(bp, 2)),
    ]
}

proptest! {
    #[test]
    fn total_is_base_plus_vat(base in amount(), rate in rate()) {
        let vat = vat_amount(base, rate).unwrap();
        prop_assert_eq!(total(base, rate), Ok(base + vat));
    }

    #[test]
    fn zero_rate_means_zero_vat(base in amount()) {
        prop_assert_eq!(vat_amount(base, Decimal::ZERO), Ok(Decimal::ZERO));
        prop_assert_eq!(total(base, Decimal::ZERO), Ok(base));
    }

    #[test]
    fn vat_never_exceeds_base_for_rates_up_to_100(base in amount(), rate in rate()) {
        prop_assert!(vat_amount(base, rate).unwrap() <= base);
    }

    #[test]
    fn huge_amounts_never_panic(base in huge_amount(), rate in rate()) {
        if let Ok(gross) = total(base, rate) {
            prop_assert_eq!(gross, base + vat_amount(base, rate).unwrap());
        }
    }

    #[test]
    fn huge_stats_never_panic(totals in proptest::collection::vec(huge_amount(), 0..6)) {
        let invoices: Vec<Invoice> = totals
            .into_iter()
            .map(|totale| Invoice {
                numero: "1".into(),
                cliente: "Acme".into(),
                importo: totale,
                iva: Decimal::ZERO,
                totale,
                status: InvoiceStatus::Paid,
                data_emissione: String::new(),
                data_scadenza: String::new(),
                descrizione: None,
                note: None,
            })
            .collect();

        if let Ok(stats) = InvoiceStats::from_invoices(&invoices) {
            prop_assert_eq!(stats.total, invoices.len());
            prop_assert_eq!(stats.paid, stats.total_revenue);
        }
    }
}

proptest! {
    #[test]
    fn known_codes_always_map_to_their_status(index in 0usize..GatewayStatus::ALL.len()) {
        let code = GatewayStatus::ALL[index];
        prop_assert_eq!(normalize_local(Some(code.code())), code.ui_status());
    }

    #[test]
    fn unknown_codes_fall_back_to_pending(code in "[A-Z0-9 ]{1,12}") {
        // Gateway codes are lowercase, so none of these can match.
        prop_assert_eq!(
            normalize_status(Some(&code), RecordOrigin::Local),
            InvoiceStatus::Pending
        );
    }

    #[test]
    fn gateway_records_are_never_paid_or_overdue(identifier in proptest::option::of("\\PC{0,20}")) {
        let status = normalize_status(identifier.as_deref(), RecordOrigin::Gateway);
        prop_assert!(matches!(status, InvoiceStatus::Sent | InvoiceStatus::Draft));
    }
}

proptest! {
    #[test]
    fn sender_vat_id_is_prefixed(partita_iva in "(IT|it|It|iT)?[0-9]{11}") {
        let sender = sender_vat_id(&partita_iva);
        prop_assert!(sender.starts_with("IT"));
        prop_assert_eq!(sender.len(), 13);
        prop_assert!(sender.ends_with(&partita_iva[partita_iva.len() - 11..]));
    }

    #[test]
    fn recipient_vat_id_never_keeps_prefix(partita_iva in "[iItT]{0,6}[0-9]{0,11}") {
        let recipient = recipient_vat_id(&partita_iva);
        let head = recipient.get(..2).unwrap_or_default();
        prop_assert!(!head.eq_ignore_ascii_case("IT"));
    }

    #[test]
    fn recipient_vat_id_never_panics(partita_iva in "\\PC*") {
        let _ = recipient_vat_id(&partita_iva);
    }

    #[test]
    fn build_document_is_idempotent(
        denominazione in "[A-Za-z ]{1,20}",
        partita_iva in "(IT|it)?[0-9]{11}",
        numero in "[0-9]{1,4}/[0-9]{4}",
        price in amount(),
        quantita in 1i64..100,
        aliquota in rate(),
        iban in proptest::option::of("IT[0-9]{2}[A-Z][0-9]{22}"),
    ) {
        let form = InvoiceFormData {
            cliente: Cliente {
                denominazione: Some(denominazione),
                partita_iva,
                indirizzo: "Via Roma".into(),
                cap: "00100".into(),
                comune: "Roma".into(),
                provincia: "RM".into(),
                ..Default::default()
            },
            fornitore: Fornitore {
                partita_iva: "09876543210".into(),
                codice_fiscale: "RSSMRA80A01H501U".into(),
                ..Default::default()
            },
            numero,
            data: "2024-05-01".into(),
            descrizione: "Consulenza".into(),
            prezzo_unitario: price,
            quantita: Decimal::from(quantita),
            unita_misura: "NR".into(),
            aliquota_iva: aliquota,
            iban,
            ..Default::default()
        };

        let first = build_document(&form);
        let second = build_document(&form);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.piva_mittente.starts_with("IT"));
        prop_assert!(!first.destinatario.partita_iva.to_ascii_uppercase().starts_with("IT"));
        prop_assert_eq!(first.pagamento.is_some(), form.iban.is_some());
    }
}
