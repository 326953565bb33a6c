//! Common test utilities for integration tests
//!
//! Purchase-order builders and logging setup shared by the integration
//! test files.

#![allow(dead_code)]

use transparency_engine::domain::models::{
    CompanyRef, CompanyType, ConfirmationData, GeoCoordinates, InputMaterial, OriginData,
    ProductRef, PurchaseOrder, TransformationData,
};
use transparency_engine::InMemoryPurchaseOrderStore;
use uuid::Uuid;

/// Deterministic PO id for small integers.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Input material linked to `source` with a percentage contribution.
pub fn material(source: u128, percentage: f64) -> InputMaterial {
    InputMaterial {
        source_po_id: Some(id(source).to_string()),
        percentage_contribution: Some(percentage),
        supplier_company_id: Some(id(source + 10_000)),
        supplier_verified: true,
        traceability_verified: true,
        material_type: Some("crude_palm_oil".to_string()),
        ..Default::default()
    }
}

fn base_po(n: u128, company_type: CompanyType, quantity: f64) -> PurchaseOrder {
    PurchaseOrder {
        id: id(n),
        po_number: format!("PO-{n:04}"),
        quantity,
        unit: "kg".to_string(),
        seller_company: CompanyRef {
            id: id(n + 10_000),
            company_type,
        },
        buyer_company: None,
        product: ProductRef {
            id: id(n + 20_000),
            category: Some("palm_oil".to_string()),
        },
        confirmation_data: None,
    }
}

/// Originator with origin data, coordinates and RSPO + NDPE certifications.
pub fn originator(n: u128) -> PurchaseOrder {
    let mut po = base_po(n, CompanyType::Originator, 1000.0);
    po.confirmation_data = Some(ConfirmationData {
        origin_data: Some(OriginData {
            farm_id: Some(format!("FARM-{n}")),
            geographic_coordinates: Some(GeoCoordinates {
                latitude: 1.35,
                longitude: 103.8,
            }),
            certifications: vec!["RSPO".to_string(), "NDPE".to_string()],
            ..Default::default()
        }),
        ..Default::default()
    });
    po
}

/// Uncertified PO of `company_type` with origin data and the given inputs.
pub fn with_inputs(n: u128, company_type: CompanyType, inputs: Vec<InputMaterial>) -> PurchaseOrder {
    let mut po = base_po(n, company_type, 1000.0);
    po.confirmation_data = Some(ConfirmationData {
        origin_data: Some(OriginData {
            plantation_name: Some(format!("Mill {n}")),
            ..Default::default()
        }),
        transformation_data: Some(TransformationData {
            input_materials: inputs,
        }),
        confirmed_at: None,
    });
    po
}

/// Processor sourcing equal shares from `sources`.
pub fn processor(n: u128, sources: &[u128]) -> PurchaseOrder {
    let share = if sources.is_empty() {
        0.0
    } else {
        100.0 / sources.len() as f64
    };
    with_inputs(
        n,
        CompanyType::Processor,
        sources.iter().map(|&s| material(s, share)).collect(),
    )
}

pub fn store(orders: Vec<PurchaseOrder>) -> InMemoryPurchaseOrderStore {
    InMemoryPurchaseOrderStore::from_orders(orders)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
