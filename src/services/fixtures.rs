//! Shared purchase-order builders for service unit tests.

use uuid::Uuid;

use crate::adapters::memory::InMemoryPurchaseOrderStore;
use crate::domain::models::{
    CompanyRef, CompanyType, ConfirmationData, GeoCoordinates, InputMaterial, Node, OriginData,
    ProductRef, PurchaseOrder, TransformationData,
};

pub(crate) fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Fully described input material sourcing `source`.
pub(crate) fn linked_material(source: u128, percentage: f64) -> InputMaterial {
    InputMaterial {
        source_po_id: Some(id(source).to_string()),
        percentage_contribution: Some(percentage),
        quantity_used: Some(10.0 * percentage),
        supplier_company_id: Some(id(source + 10_000)),
        supplier_verified: true,
        traceability_verified: true,
        material_type: Some("fresh_fruit_bunches".to_string()),
        quality_grade: Some("A".to_string()),
        harvest_date: Some("2024-03-01".to_string()),
        production_date: None,
        certifications: vec!["RSPO".to_string()],
    }
}

fn base_po(n: u128, company_type: CompanyType) -> PurchaseOrder {
    PurchaseOrder {
        id: id(n),
        po_number: format!("PO-{n:04}"),
        quantity: 1000.0,
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
pub(crate) fn originator(n: u128) -> PurchaseOrder {
    let mut po = base_po(n, CompanyType::Originator);
    po.confirmation_data = Some(ConfirmationData {
        origin_data: Some(OriginData {
            farm_id: Some(format!("FARM-{n}")),
            geographic_coordinates: Some(GeoCoordinates {
                latitude: 2.5,
                longitude: 101.7,
            }),
            certifications: vec!["RSPO".to_string(), "NDPE".to_string()],
            ..Default::default()
        }),
        ..Default::default()
    });
    po
}

/// Non-originator declaring one equal-share material per source.
pub(crate) fn processor(n: u128, sources: &[u128]) -> PurchaseOrder {
    intermediary(n, CompanyType::Processor, sources)
}

pub(crate) fn intermediary(n: u128, company_type: CompanyType, sources: &[u128]) -> PurchaseOrder {
    let share = if sources.is_empty() {
        0.0
    } else {
        100.0 / sources.len() as f64
    };
    let mut po = base_po(n, company_type);
    po.confirmation_data = Some(ConfirmationData {
        origin_data: Some(OriginData {
            plantation_name: Some(format!("Mill {n}")),
            ..Default::default()
        }),
        transformation_data: Some(TransformationData {
            input_materials: sources.iter().map(|&s| linked_material(s, share)).collect(),
        }),
        confirmed_at: None,
    });
    po
}

pub(crate) fn store(orders: Vec<PurchaseOrder>) -> InMemoryPurchaseOrderStore {
    InMemoryPurchaseOrderStore::from_orders(orders)
}

pub(crate) fn node(po: &PurchaseOrder, depth: u32) -> Node {
    Node::from_purchase_order(po, depth)
}
