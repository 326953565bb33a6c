//! Purchase order domain model.
//!
//! This is the shape handed to the engine by a [`PoDetailProvider`]. It mirrors
//! the confirmation payload captured when a seller confirms a purchase order:
//! origin data for originators, transformation data (declared input
//! materials) for everyone further down the chain.
//!
//! [`PoDetailProvider`]: crate::domain::ports::PoDetailProvider

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::CompanyType;

/// A purchase order as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    #[serde(default)]
    pub po_number: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    pub seller_company: CompanyRef,
    #[serde(default)]
    pub buyer_company: Option<CompanyRef>,
    pub product: ProductRef,
    #[serde(default)]
    pub confirmation_data: Option<ConfirmationData>,
}

/// Reference to a company participating in a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub id: Uuid,
    #[serde(default)]
    pub company_type: CompanyType,
}

/// Reference to the product being traded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: Uuid,
    #[serde(default)]
    pub category: Option<String>,
}

/// Data captured when the seller confirmed the order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationData {
    #[serde(default)]
    pub origin_data: Option<OriginData>,
    #[serde(default)]
    pub transformation_data: Option<TransformationData>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Origin (harvest / farm) data declared by an originator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginData {
    #[serde(default)]
    pub farm_id: Option<String>,
    #[serde(default)]
    pub plantation_name: Option<String>,
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub geographic_coordinates: Option<GeoCoordinates>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl OriginData {
    /// True when no field carries information.
    pub fn is_empty(&self) -> bool {
        self.farm_id.as_deref().map_or(true, str::is_empty)
            && self.plantation_name.as_deref().map_or(true, str::is_empty)
            && self.harvest_date.is_none()
            && self.geographic_coordinates.is_none()
            && self.certifications.is_empty()
    }
}

/// WGS84 coordinates of a farm or mill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    /// Coordinates within WGS84 bounds and not the (0, 0) placeholder.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

/// Processing data declared by a processor, trader or brand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationData {
    #[serde(default)]
    pub input_materials: Vec<InputMaterial>,
}

/// A declared input material: an edge from this PO to an upstream PO.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputMaterial {
    /// Upstream purchase order id, kept as raw text because it is user-entered.
    #[serde(default)]
    pub source_po_id: Option<String>,
    #[serde(default)]
    pub percentage_contribution: Option<f64>,
    #[serde(default)]
    pub quantity_used: Option<f64>,
    #[serde(default)]
    pub supplier_company_id: Option<Uuid>,
    #[serde(default)]
    pub supplier_verified: bool,
    #[serde(default)]
    pub traceability_verified: bool,
    #[serde(default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub quality_grade: Option<String>,
    #[serde(default)]
    pub harvest_date: Option<String>,
    #[serde(default)]
    pub production_date: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Outcome of resolving an input material's source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
    Linked(Uuid),
    Missing,
    Malformed(String),
}

impl InputMaterial {
    /// Parse the source PO reference.
    pub fn source_reference(&self) -> SourceReference {
        match self.source_po_id.as_deref().map(str::trim) {
            None | Some("") => SourceReference::Missing,
            Some(raw) => Uuid::parse_str(raw)
                .map_or_else(|_| SourceReference::Malformed(raw.to_string()), SourceReference::Linked),
        }
    }

    /// Whether the material points at a parseable upstream PO.
    pub fn is_linked(&self) -> bool {
        matches!(self.source_reference(), SourceReference::Linked(_))
    }

    /// Number of descriptive fields declared (material type, contribution,
    /// quality grade, harvest/production date, certifications).
    pub fn descriptive_field_count(&self) -> usize {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        [
            present(&self.material_type),
            self.percentage_contribution.is_some(),
            present(&self.quality_grade),
            present(&self.harvest_date) || present(&self.production_date),
            !self.certifications.is_empty(),
        ]
        .into_iter()
        .filter(|&p| p)
        .count()
    }
}

impl PurchaseOrder {
    /// Origin data, if the confirmation carried any.
    pub fn origin_data(&self) -> Option<&OriginData> {
        self.confirmation_data
            .as_ref()
            .and_then(|c| c.origin_data.as_ref())
    }

    /// Declared input materials (empty for originators).
    pub fn input_materials(&self) -> &[InputMaterial] {
        self.confirmation_data
            .as_ref()
            .and_then(|c| c.transformation_data.as_ref())
            .map_or(&[], |t| t.input_materials.as_slice())
    }
}
