//! Node domain model.
//!
//! A node is one purchase order's position inside a single traversal path.
//! Nodes are created by the traversal, then passed by value through the
//! scoring pipeline (base scores, degradation, confidence) and are read-only
//! once a path is aggregated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::purchase_order::{InputMaterial, PurchaseOrder};

/// Certifications recognised as high-value for sustainability claims.
pub const HIGH_VALUE_CERTIFICATIONS: &[&str] = &[
    "RSPO",
    "NDPE",
    "ISCC",
    "RAINFOREST_ALLIANCE",
    "ORGANIC",
    "FAIR_TRADE",
];

/// Number of items in the data-completeness checklist.
const COMPLETENESS_CHECKS: f64 = 8.0;

/// Clamp a score into `[0, 1]`, mapping NaN to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Normalise a certification label (`"Rainforest-Alliance"` → `"RAINFOREST_ALLIANCE"`).
pub fn normalize_certification(label: &str) -> String {
    label
        .trim()
        .to_uppercase()
        .replace(&['-', ' '][..], "_")
}

/// Whether a certification label belongs to the high-value set.
pub fn is_high_value_certification(label: &str) -> bool {
    let normalized = normalize_certification(label);
    HIGH_VALUE_CERTIFICATIONS.contains(&normalized.as_str())
}

/// Role of the selling company in the supply chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    /// Start of the chain (plantation, farm, smallholder group)
    Originator,
    /// Mill, refinery or other transformation step
    Processor,
    /// Trading intermediary
    Trader,
    /// Consumer-facing brand
    Brand,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Originator => "originator",
            Self::Processor => "processor",
            Self::Trader => "trader",
            Self::Brand => "brand",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certification tier derived from how many high-value certifications a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationTier {
    Basic,
    Standard,
    Premium,
    Elite,
}

impl CertificationTier {
    /// Base score contributed by the tier.
    pub fn score(&self) -> f64 {
        match self {
            Self::Basic => 0.25,
            Self::Standard => 0.50,
            Self::Premium => 0.80,
            Self::Elite => 1.00,
        }
    }

    /// Tier for a node holding `total` certifications, `high_value` of them high-value.
    pub fn from_counts(total: usize, high_value: usize) -> Option<Self> {
        match (total, high_value) {
            (0, _) => None,
            (_, 0) => Some(Self::Basic),
            (_, 1) => Some(Self::Standard),
            (_, 2) => Some(Self::Premium),
            _ => Some(Self::Elite),
        }
    }
}

/// Coarse band for a node's data completeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCompletenessLevel {
    Complete,
    High,
    Partial,
    Minimal,
    Missing,
}

impl DataCompletenessLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.9 => Self::Complete,
            s if s >= 0.7 => Self::High,
            s if s >= 0.4 => Self::Partial,
            s if s > 0.0 => Self::Minimal,
            _ => Self::Missing,
        }
    }
}

/// One purchase order's position in a traversal path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub po_id: Uuid,
    pub po_number: String,
    pub company_id: Uuid,
    pub company_type: CompanyType,
    pub product_id: Uuid,
    pub product_category: Option<String>,
    pub quantity: f64,
    pub unit: String,
    /// Distance from the root purchase order (root = 0).
    pub depth: u32,

    pub has_origin_data: bool,
    pub has_geographic_coordinates: bool,
    pub has_certifications: bool,
    pub certifications: Vec<String>,
    pub certification_count: usize,
    pub high_value_certification_count: usize,
    pub certification_tier: Option<CertificationTier>,
    pub data_completeness_score: f64,
    pub input_materials: Vec<InputMaterial>,

    pub base_ttm_score: f64,
    pub base_ttp_score: f64,
    pub confidence_level: f64,
    pub is_circular: bool,
    /// Multiplicative cycle penalty in `(0, 1]`.
    pub degradation_factor: f64,
    pub visited_at: Option<DateTime<Utc>>,
}

impl Node {
    /// Build an unscored node from a purchase order at the given depth.
    pub fn from_purchase_order(po: &PurchaseOrder, depth: u32) -> Self {
        let origin = po.origin_data().filter(|o| !o.is_empty());
        let has_origin_data = origin.is_some();
        let has_geographic_coordinates = origin
            .and_then(|o| o.geographic_coordinates)
            .is_some_and(|c| c.is_valid());

        let certifications: Vec<String> = origin
            .map(|o| {
                o.certifications
                    .iter()
                    .filter(|c| !c.trim().is_empty())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let certification_count = certifications.len();
        let high_value_certification_count = certifications
            .iter()
            .filter(|c| is_high_value_certification(c))
            .count();

        let company_type = po.seller_company.company_type;
        let input_materials = po.input_materials().to_vec();

        let checklist = [
            !po.po_number.trim().is_empty(),
            po.quantity > 0.0,
            !po.unit.trim().is_empty(),
            po.product.category.as_deref().is_some_and(|c| !c.is_empty()),
            has_origin_data,
            has_geographic_coordinates,
            certification_count > 0,
            !input_materials.is_empty() || company_type == CompanyType::Originator,
        ];
        let present = checklist.iter().filter(|&&p| p).count() as f64;

        Self {
            po_id: po.id,
            po_number: po.po_number.clone(),
            company_id: po.seller_company.id,
            company_type,
            product_id: po.product.id,
            product_category: po.product.category.clone(),
            quantity: po.quantity,
            unit: po.unit.clone(),
            depth,
            has_origin_data,
            has_geographic_coordinates,
            has_certifications: certification_count > 0,
            certification_tier: CertificationTier::from_counts(
                certification_count,
                high_value_certification_count,
            ),
            certifications,
            certification_count,
            high_value_certification_count,
            data_completeness_score: clamp_score(present / COMPLETENESS_CHECKS),
            input_materials,
            base_ttm_score: 0.0,
            base_ttp_score: 0.0,
            confidence_level: 0.0,
            is_circular: false,
            degradation_factor: 1.0,
            visited_at: None,
        }
    }

    /// Stamp the node with the time it was visited.
    pub fn visited(mut self, at: DateTime<Utc>) -> Self {
        self.visited_at = Some(at);
        self
    }

    /// Replace both base scores, clamped.
    pub fn with_base_scores(mut self, ttm: f64, ttp: f64) -> Self {
        self.base_ttm_score = clamp_score(ttm);
        self.base_ttp_score = clamp_score(ttp);
        self
    }

    /// Replace the confidence level, clamped.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_level = clamp_score(confidence);
        self
    }

    pub fn is_originator(&self) -> bool {
        self.company_type == CompanyType::Originator
    }

    pub fn has_input_materials(&self) -> bool {
        !self.input_materials.is_empty()
    }

    /// Originator, or declares inputs that all link to an upstream PO.
    pub fn is_traceable(&self) -> bool {
        self.is_originator()
            || (self.has_input_materials() && self.input_materials.iter().all(InputMaterial::is_linked))
    }

    /// A non-originator that declares no inputs cannot be traced upstream.
    pub fn has_input_gap(&self) -> bool {
        !self.is_originator() && !self.has_input_materials()
    }

    pub fn completeness_level(&self) -> DataCompletenessLevel {
        DataCompletenessLevel::from_score(self.data_completeness_score)
    }

    /// Normalised certification labels held by this node.
    pub fn normalized_certifications(&self) -> impl Iterator<Item = String> + '_ {
        self.certifications.iter().map(|c| normalize_certification(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::purchase_order::{
        CompanyRef, ConfirmationData, GeoCoordinates, OriginData, ProductRef, TransformationData,
    };

    fn create_test_po(company_type: CompanyType, origin: Option<OriginData>) -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::from_u128(1),
            po_number: "PO-0001".to_string(),
            quantity: 1000.0,
            unit: "kg".to_string(),
            seller_company: CompanyRef {
                id: Uuid::from_u128(100),
                company_type,
            },
            buyer_company: None,
            product: ProductRef {
                id: Uuid::from_u128(200),
                category: Some("palm_oil".to_string()),
            },
            confirmation_data: Some(ConfirmationData {
                origin_data: origin,
                transformation_data: Some(TransformationData::default()),
                confirmed_at: None,
            }),
        }
    }

    #[test]
    fn test_normalize_certification() {
        assert_eq!(normalize_certification(" rainforest-alliance "), "RAINFOREST_ALLIANCE");
        assert_eq!(normalize_certification("Fair Trade"), "FAIR_TRADE");
        assert!(is_high_value_certification("rspo"));
        assert!(!is_high_value_certification("ISO9001"));
    }

    #[test]
    fn test_certification_tier_from_counts() {
        assert_eq!(CertificationTier::from_counts(0, 0), None);
        assert_eq!(CertificationTier::from_counts(2, 0), Some(CertificationTier::Basic));
        assert_eq!(CertificationTier::from_counts(1, 1), Some(CertificationTier::Standard));
        assert_eq!(CertificationTier::from_counts(2, 2), Some(CertificationTier::Premium));
        assert_eq!(CertificationTier::from_counts(4, 3), Some(CertificationTier::Elite));
    }

    #[test]
    fn test_fully_documented_originator_is_complete() {
        let origin = OriginData {
            farm_id: Some("FARM-7".to_string()),
            geographic_coordinates: Some(GeoCoordinates {
                latitude: 1.2,
                longitude: 103.8,
            }),
            certifications: vec!["RSPO".to_string(), "NDPE".to_string()],
            ..Default::default()
        };
        let node = Node::from_purchase_order(&create_test_po(CompanyType::Originator, Some(origin)), 0);

        assert!(node.has_origin_data);
        assert!(node.has_geographic_coordinates);
        assert_eq!(node.certification_count, 2);
        assert_eq!(node.high_value_certification_count, 2);
        assert_eq!(node.certification_tier, Some(CertificationTier::Premium));
        assert!((node.data_completeness_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(node.completeness_level(), DataCompletenessLevel::Complete);
        assert!((node.degradation_factor - 1.0).abs() < f64::EPSILON);
        assert!(node.visited_at.is_none());
    }

    #[test]
    fn test_processor_without_inputs_has_gap() {
        let node = Node::from_purchase_order(&create_test_po(CompanyType::Processor, None), 2);

        assert!(!node.has_origin_data);
        assert!(node.has_input_gap());
        assert!(!node.is_traceable());
        assert_eq!(node.depth, 2);
        // po_number, quantity, unit, category
        assert!((node.data_completeness_score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_origin_block_is_not_origin_data() {
        let node = Node::from_purchase_order(
            &create_test_po(CompanyType::Originator, Some(OriginData::default())),
            0,
        );
        assert!(!node.has_origin_data);
    }

    #[test]
    fn test_score_setters_clamp() {
        let node = Node::from_purchase_order(&create_test_po(CompanyType::Trader, None), 0)
            .with_base_scores(1.7, -0.2)
            .with_confidence(f64::NAN);
        assert!((node.base_ttm_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(node.base_ttp_score, 0.0);
        assert_eq!(node.confidence_level, 0.0);
    }
}
