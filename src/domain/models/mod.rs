pub mod config;
pub mod node;
pub mod path;
pub mod policy;
pub mod purchase_order;
pub mod result;
pub mod suggestion;

pub use config::{CacheConfig, Config, EngineConfig, LoggingConfig};
pub use node::{
    clamp_score, CertificationTier, CompanyType, DataCompletenessLevel, Node,
    HIGH_VALUE_CERTIFICATIONS,
};
pub use path::{Path, PathScores};
pub use policy::{CyclePolicy, TraversalMode};
pub use purchase_order::{
    CompanyRef, ConfirmationData, GeoCoordinates, InputMaterial, OriginData, ProductRef,
    PurchaseOrder, SourceReference, TransformationData,
};
pub use result::{ConfidenceLevel, TransparencyResult};
pub use suggestion::{EffortEstimate, ImprovementSuggestion, SuggestionPriority};
