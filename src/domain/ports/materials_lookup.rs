use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::InputMaterial;

/// Port for reading a PO's declared input materials without a full fetch.
///
/// Unknown POs yield an empty list.
pub trait MaterialsLookup: Send + Sync {
    /// Input materials declared on the given purchase order
    fn get_input_materials(&self, po_id: Uuid) -> DomainResult<Vec<InputMaterial>>;
}

impl<T: MaterialsLookup + ?Sized> MaterialsLookup for std::sync::Arc<T> {
    fn get_input_materials(&self, po_id: Uuid) -> DomainResult<Vec<InputMaterial>> {
        (**self).get_input_materials(po_id)
    }
}
