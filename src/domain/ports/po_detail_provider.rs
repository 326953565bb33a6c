use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::PurchaseOrder;

/// Port for resolving purchase-order details during traversal.
///
/// `Ok(None)` means the PO does not exist and the branch is abandoned.
/// `Err` means the collaborator itself failed; the engine propagates it
/// unchanged rather than treating it as missing data.
pub trait PoDetailProvider: Send + Sync {
    /// Fetch one purchase order by id
    fn get_po_details(&self, po_id: Uuid) -> DomainResult<Option<PurchaseOrder>>;
}

impl<T: PoDetailProvider + ?Sized> PoDetailProvider for std::sync::Arc<T> {
    fn get_po_details(&self, po_id: Uuid) -> DomainResult<Option<PurchaseOrder>> {
        (**self).get_po_details(po_id)
    }
}
