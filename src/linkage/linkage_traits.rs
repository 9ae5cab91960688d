use std::collections::HashMap;

use crate::deliveries::deliveries_model::Delivery;
use crate::linkage::linkage_errors::Result;
use crate::linkage::linkage_model::ShiftDelivery;

/// Trait for reads against the derived linkage table
pub trait LinkageRepositoryTrait: Send + Sync {
    /// Linkage row count per shift id; shifts with no rows are absent
    fn counts_by_shift(&self, user_id: &str) -> Result<HashMap<String, i64>>;

    /// Deliveries linked to a shift, earliest first
    fn deliveries_for_shift(&self, user_id: &str, shift_id: &str) -> Result<Vec<Delivery>>;

    /// All linkage rows owned by the user
    fn rows_for_owner(&self, user_id: &str) -> Result<Vec<ShiftDelivery>>;
}

/// Trait for explicit linkage operations exposed to callers
pub trait LinkageServiceTrait: Send + Sync {
    /// Manually link a delivery to a shift after validating window and app
    fn link(&self, user_id: &str, shift_id: &str, delivery_id: &str) -> Result<()>;

    fn deliveries_for_shift(&self, user_id: &str, shift_id: &str) -> Result<Vec<Delivery>>;

    fn counts_by_shift(&self, user_id: &str) -> Result<HashMap<String, i64>>;

    fn rows_for_owner(&self, user_id: &str) -> Result<Vec<ShiftDelivery>>;
}
