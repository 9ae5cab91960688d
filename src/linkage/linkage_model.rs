use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A linkage row asserting a delivery was performed during a shift.
/// Derived state: always re-derivable from the delivery and shift tables.
#[derive(
    Queryable, Selectable, Identifiable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::shift_deliveries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ShiftDelivery {
    pub id: String,
    pub user_id: String,
    pub shift_id: String,
    pub delivery_id: String,
}
