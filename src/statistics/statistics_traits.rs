use crate::statistics::statistics_model::{DeliveryStats, ExpenseStats, ShiftStats};
use crate::Result;

/// Trait for assembling per-user statistics snapshots
pub trait StatisticsServiceTrait: Send + Sync {
    /// Full delivery snapshot, rounded for display
    fn calculate_delivery_stats(&self, user_id: &str) -> Result<DeliveryStats>;

    /// Shift snapshot, including linked-delivery averages
    fn calculate_shift_stats(&self, user_id: &str) -> Result<ShiftStats>;

    /// Expense snapshot with per-month averages
    fn calculate_expense_stats(&self, user_id: &str) -> Result<ExpenseStats>;
}
