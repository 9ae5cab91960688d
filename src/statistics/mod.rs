pub(crate) mod statistics_model;
pub(crate) mod statistics_service;
pub(crate) mod statistics_traits;

#[cfg(test)]
mod statistics_service_tests;

pub use statistics_model::{
    AppBasePaySeries, AppTipPaySeries, DailyEarningsSeries, DeliveryStats, DonutData,
    ExpenseStats, HourlyEarningsSeries, NeighborhoodTipSeries, RestaurantOrderLeader,
    RestaurantPayLeader, ShiftStats, StatsKind, TypeSpending,
};
pub use statistics_service::{
    compute_delivery_stats, compute_expense_stats, compute_shift_stats, StatisticsService,
};
pub use statistics_traits::StatisticsServiceTrait;
