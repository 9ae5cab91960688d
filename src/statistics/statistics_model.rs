use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, NO_DATA_SENTINEL};

/// The three snapshot kinds a mutation can invalidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsKind {
    DeliveryStats,
    ShiftStats,
    ExpenseStats,
}

/// Restaurant with the highest average total pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPayLeader {
    pub restaurant: String,
    pub avg_total_pay: Decimal,
}

/// Restaurant with the most orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOrderLeader {
    pub restaurant_with_most: String,
    pub order_count: i64,
}

/// Total earnings per calendar day, dates ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEarningsSeries {
    pub dates: Vec<String>,
    pub earnings: Vec<f64>,
}

/// Average tip per neighborhood, names ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodTipSeries {
    pub neighborhoods: Vec<String>,
    pub tip_pays: Vec<f64>,
}

/// Average base pay per app, apps in ordinal order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBasePaySeries {
    pub apps: Vec<String>,
    pub base_pays: Vec<f64>,
}

/// Average tip pay per app, apps in first-encounter order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTipPaySeries {
    pub tip_apps: Vec<String>,
    pub app_tip_pays: Vec<f64>,
}

/// Average earnings per hour of day over the trailing week.
/// For any non-empty record set this carries exactly 24 entries,
/// labels "00".."23"; the empty sentinel leaves it empty like every
/// other series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyEarningsSeries {
    pub hours: Vec<String>,
    pub earnings: Vec<f64>,
}

/// Pay composition totals for the donut chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutData {
    pub total_pay: Decimal,
    pub total_base_pay: Decimal,
    pub total_tip_pay: Decimal,
}

/// Snapshot of derived delivery statistics for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStats {
    pub avg_pay: Decimal,
    pub avg_base: Decimal,
    pub avg_tip: Decimal,
    pub highest_paying_restaurant: RestaurantPayLeader,
    pub restaurant_with_most: RestaurantOrderLeader,
    pub dollar_per_mile: Decimal,
    pub tip_per_mile: Decimal,
    pub earnings_by_day: DailyEarningsSeries,
    pub tip_by_neighborhood: NeighborhoodTipSeries,
    pub base_by_app: AppBasePaySeries,
    pub tip_by_app: AppTipPaySeries,
    pub hourly_earnings: HourlyEarningsSeries,
    pub donut: DonutData,
}

impl DeliveryStats {
    /// Sentinel snapshot for a user with no deliveries. The dashboard relies
    /// on these exact defaults instead of null handling.
    pub fn empty() -> Self {
        DeliveryStats {
            avg_pay: Decimal::ZERO,
            avg_base: Decimal::ZERO,
            avg_tip: Decimal::ZERO,
            highest_paying_restaurant: RestaurantPayLeader {
                restaurant: NO_DATA_SENTINEL.to_string(),
                avg_total_pay: Decimal::ZERO,
            },
            restaurant_with_most: RestaurantOrderLeader {
                restaurant_with_most: NO_DATA_SENTINEL.to_string(),
                order_count: 0,
            },
            dollar_per_mile: Decimal::ZERO,
            tip_per_mile: Decimal::ZERO,
            earnings_by_day: DailyEarningsSeries {
                dates: Vec::new(),
                earnings: Vec::new(),
            },
            tip_by_neighborhood: NeighborhoodTipSeries {
                neighborhoods: Vec::new(),
                tip_pays: Vec::new(),
            },
            base_by_app: AppBasePaySeries {
                apps: Vec::new(),
                base_pays: Vec::new(),
            },
            tip_by_app: AppTipPaySeries {
                tip_apps: Vec::new(),
                app_tip_pays: Vec::new(),
            },
            hourly_earnings: HourlyEarningsSeries::zeroed(),
            donut: DonutData {
                total_pay: Decimal::ZERO,
                total_base_pay: Decimal::ZERO,
                total_tip_pay: Decimal::ZERO,
            },
        }
    }

    /// Rounds the scalar money fields for display; chart series stay raw
    pub(crate) fn rounded(mut self) -> Self {
        self.avg_pay = self.avg_pay.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.avg_base = self.avg_base.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.avg_tip = self.avg_tip.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.highest_paying_restaurant.avg_total_pay = self
            .highest_paying_restaurant
            .avg_total_pay
            .round_dp(DISPLAY_DECIMAL_PRECISION);
        self.dollar_per_mile = self.dollar_per_mile.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.tip_per_mile = self.tip_per_mile.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.donut.total_pay = self.donut.total_pay.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.donut.total_base_pay = self.donut.total_base_pay.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.donut.total_tip_pay = self.donut.total_tip_pay.round_dp(DISPLAY_DECIMAL_PRECISION);
        self
    }
}

impl HourlyEarningsSeries {
    /// All 24 hour labels with zero earnings
    pub fn zeroed() -> Self {
        HourlyEarningsSeries {
            hours: (0..24).map(|h| format!("{:02}", h)).collect(),
            earnings: vec![0.0; 24],
        }
    }
}

/// Snapshot of derived shift statistics for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftStats {
    pub average_shift_length: Decimal,
    pub app_with_most_shifts: String,
    pub average_deliveries_for_shift: Decimal,
}

impl ShiftStats {
    pub fn empty() -> Self {
        ShiftStats {
            average_shift_length: Decimal::ZERO,
            app_with_most_shifts: NO_DATA_SENTINEL.to_string(),
            average_deliveries_for_shift: Decimal::ZERO,
        }
    }

    pub(crate) fn rounded(mut self) -> Self {
        self.average_shift_length = self
            .average_shift_length
            .round_dp(DISPLAY_DECIMAL_PRECISION);
        self.average_deliveries_for_shift = self
            .average_deliveries_for_shift
            .round_dp(DISPLAY_DECIMAL_PRECISION);
        self
    }
}

/// Average monthly spend for one expense type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpending {
    pub expense_type: String,
    pub avg_expense: Decimal,
}

/// Snapshot of derived expense statistics for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub average_monthly_spending: Decimal,
    pub average_spending_by_type: Vec<TypeSpending>,
}

impl ExpenseStats {
    pub fn empty() -> Self {
        ExpenseStats {
            average_monthly_spending: Decimal::ZERO,
            average_spending_by_type: Vec::new(),
        }
    }

    pub(crate) fn rounded(mut self) -> Self {
        self.average_monthly_spending = self
            .average_monthly_spending
            .round_dp(DISPLAY_DECIMAL_PRECISION);
        for entry in self.average_spending_by_type.iter_mut() {
            entry.avg_expense = entry.avg_expense.round_dp(DISPLAY_DECIMAL_PRECISION);
        }
        self
    }
}
