use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Utc};
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::HOURLY_EARNINGS_WINDOW_DAYS;
use crate::deliveries::deliveries_model::{Delivery, DeliveryApp};
use crate::deliveries::deliveries_traits::DeliveryRepositoryTrait;
use crate::expenses::expenses_model::Expense;
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::linkage::linkage_traits::LinkageRepositoryTrait;
use crate::shifts::shifts_model::Shift;
use crate::shifts::shifts_traits::ShiftRepositoryTrait;
use crate::statistics::statistics_model::{
    AppBasePaySeries, AppTipPaySeries, DailyEarningsSeries, DeliveryStats, DonutData,
    ExpenseStats, HourlyEarningsSeries, NeighborhoodTipSeries, RestaurantOrderLeader,
    RestaurantPayLeader, ShiftStats, TypeSpending,
};
use crate::statistics::statistics_traits::StatisticsServiceTrait;
use crate::Result;

/// Computes the full delivery snapshot from the user's deliveries.
///
/// `now` anchors the trailing window of the hourly series so the result is
/// deterministic for a fixed input.
pub fn compute_delivery_stats(deliveries: &[Delivery], now: NaiveDateTime) -> DeliveryStats {
    if deliveries.is_empty() {
        return DeliveryStats::empty();
    }

    let count = Decimal::from(deliveries.len());
    let mut total_pay = Decimal::ZERO;
    let mut total_base = Decimal::ZERO;
    let mut total_tip = Decimal::ZERO;
    let mut total_mileage = Decimal::ZERO;
    for d in deliveries {
        total_pay += d.total_pay;
        total_base += d.base_pay;
        total_tip += d.tip_pay;
        total_mileage += d.mileage;
    }

    let (dollar_per_mile, tip_per_mile) = if total_mileage.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (total_pay / total_mileage, total_tip / total_mileage)
    };

    DeliveryStats {
        avg_pay: total_pay / count,
        avg_base: total_base / count,
        avg_tip: total_tip / count,
        highest_paying_restaurant: highest_paying_restaurant(deliveries),
        restaurant_with_most: restaurant_with_most_orders(deliveries),
        dollar_per_mile,
        tip_per_mile,
        earnings_by_day: earnings_by_day(deliveries),
        tip_by_neighborhood: tip_by_neighborhood(deliveries),
        base_by_app: base_by_app(deliveries),
        tip_by_app: tip_by_app(deliveries),
        hourly_earnings: hourly_earnings(deliveries, now),
        donut: DonutData {
            total_pay,
            total_base_pay: total_base,
            total_tip_pay: total_tip,
        },
    }
}

fn highest_paying_restaurant(deliveries: &[Delivery]) -> RestaurantPayLeader {
    let mut sums: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for d in deliveries {
        let entry = sums.entry(d.restaurant.as_str()).or_default();
        entry.0 += d.total_pay;
        entry.1 += 1;
    }
    let mut best: Option<(&str, Decimal)> = None;
    for (name, (sum, n)) in sums {
        let avg = sum / Decimal::from(n);
        let better = match best {
            None => true,
            // Ties resolve to the lexicographically smaller name
            Some((best_name, best_avg)) => avg > best_avg || (avg == best_avg && name < best_name),
        };
        if better {
            best = Some((name, avg));
        }
    }
    match best {
        Some((name, avg)) => RestaurantPayLeader {
            restaurant: name.to_string(),
            avg_total_pay: avg,
        },
        None => DeliveryStats::empty().highest_paying_restaurant,
    }
}

fn restaurant_with_most_orders(deliveries: &[Delivery]) -> RestaurantOrderLeader {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for d in deliveries {
        *counts.entry(d.restaurant.as_str()).or_default() += 1;
    }
    let mut best: Option<(&str, i64)> = None;
    for (name, n) in counts {
        let better = match best {
            None => true,
            Some((best_name, best_n)) => n > best_n || (n == best_n && name < best_name),
        };
        if better {
            best = Some((name, n));
        }
    }
    match best {
        Some((name, n)) => RestaurantOrderLeader {
            restaurant_with_most: name.to_string(),
            order_count: n,
        },
        None => DeliveryStats::empty().restaurant_with_most,
    }
}

fn earnings_by_day(deliveries: &[Delivery]) -> DailyEarningsSeries {
    let mut by_day: std::collections::BTreeMap<chrono::NaiveDate, Decimal> = Default::default();
    for d in deliveries {
        *by_day.entry(d.delivery_time.date()).or_default() += d.total_pay;
    }
    let mut series = DailyEarningsSeries {
        dates: Vec::with_capacity(by_day.len()),
        earnings: Vec::with_capacity(by_day.len()),
    };
    for (date, sum) in by_day {
        series.dates.push(date.format("%Y-%m-%d").to_string());
        series.earnings.push(sum.to_f64().unwrap_or(0.0));
    }
    series
}

fn tip_by_neighborhood(deliveries: &[Delivery]) -> NeighborhoodTipSeries {
    let mut by_hood: std::collections::BTreeMap<&str, (Decimal, i64)> = Default::default();
    for d in deliveries {
        let entry = by_hood.entry(d.customer_neighborhood.trim()).or_default();
        entry.0 += d.tip_pay;
        entry.1 += 1;
    }
    let mut series = NeighborhoodTipSeries {
        neighborhoods: Vec::with_capacity(by_hood.len()),
        tip_pays: Vec::with_capacity(by_hood.len()),
    };
    for (name, (sum, n)) in by_hood {
        series.neighborhoods.push(name.to_string());
        series
            .tip_pays
            .push((sum / Decimal::from(n)).to_f64().unwrap_or(0.0));
    }
    series
}

fn base_by_app(deliveries: &[Delivery]) -> AppBasePaySeries {
    let mut by_app: HashMap<DeliveryApp, (Decimal, i64)> = HashMap::new();
    for d in deliveries {
        let entry = by_app.entry(d.app).or_default();
        entry.0 += d.base_pay;
        entry.1 += 1;
    }
    let mut series = AppBasePaySeries {
        apps: Vec::with_capacity(by_app.len()),
        base_pays: Vec::with_capacity(by_app.len()),
    };
    // Fixed ordinal order so the chart axis is stable across refreshes
    for app in DeliveryApp::ALL {
        if let Some((sum, n)) = by_app.get(&app) {
            series.apps.push(app.to_string());
            series
                .base_pays
                .push((*sum / Decimal::from(*n)).to_f64().unwrap_or(0.0));
        }
    }
    series
}

fn tip_by_app(deliveries: &[Delivery]) -> AppTipPaySeries {
    let mut order: Vec<DeliveryApp> = Vec::new();
    let mut by_app: HashMap<DeliveryApp, (Decimal, i64)> = HashMap::new();
    for d in deliveries {
        let entry = by_app.entry(d.app).or_insert_with(|| {
            order.push(d.app);
            Default::default()
        });
        entry.0 += d.tip_pay;
        entry.1 += 1;
    }
    let mut series = AppTipPaySeries {
        tip_apps: Vec::with_capacity(order.len()),
        app_tip_pays: Vec::with_capacity(order.len()),
    };
    for app in order {
        let (sum, n) = by_app[&app];
        series.tip_apps.push(app.to_string());
        series
            .app_tip_pays
            .push((sum / Decimal::from(n)).to_f64().unwrap_or(0.0));
    }
    series
}

fn hourly_earnings(deliveries: &[Delivery], now: NaiveDateTime) -> HourlyEarningsSeries {
    let window_start = now - Duration::days(HOURLY_EARNINGS_WINDOW_DAYS);
    let mut sums = [Decimal::ZERO; 24];
    let mut counts = [0i64; 24];
    for d in deliveries {
        if d.delivery_time >= window_start {
            let hour = d.delivery_time.hour() as usize;
            sums[hour] += d.total_pay;
            counts[hour] += 1;
        }
    }
    let mut series = HourlyEarningsSeries::zeroed();
    for hour in 0..24 {
        if counts[hour] > 0 {
            series.earnings[hour] = (sums[hour] / Decimal::from(counts[hour]))
                .to_f64()
                .unwrap_or(0.0);
        }
    }
    series
}

/// Computes the shift snapshot. `linkage_counts` maps shift id to the number
/// of linked deliveries; shifts absent from the map count as zero.
pub fn compute_shift_stats(shifts: &[Shift], linkage_counts: &HashMap<String, i64>) -> ShiftStats {
    if shifts.is_empty() {
        return ShiftStats::empty();
    }

    let count = Decimal::from(shifts.len());
    let mut total_minutes = Decimal::ZERO;
    let mut app_counts: HashMap<DeliveryApp, i64> = HashMap::new();
    let mut total_linked = Decimal::ZERO;
    for s in shifts {
        let seconds = (s.end_time - s.start_time).num_seconds();
        total_minutes += Decimal::from(seconds) / Decimal::from(60);
        *app_counts.entry(s.app).or_default() += 1;
        total_linked += Decimal::from(linkage_counts.get(&s.id).copied().unwrap_or(0));
    }

    let mut best: Option<(DeliveryApp, i64)> = None;
    for (app, n) in app_counts {
        let better = match best {
            None => true,
            Some((best_app, best_n)) => {
                n > best_n || (n == best_n && app.as_str() < best_app.as_str())
            }
        };
        if better {
            best = Some((app, n));
        }
    }

    ShiftStats {
        average_shift_length: total_minutes / count,
        app_with_most_shifts: match best {
            Some((app, _)) => app.to_string(),
            None => ShiftStats::empty().app_with_most_shifts,
        },
        average_deliveries_for_shift: total_linked / count,
    }
}

/// Computes the expense snapshot. Averages are per distinct calendar month
/// with at least one expense, not per expense row.
pub fn compute_expense_stats(expenses: &[Expense]) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats::empty();
    }

    let mut months: std::collections::BTreeSet<(i32, u32)> = Default::default();
    let mut total = Decimal::ZERO;
    let mut by_type: std::collections::BTreeMap<&str, Decimal> = Default::default();
    for e in expenses {
        months.insert((e.date.year(), e.date.month()));
        total += e.amount;
        *by_type.entry(e.expense_type.as_str()).or_default() += e.amount;
    }
    let month_count = Decimal::from(months.len());

    ExpenseStats {
        average_monthly_spending: total / month_count,
        average_spending_by_type: by_type
            .into_iter()
            .map(|(expense_type, sum)| TypeSpending {
                expense_type: expense_type.to_string(),
                avg_expense: sum / month_count,
            })
            .collect(),
    }
}

/// Read-only service that assembles display-ready statistics snapshots
pub struct StatisticsService {
    delivery_repository: Arc<dyn DeliveryRepositoryTrait>,
    shift_repository: Arc<dyn ShiftRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    linkage_repository: Arc<dyn LinkageRepositoryTrait>,
}

impl StatisticsService {
    pub fn new(
        delivery_repository: Arc<dyn DeliveryRepositoryTrait>,
        shift_repository: Arc<dyn ShiftRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        linkage_repository: Arc<dyn LinkageRepositoryTrait>,
    ) -> Self {
        StatisticsService {
            delivery_repository,
            shift_repository,
            expense_repository,
            linkage_repository,
        }
    }
}

impl StatisticsServiceTrait for StatisticsService {
    fn calculate_delivery_stats(&self, user_id: &str) -> Result<DeliveryStats> {
        debug!("Calculating delivery statistics for user {}", user_id);
        let deliveries = self.delivery_repository.get_by_owner(user_id)?;
        Ok(compute_delivery_stats(&deliveries, Utc::now().naive_utc()).rounded())
    }

    fn calculate_shift_stats(&self, user_id: &str) -> Result<ShiftStats> {
        debug!("Calculating shift statistics for user {}", user_id);
        let shifts = self.shift_repository.get_by_owner(user_id)?;
        let counts = self.linkage_repository.counts_by_shift(user_id)?;
        Ok(compute_shift_stats(&shifts, &counts).rounded())
    }

    fn calculate_expense_stats(&self, user_id: &str) -> Result<ExpenseStats> {
        debug!("Calculating expense statistics for user {}", user_id);
        let expenses = self.expense_repository.get_by_owner(user_id)?;
        Ok(compute_expense_stats(&expenses).rounded())
    }
}
