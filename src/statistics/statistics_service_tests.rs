use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::NO_DATA_SENTINEL;
use crate::deliveries::deliveries_model::{Delivery, DeliveryApp};
use crate::expenses::expenses_model::Expense;
use crate::shifts::shifts_model::Shift;
use crate::statistics::statistics_service::{
    compute_delivery_stats, compute_expense_stats, compute_shift_stats,
};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn delivery(
    app: DeliveryApp,
    time: &str,
    base: Decimal,
    tip: Decimal,
    mileage: Decimal,
    restaurant: &str,
    neighborhood: &str,
) -> Delivery {
    Delivery {
        id: uuid::Uuid::new_v4().to_string(),
        app,
        delivery_time: ts(time),
        base_pay: base,
        tip_pay: tip,
        total_pay: base + tip,
        mileage,
        restaurant: restaurant.to_string(),
        customer_neighborhood: neighborhood.to_string(),
        notes: None,
        created_at: ts(time),
        updated_at: ts(time),
    }
}

fn shift(id: &str, app: DeliveryApp, start: &str, end: &str) -> Shift {
    Shift {
        id: id.to_string(),
        app,
        start_time: ts(start),
        end_time: ts(end),
        created_at: ts(start),
        updated_at: ts(start),
    }
}

fn expense(date: &str, amount: Decimal, expense_type: &str) -> Expense {
    Expense {
        id: uuid::Uuid::new_v4().to_string(),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        expense_type: expense_type.to_string(),
        notes: None,
        created_at: ts("2026-01-01 00:00:00"),
        updated_at: ts("2026-01-01 00:00:00"),
    }
}

#[test]
fn test_empty_deliveries_return_sentinel_snapshot() {
    let stats = compute_delivery_stats(&[], ts("2026-03-10 12:00:00"));

    assert_eq!(stats.avg_pay, Decimal::ZERO);
    assert_eq!(stats.highest_paying_restaurant.restaurant, NO_DATA_SENTINEL);
    assert_eq!(stats.highest_paying_restaurant.avg_total_pay, Decimal::ZERO);
    assert_eq!(stats.restaurant_with_most.restaurant_with_most, NO_DATA_SENTINEL);
    assert_eq!(stats.restaurant_with_most.order_count, 0);
    assert!(stats.earnings_by_day.dates.is_empty());
    assert!(stats.tip_by_neighborhood.neighborhoods.is_empty());
    assert_eq!(stats.hourly_earnings.hours.len(), 24);
    assert_eq!(stats.hourly_earnings.hours[0], "00");
    assert_eq!(stats.hourly_earnings.hours[23], "23");
    assert!(stats.hourly_earnings.earnings.iter().all(|e| *e == 0.0));
}

#[test]
fn test_delivery_averages_and_donut() {
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(4.00),
            dec!(2.00),
            dec!(1.5),
            "Thai Spoon",
            "Downtown",
        ),
        delivery(
            DeliveryApp::Doordash,
            "2026-03-03 19:00:00",
            dec!(6.00),
            dec!(4.00),
            dec!(2.5),
            "Burger Barn",
            "Midtown",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.avg_pay, dec!(8.00));
    assert_eq!(stats.avg_base, dec!(5.00));
    assert_eq!(stats.avg_tip, dec!(3.00));
    assert_eq!(stats.donut.total_pay, dec!(16.00));
    assert_eq!(stats.donut.total_base_pay, dec!(10.00));
    assert_eq!(stats.donut.total_tip_pay, dec!(6.00));
    assert_eq!(
        stats.donut.total_pay,
        stats.donut.total_base_pay + stats.donut.total_tip_pay
    );
    assert_eq!(stats.dollar_per_mile, dec!(4.00));
    assert_eq!(stats.tip_per_mile, dec!(1.50));
}

#[test]
fn test_per_delivery_averages_and_per_mile_rates() {
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(3.00),
            dec!(2.50),
            dec!(1.2),
            "Thai Spoon",
            "Downtown",
        ),
        delivery(
            DeliveryApp::Doordash,
            "2026-03-03 19:00:00",
            dec!(4.50),
            dec!(2.00),
            dec!(1.5),
            "Burger Barn",
            "Midtown",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.avg_pay, dec!(6.00));
    assert_eq!(stats.avg_base, dec!(3.75));
    assert_eq!(stats.avg_tip, dec!(2.25));
    // 12.0 over 2.7 miles
    assert_eq!(stats.dollar_per_mile.round_dp(2), dec!(4.44));
}

#[test]
fn test_zero_total_mileage_guards_per_mile_rates() {
    let deliveries = vec![delivery(
        DeliveryApp::Grubhub,
        "2026-03-02 18:00:00",
        dec!(5.00),
        dec!(5.00),
        dec!(0),
        "Pizza Place",
        "Uptown",
    )];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.dollar_per_mile, Decimal::ZERO);
    assert_eq!(stats.tip_per_mile, Decimal::ZERO);
}

#[test]
fn test_restaurant_leaders_break_ties_alphabetically() {
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(5.00),
            dec!(5.00),
            dec!(1),
            "Zelda's",
            "Downtown",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 19:00:00",
            dec!(5.00),
            dec!(5.00),
            dec!(1),
            "Alma's",
            "Downtown",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.highest_paying_restaurant.restaurant, "Alma's");
    assert_eq!(stats.highest_paying_restaurant.avg_total_pay, dec!(10.00));
    assert_eq!(stats.restaurant_with_most.restaurant_with_most, "Alma's");
    assert_eq!(stats.restaurant_with_most.order_count, 1);
}

#[test]
fn test_highest_paying_uses_average_not_sum() {
    // Two cheap orders beat one rich order on the sum but not the average
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(4.00),
            dec!(2.00),
            dec!(1),
            "Volume Deli",
            "Downtown",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 19:00:00",
            dec!(4.00),
            dec!(2.00),
            dec!(1),
            "Volume Deli",
            "Downtown",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 20:00:00",
            dec!(6.00),
            dec!(4.00),
            dec!(1),
            "Steakhouse",
            "Downtown",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.highest_paying_restaurant.restaurant, "Steakhouse");
    assert_eq!(stats.highest_paying_restaurant.avg_total_pay, dec!(10.00));
    assert_eq!(stats.restaurant_with_most.restaurant_with_most, "Volume Deli");
    assert_eq!(stats.restaurant_with_most.order_count, 2);
}

#[test]
fn test_earnings_by_day_ascending_dates() {
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-05 18:00:00",
            dec!(3.00),
            dec!(1.00),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(4.00),
            dec!(2.00),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 21:00:00",
            dec!(5.00),
            dec!(3.00),
            dec!(1),
            "A",
            "N",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-06 00:00:00"));

    assert_eq!(stats.earnings_by_day.dates, vec!["2026-03-02", "2026-03-05"]);
    assert_eq!(stats.earnings_by_day.earnings, vec![14.0, 4.0]);
}

#[test]
fn test_neighborhoods_trimmed_merged_and_sorted() {
    let deliveries = vec![
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 18:00:00",
            dec!(0),
            dec!(2.00),
            dec!(1),
            "A",
            "  Midtown ",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 19:00:00",
            dec!(0),
            dec!(4.00),
            dec!(1),
            "A",
            "Midtown",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 20:00:00",
            dec!(0),
            dec!(1.00),
            dec!(1),
            "A",
            "Downtown",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(
        stats.tip_by_neighborhood.neighborhoods,
        vec!["Downtown", "Midtown"]
    );
    assert_eq!(stats.tip_by_neighborhood.tip_pays, vec![1.0, 3.0]);
}

#[test]
fn test_base_by_app_follows_ordinal_order() {
    // Insert apps out of order; the series still comes back in ordinal order
    let deliveries = vec![
        delivery(
            DeliveryApp::Instacart,
            "2026-03-02 18:00:00",
            dec!(8.00),
            dec!(0),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 19:00:00",
            dec!(4.00),
            dec!(0),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::Doordash,
            "2026-03-02 20:00:00",
            dec!(6.00),
            dec!(0),
            dec!(1),
            "A",
            "N",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(
        stats.base_by_app.apps,
        vec!["UberEats", "Doordash", "Instacart"]
    );
    assert_eq!(stats.base_by_app.base_pays, vec![4.0, 6.0, 8.0]);
}

#[test]
fn test_tip_by_app_follows_first_encounter_order() {
    let deliveries = vec![
        delivery(
            DeliveryApp::Grubhub,
            "2026-03-02 18:00:00",
            dec!(0),
            dec!(3.00),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-02 19:00:00",
            dec!(0),
            dec!(1.00),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::Grubhub,
            "2026-03-02 20:00:00",
            dec!(0),
            dec!(5.00),
            dec!(1),
            "A",
            "N",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, ts("2026-03-04 00:00:00"));

    assert_eq!(stats.tip_by_app.tip_apps, vec!["Grubhub", "UberEats"]);
    assert_eq!(stats.tip_by_app.app_tip_pays, vec![4.0, 1.0]);
}

#[test]
fn test_hourly_earnings_only_counts_trailing_week() {
    let now = ts("2026-03-10 12:00:00");
    let deliveries = vec![
        // Inside the window, 18:00 hour
        delivery(
            DeliveryApp::UberEats,
            "2026-03-08 18:15:00",
            dec!(4.00),
            dec!(2.00),
            dec!(1),
            "A",
            "N",
        ),
        delivery(
            DeliveryApp::UberEats,
            "2026-03-09 18:45:00",
            dec!(6.00),
            dec!(4.00),
            dec!(1),
            "A",
            "N",
        ),
        // Older than seven days, ignored
        delivery(
            DeliveryApp::UberEats,
            "2026-02-20 18:00:00",
            dec!(50.00),
            dec!(50.00),
            dec!(1),
            "A",
            "N",
        ),
    ];
    let stats = compute_delivery_stats(&deliveries, now);

    assert_eq!(stats.hourly_earnings.hours.len(), 24);
    assert_eq!(stats.hourly_earnings.hours[0], "00");
    assert_eq!(stats.hourly_earnings.hours[23], "23");
    assert_eq!(stats.hourly_earnings.earnings[18], 8.0);
    for (hour, earning) in stats.hourly_earnings.earnings.iter().enumerate() {
        if hour != 18 {
            assert_eq!(*earning, 0.0, "hour {:02} should be empty", hour);
        }
    }
}

#[test]
fn test_hourly_earnings_keeps_deliveries_logged_ahead_of_now() {
    // Entries stamped after the recompute instant still count, the window
    // only has a lower bound.
    let now = ts("2026-03-10 12:00:00");
    let deliveries = vec![delivery(
        DeliveryApp::UberEats,
        "2026-03-10 14:30:00",
        dec!(5.00),
        dec!(3.00),
        dec!(1),
        "A",
        "N",
    )];
    let stats = compute_delivery_stats(&deliveries, now);

    assert_eq!(stats.hourly_earnings.earnings[14], 8.0);
}

#[test]
fn test_empty_shifts_return_sentinel_snapshot() {
    let stats = compute_shift_stats(&[], &HashMap::new());

    assert_eq!(stats.average_shift_length, Decimal::ZERO);
    assert_eq!(stats.app_with_most_shifts, NO_DATA_SENTINEL);
    assert_eq!(stats.average_deliveries_for_shift, Decimal::ZERO);
}

#[test]
fn test_shift_length_averaged_in_minutes() {
    let shifts = vec![
        shift("s1", DeliveryApp::UberEats, "2026-03-02 18:00:00", "2026-03-02 20:00:00"),
        shift("s2", DeliveryApp::UberEats, "2026-03-03 18:00:00", "2026-03-03 19:00:00"),
    ];
    let stats = compute_shift_stats(&shifts, &HashMap::new());

    // (120 + 60) / 2
    assert_eq!(stats.average_shift_length, dec!(90));
}

#[test]
fn test_uneven_shift_lengths_average_out() {
    let shifts = vec![
        shift("s1", DeliveryApp::UberEats, "2026-03-02 18:00:00", "2026-03-02 19:00:00"),
        shift("s2", DeliveryApp::UberEats, "2026-03-03 18:00:00", "2026-03-03 20:00:00"),
        shift("s3", DeliveryApp::UberEats, "2026-03-04 18:00:00", "2026-03-04 19:00:00"),
    ];
    let stats = compute_shift_stats(&shifts, &HashMap::new());

    // (60 + 120 + 60) / 3
    assert_eq!(stats.average_shift_length, dec!(80));
}

#[test]
fn test_delivery_average_over_three_shifts_with_two_links() {
    let shifts = vec![
        shift("s1", DeliveryApp::UberEats, "2026-03-02 18:00:00", "2026-03-02 20:00:00"),
        shift("s2", DeliveryApp::UberEats, "2026-03-03 18:00:00", "2026-03-03 20:00:00"),
        shift("s3", DeliveryApp::UberEats, "2026-03-04 18:00:00", "2026-03-04 20:00:00"),
    ];
    let mut counts = HashMap::new();
    counts.insert("s1".to_string(), 1i64);
    counts.insert("s2".to_string(), 1i64);
    let stats = compute_shift_stats(&shifts, &counts);

    assert_eq!(stats.average_deliveries_for_shift.round_dp(2), dec!(0.67));
}

#[test]
fn test_shifts_without_links_count_toward_delivery_average() {
    let shifts = vec![
        shift("s1", DeliveryApp::UberEats, "2026-03-02 18:00:00", "2026-03-02 20:00:00"),
        shift("s2", DeliveryApp::Doordash, "2026-03-03 18:00:00", "2026-03-03 20:00:00"),
        shift("s3", DeliveryApp::Doordash, "2026-03-04 18:00:00", "2026-03-04 20:00:00"),
    ];
    let mut counts = HashMap::new();
    counts.insert("s1".to_string(), 6i64);
    // s2 and s3 have no linkage rows at all
    let stats = compute_shift_stats(&shifts, &counts);

    assert_eq!(stats.average_deliveries_for_shift, dec!(2));
    assert_eq!(stats.app_with_most_shifts, "Doordash");
}

#[test]
fn test_app_with_most_shifts_tie_breaks_alphabetically() {
    let shifts = vec![
        shift("s1", DeliveryApp::UberEats, "2026-03-02 18:00:00", "2026-03-02 20:00:00"),
        shift("s2", DeliveryApp::Doordash, "2026-03-03 18:00:00", "2026-03-03 20:00:00"),
    ];
    let stats = compute_shift_stats(&shifts, &HashMap::new());

    assert_eq!(stats.app_with_most_shifts, "Doordash");
}

#[test]
fn test_empty_expenses_return_sentinel_snapshot() {
    let stats = compute_expense_stats(&[]);

    assert_eq!(stats.average_monthly_spending, Decimal::ZERO);
    assert!(stats.average_spending_by_type.is_empty());
}

#[test]
fn test_expense_averages_use_distinct_months() {
    let expenses = vec![
        expense("2026-01-05", dec!(30.00), "Gas"),
        expense("2026-01-20", dec!(10.00), "Gas"),
        expense("2026-02-10", dec!(20.00), "Maintenance"),
    ];
    let stats = compute_expense_stats(&expenses);

    // 60 over two months with activity
    assert_eq!(stats.average_monthly_spending, dec!(30.00));
    assert_eq!(stats.average_spending_by_type.len(), 2);
    assert_eq!(stats.average_spending_by_type[0].expense_type, "Gas");
    assert_eq!(stats.average_spending_by_type[0].avg_expense, dec!(20.00));
    assert_eq!(stats.average_spending_by_type[1].expense_type, "Maintenance");
    assert_eq!(stats.average_spending_by_type[1].avg_expense, dec!(10.00));
}

#[test]
fn test_single_month_spending_divides_by_one() {
    let expenses = vec![
        expense("2026-01-05", dec!(100.00), "Gas"),
        expense("2026-01-20", dec!(40.00), "Car Maintenance"),
    ];
    let stats = compute_expense_stats(&expenses);

    assert_eq!(stats.average_monthly_spending, dec!(140.00));
    assert_eq!(stats.average_spending_by_type[0].expense_type, "Car Maintenance");
    assert_eq!(stats.average_spending_by_type[0].avg_expense, dec!(40.00));
    assert_eq!(stats.average_spending_by_type[1].expense_type, "Gas");
    assert_eq!(stats.average_spending_by_type[1].avg_expense, dec!(100.00));
}

#[test]
fn test_same_month_across_years_buckets_separately() {
    let expenses = vec![
        expense("2025-03-05", dec!(40.00), "Gas"),
        expense("2026-03-05", dec!(20.00), "Gas"),
    ];
    let stats = compute_expense_stats(&expenses);

    assert_eq!(stats.average_monthly_spending, dec!(30.00));
}
