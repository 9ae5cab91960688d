/// Decimal precision for snapshot values pushed to clients
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Trailing window for the hourly earnings series, in days
pub const HOURLY_EARNINGS_WINDOW_DAYS: i64 = 7;

/// Sentinel name for "winner" metrics when there is no data
pub const NO_DATA_SENTINEL: &str = "N/A";
