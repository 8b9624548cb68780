/// Palette cycled over portfolio components, in composition order.
pub const COMPONENT_COLOR_PALETTE: [&str; 9] = [
    "#FF6B6B", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6", "#3498DB", "#E74C3C",
    "#2ECC71",
];

/// Line colors for the portfolio chart.
pub const REAL_SERIES_COLOR: &str = "#4ECDC4";
pub const EXPECTED_SERIES_COLOR: &str = "#3498DB";
pub const BEST_SERIES_COLOR: &str = "#2ECC71";
pub const WORST_SERIES_COLOR: &str = "#E74C3C";

/// Default months on each side of the reference date kept in the display window
pub const DEFAULT_WINDOW_MONTHS_BACK: u32 = 5;
pub const DEFAULT_WINDOW_MONTHS_FORWARD: u32 = 5;

/// Number of trailing rows shown by the history table
pub const HISTORY_TABLE_DISPLAY_ROWS: usize = 10;

/// Decimal precision for percentages
pub const PERCENT_DECIMAL_PRECISION: u32 = 6;

/// Prefix for components without any usable name
pub const FALLBACK_COMPONENT_NAME_PREFIX: &str = "Fund";

/// Currency symbol appended to chart dataset labels
pub const CURRENCY_SYMBOL: &str = "€";
