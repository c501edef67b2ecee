/// Decimal scale of minor currency units (cents)
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Smallest storable transaction amount, in minor units
pub const MIN_TRANSACTION_AMOUNT: i64 = 1;

/// Percent value of a fully funded goal or completed course
pub const FULL_PROGRESS: i32 = 100;
