use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Length of the rolling insight comparison windows, in days
pub const INSIGHT_WINDOW_DAYS: i64 = 30;

/// Income change above this percentage is reported as growth
pub const INCOME_GROWTH_THRESHOLD: Decimal = dec!(10);

/// Income change below this percentage is reported as a decrease
pub const INCOME_DROP_THRESHOLD: Decimal = dec!(-10);

/// Expense change above this percentage is reported as high spending
pub const EXPENSE_SPIKE_THRESHOLD: Decimal = dec!(20);

/// Expense change below this percentage is reported as great savings
pub const EXPENSE_DROP_THRESHOLD: Decimal = dec!(-10);

/// Savings change above this percentage is reported as a boost
pub const SAVINGS_BOOST_THRESHOLD: Decimal = dec!(15);

/// Active goals with a deadline within this many days are flagged
pub const GOAL_DEADLINE_WINDOW_DAYS: i64 = 30;

/// Number of recent transactions shown on the dashboard
pub const RECENT_TRANSACTIONS_LIMIT: i64 = 5;

/// Number of course-progress entries shown on the dashboard
pub const COURSE_PROGRESS_LIMIT: i64 = 5;
