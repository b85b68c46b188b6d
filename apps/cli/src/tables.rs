//! Table formatting for CLI output.

use chrono::{DateTime, Utc};

use kardex_core::{report, Product};

/// Total rendered width of the report table.
const TABLE_WIDTH: usize = 98;

/// Truncates a string to a maximum length, adding "..." if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Prints the management report: one row per product plus summary totals.
pub fn print_report(products: &[Product], now: DateTime<Utc>) {
    print_separator(TABLE_WIDTH);
    println!(
        "| {:<4} | {:<24} | {:<14} | {:>9} | {:>5} | {:<6} | {:>14} |",
        "ID", "Name", "Category", "Price", "Qty", "Status", "Days in stock"
    );
    print_separator(TABLE_WIDTH);

    for product in products {
        let days = report::days_in_stock(product.registered_at, product.last_outflow_at, now);
        println!(
            "| {:<4} | {:<24} | {:<14} | {:>9} | {:>5} | {:<6} | {:>14} |",
            product.id,
            truncate_string(&product.name, 24),
            truncate_string(product.category_label(), 14),
            product.price().to_string(),
            product.quantity,
            product.status().to_string(),
            format!("{days} days"),
        );
    }

    print_separator(TABLE_WIDTH);
    let summary = report::report_summary(products);
    println!("Distinct products registered: {}", summary.product_count);
    println!("Total stock cost: {}", summary.total_cost);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hello", 5), "Hello");
    }
}
