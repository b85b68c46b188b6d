//! Chart rendering.
//!
//! Writes three PNG dashboards into the given directory:
//! per-category stock cost, per-category quantity, and the total stock
//! level over time. Empty datasets are skipped with a warning instead of
//! failing the whole operation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::full_palette::PURPLE;

use kardex_core::{report, MovementEntry, Product};

use crate::tables::truncate_string;

/// Output file for the per-category cost chart.
pub const CATEGORY_COST_CHART: &str = "chart_category_cost.png";
/// Output file for the per-category quantity chart.
pub const CATEGORY_QUANTITY_CHART: &str = "chart_category_quantity.png";
/// Output file for the stock-over-time chart.
pub const STOCK_TIMELINE_CHART: &str = "chart_stock_timeline.png";

/// Renders every chart that has data, returning the paths written.
pub fn render_all(
    products: &[Product],
    movements: &[MovementEntry],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let totals = report::category_totals(products);
    if totals.is_empty() {
        println!("  [warn] no products yet, skipping category charts");
    } else {
        let mut by_cost = totals.clone();
        by_cost.sort_by(|a, b| b.total_cost.cmp(&a.total_cost));
        let bars: Vec<(String, i64)> = by_cost
            .iter()
            .map(|t| (t.category.clone(), t.total_cost.cents() / 100))
            .collect();
        let path = dir.join(CATEGORY_COST_CHART);
        render_category_bars(
            &path,
            "Stock cost by category",
            "Cost (USD)",
            BLUE.mix(0.8).filled(),
            &bars,
        )?;
        written.push(path);

        let mut by_quantity = totals;
        by_quantity.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        let bars: Vec<(String, i64)> = by_quantity
            .iter()
            .map(|t| (t.category.clone(), t.total_quantity))
            .collect();
        let path = dir.join(CATEGORY_QUANTITY_CHART);
        render_category_bars(
            &path,
            "Quantity by category",
            "Units on hand",
            GREEN.mix(0.8).filled(),
            &bars,
        )?;
        written.push(path);
    }

    let timeline = report::stock_timeline(movements);
    if timeline.is_empty() {
        println!("  [warn] no movement history, skipping timeline chart");
    } else {
        let path = dir.join(STOCK_TIMELINE_CHART);
        render_timeline(&path, &timeline)?;
        written.push(path);
    }

    Ok(written)
}

/// Vertical bar chart with one labelled bar per category.
fn render_category_bars(
    path: &Path,
    caption: &str,
    y_desc: &str,
    style: ShapeStyle,
    bars: &[(String, i64)],
) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = bars.iter().map(|(_, value)| *value).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(
            (0u32..bars.len() as u32).into_segmented(),
            0i64..y_max + y_max / 10 + 1,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(bars.len())
        .x_label_formatter(&|segment: &SegmentValue<u32>| match segment {
            SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => bars
                .get(*index as usize)
                .map(|(label, _)| truncate_string(label, 14))
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(style)
            .margin(8)
            .data(
                bars.iter()
                    .enumerate()
                    .map(|(index, (_, value))| (index as u32, *value)),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Line chart of the total stock level per day.
fn render_timeline(path: &Path, points: &[(NaiveDate, i64)]) -> Result<()> {
    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last()) else {
        return Ok(());
    };

    let root = BitMapBackend::new(path, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    // Pad the axis by a day so a single-day history still has width.
    let x_end = last.succ_opt().unwrap_or(last);
    let y_max = points.iter().map(|(_, level)| *level).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Total stock over time", ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(first..x_end, 0i64..y_max + y_max / 10 + 1)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .y_desc("Units on hand")
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ShapeStyle::from(&PURPLE).stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(date, level)| Circle::new((date, level), 3, PURPLE.filled())),
    )?;

    root.present()?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kardex_core::MovementKind;

    fn product(name: &str, category: &str, price_cents: i64, quantity: i64) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            category: Some(category.to_string()),
            price_cents,
            quantity,
            registered_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
            last_outflow_at: None,
        }
    }

    fn movement(day: u32, kind: MovementKind, quantity: i64) -> MovementEntry {
        MovementEntry {
            id: 1,
            product_id: 1,
            occurred_at: Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap(),
            kind,
            quantity,
        }
    }

    #[test]
    fn test_render_all_writes_three_charts() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec![
            product("Hammer", "Tools", 1000, 5),
            product("Apple", "Food", 50, 100),
        ];
        let movements = vec![
            movement(1, MovementKind::In, 105),
            movement(3, MovementKind::Out, 10),
        ];

        let written = render_all(&products, &movements, dir.path()).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "missing chart {}", path.display());
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_render_all_with_no_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let written = render_all(&[], &[], dir.path()).unwrap();

        assert!(written.is_empty());
        assert!(!dir.path().join(CATEGORY_COST_CHART).exists());
    }

    #[test]
    fn test_timeline_only() {
        let dir = tempfile::tempdir().unwrap();
        let movements = vec![movement(5, MovementKind::In, 3)];

        let written = render_all(&[], &movements, dir.path()).unwrap();

        assert_eq!(written.len(), 1);
        assert!(dir.path().join(STOCK_TIMELINE_CHART).exists());
    }
}
