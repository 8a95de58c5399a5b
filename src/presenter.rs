//! Text and JSON rendering of grouped order books

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{Config, Layout, OutputFormat, SortBy, SortDir};
use crate::error::{MarketDataError, Result};
use crate::grouping::{sort_by_price, sort_by_quantity, GroupedBook, OrderedView, PriceBuckets, Side};

const PRICE_WIDTH: usize = 8;
const QUANTITY_WIDTH: usize = 10;
const COLUMN_GAP: &str = "  ";
const TABLE_SEPARATOR: &str = "  |  ";

/// Render a grouped book in the configured format and layout
pub fn render(book: &GroupedBook, config: &Config) -> Result<String> {
    match (config.format, config.layout) {
        (OutputFormat::Json, _) => render_json(book, config),
        (OutputFormat::Table, Layout::Single) => Ok(render_single(book, config)),
        (OutputFormat::Table, Layout::Dual) => Ok(render_dual(book, config)),
    }
}

/// Price with exactly `precision` decimals; truncated integer when zero
pub fn format_price(price: Decimal, precision: u32) -> String {
    let mut value = if precision == 0 {
        price.trunc()
    } else {
        price.round_dp(precision)
    };
    value.rescale(precision);
    value.to_string()
}

/// Quantity with a k/M/B suffix, e.g. 1500 -> "1.50k", 3.20 -> "3.2"
pub fn format_quantity(quantity: Decimal) -> String {
    let billion = Decimal::from(1_000_000_000u64);
    let million = Decimal::from(1_000_000u64);
    let thousand = Decimal::from(1_000u64);

    if quantity >= billion {
        format!("{}B", two_places(quantity / billion))
    } else if quantity >= million {
        format!("{}M", two_places(quantity / million))
    } else if quantity >= thousand {
        format!("{}k", two_places(quantity / thousand))
    } else {
        two_places(quantity)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn two_places(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// The single-table ordering for one side
fn single_view(buckets: &PriceBuckets, side: Side, sort_by: SortBy, sort_dir: SortDir) -> OrderedView {
    match sort_by {
        SortBy::Quantity => sort_by_quantity(buckets, sort_dir.is_ascending()),
        // desc shows best prices first on both sides; asc flips both
        SortBy::Price => sort_by_price(buckets, side.best_first_ascending() != sort_dir.is_ascending()),
    }
}

fn price_view(buckets: &PriceBuckets, side: Side) -> OrderedView {
    sort_by_price(buckets, side.best_first_ascending())
}

fn row(price: &str, quantity: &str) -> String {
    format!(
        "{:>pw$}{}{:>qw$}",
        price,
        COLUMN_GAP,
        quantity,
        pw = PRICE_WIDTH,
        qw = QUANTITY_WIDTH
    )
}

fn bucket_row(view: &OrderedView, index: usize, precision: u32) -> String {
    match view.get(index) {
        Some(bucket) => row(
            &format_price(bucket.price, precision),
            &format_quantity(bucket.quantity),
        ),
        None => row("", ""),
    }
}

/// One table per side, ordered by `sort_by`/`sort_dir`
///
/// Headers show the upper-cased symbol that was queried, not the raw argument.
pub fn render_single(book: &GroupedBook, config: &Config) -> String {
    let spec = book.spec();
    let mut lines = Vec::new();

    for (i, side) in Side::ALL.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!(
            "### {} (symbol={}, group_size={}, sort_by={}, sort_dir={}):",
            side.title(),
            config.symbol,
            spec,
            config.sort_by,
            config.sort_dir
        ));
        lines.push(row("Price", "Quantity"));

        let view = single_view(book.side(side), side, config.sort_by, config.sort_dir);
        lines.extend((0..view.len()).map(|index| bucket_row(&view, index, spec.precision())));
    }

    lines.join("\n")
}

/// Per side, the best-first price view next to the quantity view
pub fn render_dual(book: &GroupedBook, config: &Config) -> String {
    let spec = book.spec();
    let half_width = PRICE_WIDTH + COLUMN_GAP.len() + QUANTITY_WIDTH;
    let mut lines = Vec::new();

    for (i, side) in Side::ALL.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }

        let buckets = book.side(side);
        let by_price = price_view(buckets, side);
        let by_quantity = sort_by_quantity(buckets, config.sort_dir.is_ascending());
        let price_dir = if side.best_first_ascending() { "asc" } else { "desc" };

        lines.push(format!(
            "### {} (symbol={}, group_size={}, sort_dir={}):",
            side.title(),
            config.symbol,
            spec,
            config.sort_dir
        ));
        lines.push(format!(
            "{:<hw$}{}{}",
            format!("by price ({})", price_dir),
            TABLE_SEPARATOR,
            format!("by quantity ({})", config.sort_dir),
            hw = half_width
        ));
        lines.push(format!(
            "{}{}{}",
            row("Price", "Quantity"),
            TABLE_SEPARATOR,
            row("Price", "Quantity")
        ));

        for index in 0..by_price.len().max(by_quantity.len()) {
            lines.push(format!(
                "{}{}{}",
                bucket_row(&by_price, index, spec.precision()),
                TABLE_SEPARATOR,
                bucket_row(&by_quantity, index, spec.precision())
            ));
        }
    }

    lines.join("\n")
}

#[derive(Debug, Serialize)]
struct SideReport {
    buckets: usize,
    total_quantity: Decimal,
    by_price: OrderedView,
    by_quantity: OrderedView,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    symbol: &'a str,
    group_size: &'a str,
    bucket_size: Decimal,
    precision: u32,
    sort_dir: String,
    bids: SideReport,
    asks: SideReport,
}

fn side_report(book: &GroupedBook, side: Side, sort_dir: SortDir) -> Result<SideReport> {
    let buckets = book.side(side);
    Ok(SideReport {
        buckets: buckets.len(),
        total_quantity: buckets.total_quantity()?,
        by_price: price_view(buckets, side),
        by_quantity: sort_by_quantity(buckets, sort_dir.is_ascending()),
    })
}

/// Both orderings of both sides as pretty-printed JSON
pub fn render_json(book: &GroupedBook, config: &Config) -> Result<String> {
    let spec = book.spec();
    let report = Report {
        symbol: &config.symbol,
        group_size: spec.as_str(),
        bucket_size: spec.bucket_size(),
        precision: spec.precision(),
        sort_dir: config.sort_dir.to_string(),
        bids: side_report(book, Side::Bid, config.sort_dir)?,
        asks: side_report(book, Side::Ask, config.sort_dir)?,
    };

    serde_json::to_string_pretty(&report).map_err(|e| MarketDataError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::GroupSpec;
    use crate::parser::{parse_snapshot, DepthSnapshot, PriceLevel};
    use rust_decimal_macros::dec;

    fn book(group_size: &str) -> GroupedBook {
        let snapshot = parse_snapshot(
            r#"{
                "bids": [["10.5", "1"], ["10.9", "2"], ["11.2", "5"]],
                "asks": [["12.1", "1500"], ["13.7", "0.25"]]
            }"#,
        )
        .unwrap();
        GroupedBook::from_snapshot(&snapshot, &GroupSpec::parse(group_size).unwrap()).unwrap()
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(dec!(1500)), "1.50k");
        assert_eq!(format_quantity(dec!(2500000)), "2.50M");
        assert_eq!(format_quantity(dec!(3000000000)), "3.00B");
        assert_eq!(format_quantity(dec!(3.00)), "3");
        assert_eq!(format_quantity(dec!(3.20)), "3.2");
        assert_eq!(format_quantity(dec!(0.25)), "0.25");
        assert_eq!(format_quantity(dec!(10)), "10");
        assert_eq!(format_quantity(dec!(0)), "0");
    }

    #[test]
    fn test_format_quantity_thresholds() {
        assert_eq!(format_quantity(dec!(999.99)), "999.99");
        assert_eq!(format_quantity(dec!(1000)), "1.00k");
        assert_eq!(format_quantity(dec!(1234567)), "1.23M");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(100.1), 1), "100.1");
        assert_eq!(format_price(dec!(100), 2), "100.00");
        assert_eq!(format_price(dec!(0.001), 3), "0.001");
        assert_eq!(format_price(dec!(10), 0), "10");
        assert_eq!(format_price(dec!(187.5), 0), "187");
    }

    #[test]
    fn test_render_single_quantity_desc() {
        let config = Config::default();
        let rendered = render_single(&book("1"), &config);

        let expected = [
            "### Bids (symbol=SOLUSDT, group_size=1, sort_by=quantity, sort_dir=desc):",
            "   Price    Quantity",
            "      11           5",
            "      10           3",
            "",
            "### Asks (symbol=SOLUSDT, group_size=1, sort_by=quantity, sort_dir=desc):",
            "   Price    Quantity",
            "      12       1.50k",
            "      13        0.25",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_single_price_directions() {
        let book = book("1");
        let bids = book.side(Side::Bid);
        let asks = book.side(Side::Ask);
        let prices = |view: OrderedView| view.iter().map(|b| b.price).collect::<Vec<_>>();

        // desc: best first on both sides
        assert_eq!(prices(single_view(bids, Side::Bid, SortBy::Price, SortDir::Desc)), vec![dec!(11), dec!(10)]);
        assert_eq!(prices(single_view(asks, Side::Ask, SortBy::Price, SortDir::Desc)), vec![dec!(12), dec!(13)]);

        // asc flips both
        assert_eq!(prices(single_view(bids, Side::Bid, SortBy::Price, SortDir::Asc)), vec![dec!(10), dec!(11)]);
        assert_eq!(prices(single_view(asks, Side::Ask, SortBy::Price, SortDir::Asc)), vec![dec!(13), dec!(12)]);
    }

    #[test]
    fn test_render_single_uses_group_precision() {
        let config = Config {
            group_size: "0.50".to_string(),
            sort_by: SortBy::Price,
            ..Config::default()
        };
        let rendered = render_single(&book("0.50"), &config);

        assert!(rendered.contains("group_size=0.50, sort_by=price"));
        assert!(rendered.contains("    10.5           3"));
        assert!(rendered.contains("    11.0           5"));
        assert!(rendered.contains("    12.0       1.50k"));
    }

    #[test]
    fn test_render_dual() {
        let config = Config::default();
        let rendered = render_dual(&book("1"), &config);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "### Bids (symbol=SOLUSDT, group_size=1, sort_dir=desc):");
        assert_eq!(lines[1], "by price (desc)       |  by quantity (desc)");
        assert_eq!(lines[2], "   Price    Quantity  |     Price    Quantity");
        assert_eq!(lines[3], "      11           5  |        11           5");
        assert_eq!(lines[4], "      10           3  |        10           3");
        assert_eq!(lines[5], "");
        assert_eq!(lines[7], "by price (asc)        |  by quantity (desc)");
        assert_eq!(lines[9], "      12       1.50k  |        12       1.50k");
        assert_eq!(lines[10], "      13        0.25  |        13        0.25");
    }

    #[test]
    fn test_render_dual_views_differ() {
        let config = Config {
            sort_dir: SortDir::Asc,
            ..Config::default()
        };
        let rendered = render_dual(&book("1"), &config);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[3], "      11           5  |        10           3");
        assert_eq!(lines[4], "      10           3  |        11           5");
    }

    #[test]
    fn test_render_empty_side() {
        let snapshot = parse_snapshot(r#"{"bids": [], "asks": [["5", "1"]]}"#).unwrap();
        let book = GroupedBook::from_snapshot(&snapshot, &GroupSpec::parse("1").unwrap()).unwrap();
        let rendered = render_single(&book, &Config::default());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], "   Price    Quantity");
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("### Asks"));
    }

    #[test]
    fn test_render_json() {
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let rendered = render(&book("1"), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["symbol"], "SOLUSDT");
        assert_eq!(value["precision"], 0);
        assert_eq!(value["bids"]["buckets"], 2);
        assert_eq!(value["bids"]["by_price"][0]["price"], "11");
        assert_eq!(value["asks"]["by_price"][0]["price"], "12");
        assert_eq!(value["asks"]["by_quantity"][1]["quantity"], "0.25");
    }

    #[test]
    fn test_render_json_total_overflow_is_error() {
        let snapshot = DepthSnapshot {
            last_update_id: None,
            bids: vec![
                PriceLevel::new(dec!(1), Decimal::MAX),
                PriceLevel::new(dec!(2), dec!(1)),
            ],
            asks: vec![],
        };
        let book = GroupedBook::from_snapshot(&snapshot, &GroupSpec::parse("1").unwrap()).unwrap();

        assert!(matches!(
            render_json(&book, &Config::default()),
            Err(MarketDataError::QuantityOverflow { .. })
        ));
    }
}
