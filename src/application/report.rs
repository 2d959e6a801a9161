//! Plain-text rendering of a resolution pass for the CLI

use crate::domain::pool::PoolInfo;
use crate::shared::utils::format_amount;
use std::fmt::Write;

/// Render the pool list as an aligned table; the empty state mirrors the
/// display layer's wording.
pub fn render(pools: &[PoolInfo]) -> String {
    if pools.is_empty() {
        return "No pools found".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<24} {:>9} {:>18} {:>18} {:>14} {:>14}",
        "SYMBOL", "NAME", "DECIMALS", "NATIVE RESERVE", "ASSET RESERVE", "ASSET/NATIVE", "NATIVE/ASSET"
    );
    for pool in pools {
        let _ = writeln!(
            out,
            "{:<8} {:<24} {:>9} {:>18} {:>18} {:>14} {:>14}",
            pool.symbol,
            pool.name,
            pool.decimals,
            format_amount(pool.native_reserve),
            format_amount(pool.asset_reserve),
            format_amount(pool.price_of_asset_in_native),
            format_amount(pool.price_of_native_in_asset),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_renders_empty_state() {
        assert_eq!(render(&[]), "No pools found");
    }

    #[test]
    fn test_table_contains_symbol_and_prices() {
        let pool = PoolInfo {
            pool_id: "[]".to_string(),
            name: "Tether USD".to_string(),
            symbol: "USDT".to_string(),
            decimals: 6,
            native_reserve: 4.0,
            asset_reserve: 2.0,
            price_of_asset_in_native: 2.0,
            price_of_native_in_asset: 0.5,
        };
        let table = render(&[pool]);
        assert!(table.contains("USDT"));
        assert!(table.contains("2.000000"));
        assert!(table.contains("0.500000"));
    }
}
