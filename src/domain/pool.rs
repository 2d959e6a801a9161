//! Pool entities - keys, reserves, metadata, and derived price records

use crate::domain::location::extract_asset_index;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Numeric identifier of a non-native asset in the chain's asset registry
pub type AssetIndex = u32;

/// Composite key of a liquidity pool: the pair of location descriptors as
/// rendered by the chain gateway, kept opaque apart from index extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolIdentifier(Value);

impl PoolIdentifier {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Index of the pool's non-native asset, if the key decodes
    pub fn asset_index(&self) -> Option<AssetIndex> {
        extract_asset_index(&self.0)
    }
}

impl fmt::Display for PoolIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw pool balances in the smallest indivisible unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReserves {
    pub native: u128,
    pub asset: u128,
}

/// Registry metadata of a non-native asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Human-readable pool record, rebuilt fresh on every resolution pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolInfo {
    pub pool_id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub native_reserve: f64,
    pub asset_reserve: f64,
    pub price_of_asset_in_native: f64,
    pub price_of_native_in_asset: f64,
}

impl PoolInfo {
    /// Scale raw reserves into standard units and derive both exchange
    /// rates. A zero denominator yields a zero price rather than a fault.
    pub fn derive(id: &PoolIdentifier, reserves: PoolReserves, meta: &AssetMetadata) -> Self {
        let native_reserve = scale_units(reserves.native, meta.decimals);
        let asset_reserve = scale_units(reserves.asset, meta.decimals);
        Self {
            pool_id: id.to_string(),
            name: meta.name.clone(),
            symbol: meta.symbol.clone(),
            decimals: meta.decimals,
            native_reserve,
            asset_reserve,
            price_of_asset_in_native: ratio(native_reserve, asset_reserve),
            price_of_native_in_asset: ratio(asset_reserve, native_reserve),
        }
    }
}

/// Convert a raw balance to standard units by `10^decimals`
pub fn scale_units(raw: u128, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_key() -> PoolIdentifier {
        PoolIdentifier::new(json!([
            {"parents": 1, "interior": "Here"},
            {"parents": 0, "interior": {"X2": [
                {"PalletInstance": 50},
                {"GeneralIndex": 1984}
            ]}}
        ]))
    }

    fn tether() -> AssetMetadata {
        AssetMetadata {
            name: "Tether USD".to_string(),
            symbol: "USDT".to_string(),
            decimals: 6,
        }
    }

    #[test]
    fn test_scale_units_round_trip() {
        let scaled = scale_units(123_456_789_012, 10);
        assert!((scaled - 12.3456789012).abs() < 1e-9);
    }

    #[test]
    fn test_price_invariant_holds() {
        let info = PoolInfo::derive(
            &test_key(),
            PoolReserves {
                native: 5_000_000_000,
                asset: 2_000_000_000,
            },
            &tether(),
        );
        assert!(
            (info.price_of_asset_in_native * info.asset_reserve - info.native_reserve).abs() < 1e-9
        );
        assert!(
            (info.price_of_native_in_asset * info.native_reserve - info.asset_reserve).abs() < 1e-9
        );
    }

    #[test]
    fn test_zero_asset_reserve_yields_zero_price() {
        let info = PoolInfo::derive(
            &test_key(),
            PoolReserves {
                native: 1_000_000,
                asset: 0,
            },
            &tether(),
        );
        assert_eq!(info.price_of_asset_in_native, 0.0);
        assert_eq!(info.asset_reserve, 0.0);
    }

    #[test]
    fn test_zero_native_reserve_yields_zero_inverse_price() {
        let info = PoolInfo::derive(
            &test_key(),
            PoolReserves {
                native: 0,
                asset: 1_000_000,
            },
            &tether(),
        );
        assert_eq!(info.price_of_native_in_asset, 0.0);
    }

    #[test]
    fn test_derive_copies_metadata_and_key() {
        let info = PoolInfo::derive(
            &test_key(),
            PoolReserves {
                native: 1_000_000,
                asset: 2_000_000,
            },
            &tether(),
        );
        assert_eq!(info.symbol, "USDT");
        assert_eq!(info.decimals, 6);
        assert!(info.pool_id.contains("1984"));
    }
}
