use alloy::primitives::{I256, U256};
use fastnum::{
    bint,
    decimal::{Context, Decimal, RoundingMode, UnsignedDecimal},
};

/// Fixed-point to decimal converter.
///
/// Monetary literals typed by the operator ("600", "3550.58") are scaled to
/// on-chain token units at the asset's decimals: 6 for USDC collateral, 18
/// for sUSD collateral and for prices.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    /// 18-decimal converter used for prices, stop-loss and take-profit levels.
    pub fn prices() -> Self {
        Self::new(18)
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> UnsignedDecimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<N>");
        UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    pub fn from_signed<const N: usize>(&self, value: I256) -> Decimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.unsigned_abs().as_le_slice())
            .expect("Converter: abs(I256) -> UInt::<N>");
        Decimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            match value.sign() {
                alloy::primitives::Sign::Negative => fastnum::decimal::Sign::Minus,
                alloy::primitives::Sign::Positive => fastnum::decimal::Sign::Plus,
            },
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    pub fn to_unsigned<const N: usize>(&self, value: UnsignedDecimal<N>) -> U256 {
        let rescaled = value.rescale(self.decimals as i16);
        U256::from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
    }

    pub fn to_signed<const N: usize>(&self, value: Decimal<N>) -> I256 {
        let rescaled = value.rescale(self.decimals as i16);
        let mut res = I256::try_from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
            .unwrap_or_default();
        if value.is_negative() {
            res = res.saturating_neg();
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use fastnum::{dec256, udec256};

    use super::*;

    #[test]
    fn test_collateral_units_usdc() {
        // 6-decimal asset: 100 USDC and the 600 USDC maintenance margin
        assert_eq!(
            Converter::new(6).to_unsigned(udec256!(100)),
            U256::from(100_000000u64)
        );
        assert_eq!(
            Converter::new(6).to_unsigned(udec256!(600)),
            U256::from(600_000000u64)
        );
        assert_eq!(
            Converter::new(6).from_unsigned(U256::from(20_000000u64)),
            udec256!(20)
        );
    }

    #[test]
    fn test_price_units() {
        // Prices are always 18-decimal
        assert_eq!(
            Converter::prices().to_unsigned(udec256!(3550.58)),
            U256::from(3_550_580_000_000_000_000_000u128)
        );
        assert_eq!(
            Converter::prices().from_unsigned(U256::from(4_000_250_000_000_000_000_000u128)),
            udec256!(4000.25)
        );
    }

    #[test]
    fn test_signed_units() {
        // Owner-level collateral adjustments carry a sign
        assert_eq!(
            Converter::new(18).to_signed(dec256!(100)),
            I256::try_from(100_000_000_000_000_000_000u128).unwrap()
        );
        assert_eq!(
            Converter::new(6).to_signed(dec256!(-20)),
            I256::try_from(-20_000000i64).unwrap()
        );
        assert_eq!(
            Converter::new(6).from_signed(I256::try_from(-1_500000i64).unwrap()),
            dec256!(-1.5)
        );
    }

    #[test]
    fn test_zero_decimals_roundtrip() {
        assert_eq!(
            Converter::new(0).to_unsigned(udec256!(1234567890)),
            U256::from(1234567890u64)
        );
        assert_eq!(
            Converter::new(0).from_unsigned(U256::from(1234567890u64)),
            udec256!(1234567890)
        );
    }
}
