//! Golden regression values
//!
//! Every expected value below was produced by the reference quoting harness
//! and must be reproduced exactly.

use num_bigint::BigInt;
use stableswap_amm::{api, AssetSnapshot, Network, QuoteError, Quoter};

fn int(v: i128) -> BigInt {
    BigInt::from(v)
}

fn asset(cash: i128, liability: i128, decimals: u8) -> AssetSnapshot {
    AssetSnapshot::new(cash, liability, decimals)
}

fn solana_pool() -> AssetSnapshot {
    asset(4_101_702_000_000, 4_101_702_000_000, 6).with_total_supply(2_300_000_000_000i64)
}

mod stellar {
    use super::*;

    fn pair() -> (AssetSnapshot, AssetSnapshot) {
        (
            asset(201_002_000_000, 200_999_999_200, 6),
            asset(100_498_000_050, 100_500_000_000, 6),
        )
    }

    #[test]
    fn swap_out() {
        let (from, to) = pair();
        let quote = api::quote_swap(Network::Stellar, &from, &to, &int(100_000)).unwrap();
        assert_eq!((quote.amount, quote.fee), (int(98_480), int(9)));
    }

    #[test]
    fn swap_in_closed_form() {
        let (received, paid) = pair();
        let quote = Quoter::new(Network::Stellar)
            .get_amount_in(&received, &paid, &int(100_000))
            .unwrap();
        assert_eq!((quote.amount, quote.fee), (int(100_500), int(10)));
    }

    #[test]
    fn swap_out_with_band_fee() {
        let from = asset(14_900_000_000_000, 10_000_000_000_000, 6);
        let to = asset(10_000_000_000_000, 10_000_000_000_000, 6);
        let quote = api::quote_swap(Network::Stellar, &from, &to, &int(50_000_000_000)).unwrap();
        assert_eq!(quote.amount, int(47_292_158_643));
        assert_eq!(quote.fee, int(2_669_341_356));
    }

    #[test]
    fn swap_in_binary_search() {
        let quoter = Quoter::new(Network::Stellar);
        let received = asset(10_000_000_000_000, 10_000_000_000_000, 6);
        let paid = asset(14_500_000_000_000, 10_000_000_000_000, 6);

        let cases = [
            (50_000_000_000i128, 50_041_950_000i128, 5_000_510i128),
            (100_000_000_000, 105_166_350_000, 5_077_944_469),
            (1_000_000_000, 1_000_700_000, 100_010),
        ];
        for (wanted, amount, fee) in cases {
            let quote = quoter.get_amount_in(&received, &paid, &int(wanted)).unwrap();
            assert_eq!((quote.amount, quote.fee), (int(amount), int(fee)), "receiving {wanted}");
        }
    }

    #[test]
    fn swap_in_past_band_end() {
        let received = asset(10_000_000_000_000, 10_000_000_000_000, 6);
        let saturated = asset(18_000_000_000_000, 10_000_000_000_000, 6);
        let result = Quoter::new(Network::Stellar).get_amount_in(&received, &saturated, &int(50_000_000_000));
        assert_eq!(result, Err(QuoteError::CovRatioLimitExceeded));
    }

    #[test]
    fn cash_not_enough() {
        let from = asset(68_127_700_114_680, 47_213_576_395_847, 7);
        let to = asset(931_757, 20_942, 7);
        let result = api::quote_swap(Network::Stellar, &from, &to, &int(870));
        assert_eq!(result, Err(QuoteError::CashNotEnough));
    }
}

mod solana {
    use super::*;

    #[test]
    fn deposit_then_withdraw() {
        let deposit = api::quote_deposit(Network::Solana, &solana_pool(), &int(1_000_000)).unwrap();
        assert_eq!(deposit.lp_shares, int(56_074_283));
        assert_eq!(deposit.liability, int(100_000_000));

        let withdraw = api::quote_withdraw(Network::Solana, &solana_pool(), &deposit.lp_shares).unwrap();
        assert_eq!(withdraw.amount, int(999_999));
        assert_eq!(withdraw.liability_burned, int(99_999_999));
        assert_eq!(withdraw.fee, int(0));
        // within one native unit of the deposit
        assert!(int(1_000_000) - withdraw.amount <= int(1));
    }

    #[test]
    fn withdraw_cross_asset() {
        let to = asset(3_000_000_000_000, 3_100_000_000_000, 6);
        for (shares, amount, withdrawn) in [
            (56_074_283i128, 965_435i128, 999_999i128),
            (1_000_000_000, 17_205_719, 17_833_486),
        ] {
            let quote =
                api::quote_withdraw_cross_asset(Network::Solana, &solana_pool(), &to, &int(shares))
                    .unwrap();
            assert_eq!((quote.amount, quote.withdrawn), (int(amount), int(withdrawn)));
        }
    }

    #[test]
    fn swap_both_directions() {
        let quoter = Quoter::new(Network::Solana);
        let other = asset(3_000_000_000_000, 3_100_000_000_000, 6);

        let out = quoter.get_amount_out(&solana_pool(), &other, &int(1_000_000)).unwrap();
        assert_eq!((out.amount, out.fee), (int(965_435), int(1_934)));

        let needed = quoter.get_amount_in(&other, &solana_pool(), &int(1_000_000)).unwrap();
        assert_eq!((needed.amount, needed.fee), (int(1_036_089), int(2_004)));
    }
}

mod evm {
    use super::*;

    const WAD: i128 = 1_000_000_000_000_000_000;

    #[test]
    fn mixed_decimals_without_band() {
        let quoter = Quoter::new(Network::Evm);
        let from = asset(1_000_000 * WAD, 1_000_000 * WAD, 18);
        let to = asset(900_000 * WAD, 1_000_000 * WAD, 6);

        let out = quoter.get_amount_out(&from, &to, &int(1_000 * WAD)).unwrap();
        assert_eq!((out.amount, out.fee), (int(999_999_999), int(0)));

        let needed = quoter.get_amount_in(&to, &from, &int(1_000_000_000)).unwrap();
        assert_eq!(needed.amount, int(1_000_000_000_000_003_000_000));
        assert_eq!(needed.fee, int(0));
    }
}

#[test]
fn balanced_pool_without_haircut_is_one_to_one() {
    for network in Network::ALL {
        let mut config = network.config();
        config.haircut_rate = 0;
        let quoter = Quoter::with_config(network, config).unwrap();

        let decimals = config.decimals as u8;
        let unit = BigInt::from(config.wad);
        let reserve = &unit * 1_000_000u32;
        let pool = AssetSnapshot::new(reserve.clone(), reserve, decimals);

        let quote = quoter.get_amount_out(&pool, &pool, &unit).unwrap();
        assert_eq!(quote.amount, unit, "{network}");
        assert_eq!(quote.fee, int(0), "{network}");
    }
}
