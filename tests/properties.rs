//! Property tests for pay resolution and the offset estimator.

use std::sync::OnceLock;

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

use reserve_offset_engine::calculation::{estimate_offset, recommendation_tolerance, resolve_pay};
use reserve_offset_engine::config::{PayTable, TableLoader};
use reserve_offset_engine::models::{OffsetInputs, PayGrade, Recommendation};

fn table() -> &'static PayTable {
    static TABLE: OnceLock<PayTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        TableLoader::load("./config/rc_drill_pay")
            .expect("Failed to load pay table")
            .into_table()
    })
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_every_grade_and_yos_resolves(grade_index in 0usize..24, yos_hundredths in 0i64..6_000) {
        let grade = PayGrade::ALL[grade_index];
        let yos = cents(yos_hundredths);
        let table = table();

        let resolution = resolve_pay(table, grade, yos).unwrap();
        let top = table.buckets().last().unwrap();

        prop_assert!(resolution.per_period_pay > Decimal::ZERO);
        prop_assert_eq!(resolution.warning.is_some(), yos >= top.max_years);
        if resolution.warning.is_some() {
            prop_assert_eq!(&resolution.bucket_label, &top.label);
        } else {
            let bucket = table
                .buckets()
                .iter()
                .find(|b| b.label == resolution.bucket_label)
                .unwrap();
            prop_assert!(bucket.contains(yos));
        }
    }

    #[test]
    fn prop_resolution_is_deterministic(grade_index in 0usize..24, yos_hundredths in 0i64..4_000) {
        let grade = PayGrade::ALL[grade_index];
        let yos = cents(yos_hundredths);

        prop_assert_eq!(
            resolve_pay(table(), grade, yos).unwrap(),
            resolve_pay(table(), grade, yos).unwrap()
        );
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_estimate_is_deterministic_and_rounded(
        va_cents in 1i64..1_000_000,
        mil_cents in 1i64..200_000,
        uta_count in -10i64..400,
        active_duty_days in -10i64..400
    ) {
        let inputs = OffsetInputs {
            va_monthly: cents(va_cents),
            military_pay: cents(mil_cents),
            uta_count,
            active_duty_days,
        };

        let first = estimate_offset(&inputs).unwrap();
        let second = estimate_offset(&inputs).unwrap();
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(
            first.waiver_days,
            (uta_count.max(0) + active_duty_days.max(0)) as u64
        );
        for amount in [
            first.va_daily,
            first.mil_daily,
            first.va_recoupment_estimated,
            first.mil_gross_earned_estimated,
            first.net_advantage_gross,
            first.break_even_va_monthly,
        ] {
            prop_assert!(amount.scale() <= 2, "{} has more than two decimal places", amount);
        }
    }

    #[test]
    fn prop_recommendation_follows_net_advantage(
        va_cents in 1i64..1_000_000,
        mil_cents in 1i64..200_000,
        uta_count in 0i64..400,
        active_duty_days in 0i64..400
    ) {
        let result = estimate_offset(&OffsetInputs {
            va_monthly: cents(va_cents),
            military_pay: cents(mil_cents),
            uta_count,
            active_duty_days,
        })
        .unwrap();

        let tolerance = recommendation_tolerance();
        if result.net_advantage_gross > tolerance {
            prop_assert_eq!(result.recommendation, Recommendation::TakeMilitaryPay);
        } else if result.net_advantage_gross < -tolerance {
            prop_assert_eq!(result.recommendation, Recommendation::WaiveMilitaryPay);
        }
    }

    #[test]
    fn prop_negative_counts_behave_as_zero(
        va_cents in 1i64..1_000_000,
        mil_cents in 1i64..200_000,
        uta_count in -1_000i64..=0,
        active_duty_days in -1_000i64..=0
    ) {
        let result = estimate_offset(&OffsetInputs {
            va_monthly: cents(va_cents),
            military_pay: cents(mil_cents),
            uta_count,
            active_duty_days,
        })
        .unwrap();

        prop_assert_eq!(result.waiver_days, 0);
        prop_assert_eq!(result.net_advantage_gross, Decimal::ZERO);
        prop_assert_eq!(result.recommendation, Recommendation::Either);
    }

    #[test]
    fn prop_break_even_va_amount_is_either(
        mil_cents in 1i64..200_000,
        uta_count in 0i64..400,
        active_duty_days in 0i64..400
    ) {
        let military_pay = cents(mil_cents);
        let break_even = estimate_offset(&OffsetInputs {
            va_monthly: Decimal::ONE,
            military_pay,
            uta_count,
            active_duty_days,
        })
        .unwrap()
        .break_even_va_monthly;

        let result = estimate_offset(&OffsetInputs {
            va_monthly: break_even,
            military_pay,
            uta_count,
            active_duty_days,
        })
        .unwrap();

        prop_assert_eq!(result.recommendation, Recommendation::Either);
    }
}
