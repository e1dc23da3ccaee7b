//! End-to-end tests for the assessment pipeline

use chrono::{Duration, NaiveDate};
use real_discount::config::{Config, EngineConfig};
use real_discount::history::PriceHistory;
use real_discount::reference::{InsufficiencyReason, PriceMeta, ReferenceResult};
use real_discount::{DiscountEngine, EngineError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Bare-array history with one entry per `(offset, price)` from `start`
fn history(start: &str, entries: &[(i64, Option<Decimal>)]) -> PriceHistory {
    let start = day(start);
    let json: Vec<serde_json::Value> = entries
        .iter()
        .map(|(offset, price)| {
            serde_json::json!({
                "c": price.map(|p| p.to_string()),
                "o": null,
                "d": (start + Duration::days(*offset)).to_string(),
            })
        })
        .collect();
    PriceHistory::from_json(&serde_json::Value::Array(json).to_string()).unwrap()
}

#[test]
fn test_constant_price_has_zero_real_discount() {
    let engine = DiscountEngine::with_defaults();
    let history = history("2021-01-01", &[(0, Some(dec!(250))), (100, Some(dec!(250)))]);

    let assessment = engine.assess(&history, day("2021-06-01")).unwrap();
    assert_eq!(
        assessment.reference,
        ReferenceResult::CommonPrice {
            common_price: dec!(250),
            current_price: Some(dec!(250)),
            real_discount: Some(dec!(0)),
            last_discount_date: None,
            last_increase_date: None,
        }
    );
}

#[test]
fn test_single_point_forward_fill() {
    let engine = DiscountEngine::with_defaults();
    let history = history("2021-03-13", &[(0, Some(dec!(499)))]);

    let series = engine.prepare(&history, day("2021-03-18")).unwrap();
    assert_eq!(series.len(), 6);
    assert!(series
        .points()
        .iter()
        .all(|p| p.current_price == Some(dec!(499))));

    let changes = engine.changes(&series);
    assert_eq!(changes.last_discount_date, None);
    assert_eq!(changes.last_increase_date, None);
}

#[test]
fn test_fresh_drop_uses_preceding_window_minimum() {
    let engine = DiscountEngine::with_defaults();
    // 299 long ago, then 499 for two months, then a drop to 359
    let history = history(
        "2021-06-01",
        &[
            (0, Some(dec!(299))),
            (10, Some(dec!(499))),
            (80, Some(dec!(359))),
        ],
    );
    let today = day("2021-06-01") + Duration::days(85);

    let assessment = engine.assess(&history, today).unwrap();
    match assessment.reference {
        ReferenceResult::EuMinimum {
            min_price,
            last_discount_date,
            real_discount,
            ..
        } => {
            assert_eq!(min_price, dec!(499));
            assert_eq!(last_discount_date, day("2021-06-01") + Duration::days(80));
            assert_eq!(real_discount, Some(dec!(140) / dec!(499)));
        }
        other => panic!("expected eu-minimum, got {:?}", other),
    }
}

#[test]
fn test_minimum_window_reaches_31_days_before_drop() {
    let engine = DiscountEngine::with_defaults();
    // 299 on day 0, 499 on days 1-30, 359 from day 31
    let history = history(
        "2021-06-01",
        &[
            (0, Some(dec!(299))),
            (1, Some(dec!(499))),
            (31, Some(dec!(359))),
        ],
    );
    let start = day("2021-06-01");

    let assessment = engine.assess(&history, start + Duration::days(31)).unwrap();
    assert_eq!(
        assessment.reference,
        ReferenceResult::EuMinimum {
            min_price: dec!(299),
            current_price: Some(dec!(359)),
            real_discount: Some(dec!(-60) / dec!(299)),
            last_discount_date: start + Duration::days(31),
            last_increase_date: Some(start + Duration::days(1)),
        }
    );
}

#[test]
fn test_drop_after_outage_falls_back_to_common_price() {
    let engine = DiscountEngine::with_defaults();
    // Unavailable for two months before coming back cheaper
    let history = history(
        "2021-06-01",
        &[
            (0, Some(dec!(499))),
            (1, None),
            (61, Some(dec!(359))),
        ],
    );
    let start = day("2021-06-01");

    let assessment = engine.assess(&history, start + Duration::days(66)).unwrap();
    assert_eq!(
        assessment.reference,
        ReferenceResult::CommonPrice {
            common_price: dec!(359),
            current_price: Some(dec!(359)),
            real_discount: Some(dec!(0)),
            last_discount_date: Some(start + Duration::days(61)),
            last_increase_date: None,
        }
    );
}

#[test]
fn test_drop_reversed_by_increase_falls_back_to_common_price() {
    let engine = DiscountEngine::with_defaults();
    let history = history(
        "2021-06-01",
        &[
            (0, Some(dec!(499))),
            (50, Some(dec!(359))),
            (52, Some(dec!(529))),
        ],
    );
    let today = day("2021-06-01") + Duration::days(60);

    let assessment = engine.assess(&history, today).unwrap();
    assert_eq!(assessment.reference.kind(), "common-price");
    assert_eq!(assessment.reference.reference_price(), Some(dec!(499)));
    let real = assessment.reference.real_discount().unwrap();
    assert!(real < Decimal::ZERO);
}

#[test]
fn test_outlier_is_repaired_before_change_detection() {
    let engine = DiscountEngine::with_defaults();
    let history = history(
        "2021-06-01",
        &[
            (0, Some(dec!(500))),
            (1, Some(dec!(1))),
            (2, Some(dec!(500))),
        ],
    );

    let assessment = engine.assess(&history, day("2021-06-05")).unwrap();
    let changes = assessment.reference.changes();
    assert_eq!(changes.last_discount_date, None);
    assert_eq!(changes.last_increase_date, None);
    assert_eq!(assessment.reference.real_discount(), Some(dec!(0)));
}

#[test]
fn test_discontinued_product() {
    let engine = DiscountEngine::with_defaults();
    let history = history("2021-06-01", &[(0, Some(dec!(100))), (20, None)]);

    let assessment = engine.assess(&history, day("2021-06-25")).unwrap();
    assert_eq!(assessment.reference.current_price(), None);
    assert_eq!(assessment.reference.real_discount(), None);
    assert_eq!(assessment.claimed_discount, None);
}

#[test]
fn test_long_unavailable_product_reports_insufficient_data() {
    let engine = DiscountEngine::with_defaults();
    let history = history("2021-01-01", &[(0, Some(dec!(100))), (1, None)]);

    let assessment = engine.assess(&history, day("2021-12-01")).unwrap();
    assert!(matches!(
        assessment.reference,
        ReferenceResult::InsufficientData {
            reason: InsufficiencyReason::NoPricesInCommonWindow,
            ..
        }
    ));
}

#[test]
fn test_supplied_zero_common_price_is_undefined() {
    let engine = DiscountEngine::with_defaults();
    let history = history("2021-06-01", &[(0, Some(dec!(100)))]);
    let meta = PriceMeta {
        common_price: dec!(0),
        min_price: None,
    };

    let result = engine.assess_with_meta(&history, &meta, day("2021-06-02"));
    assert_eq!(
        result,
        Err(EngineError::UndefinedDiscount {
            reference: dec!(0)
        })
    );
}

#[test]
fn test_custom_windows_from_config() {
    let config: Config = toml::from_str(
        r#"
            [engine]
            sale_action_interval_days = 7
        "#,
    )
    .unwrap();
    let engine = DiscountEngine::new(config.engine);
    let history = history("2021-06-01", &[(0, Some(dec!(200))), (30, Some(dec!(150)))]);

    // Drop is 10 days old: a sale action under the default 90 days, not under 7
    let today = day("2021-06-01") + Duration::days(40);
    assert_eq!(engine.assess(&history, today).unwrap().reference.kind(), "common-price");
    assert!(DiscountEngine::new(EngineConfig::default())
        .assess(&history, today)
        .unwrap()
        .reference
        .is_sale_action());
}

#[test]
fn test_parallel_assessments() {
    let engine = DiscountEngine::with_defaults();
    let today = day("2021-09-01");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let engine = &engine;
                scope.spawn(move || {
                    let history = history("2021-06-01", &[(0, Some(Decimal::from(i * 100)))]);
                    engine.assess(&history, today).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let assessment = handle.join().unwrap();
            assert_eq!(
                assessment.reference.reference_price(),
                Some(Decimal::from((i as i64 + 1) * 100))
            );
        }
    });
}
