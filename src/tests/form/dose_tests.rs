use chrono::NaiveDate;
use serde_json::json;

use crate::form::{DoseRecord, MAX_DOSE_COUNT, parse_count, resize_doses};

fn filled(count: usize) -> Vec<DoseRecord> {
    (0..count)
        .map(|idx| DoseRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, idx as u32 + 1),
            taken: idx % 2 == 0,
        })
        .collect()
}

#[test]
fn parse_count_accepts_whole_numbers() {
    assert_eq!(parse_count(&json!(3)), 3);
    assert_eq!(parse_count(&json!("4")), 4);
    assert_eq!(parse_count(&json!(" 2 ")), 2);
    assert_eq!(parse_count(&json!(5.0)), 5);
}

#[test]
fn parse_count_falls_back_to_zero() {
    for raw in [
        json!(-1),
        json!("-2"),
        json!("abc"),
        json!("1.5"),
        json!(2.5),
        json!(""),
        json!(null),
        json!(true),
        json!([3]),
    ] {
        assert_eq!(parse_count(&raw), 0, "{raw} should count as zero");
    }
}

#[test]
fn growing_keeps_existing_records() {
    let original = filled(2);
    let resized = resize_doses(original.clone(), 5);
    assert_eq!(resized.len(), 5);
    assert_eq!(&resized[..2], &original[..]);
    assert!(resized[2..].iter().all(DoseRecord::is_empty));
}

#[test]
fn shrinking_then_regrowing_restores_only_the_prefix() {
    let original = filled(4);
    let shrunk = resize_doses(original.clone(), 2);
    assert_eq!(shrunk, original[..2].to_vec());
    let regrown = resize_doses(shrunk, 4);
    assert_eq!(&regrown[..2], &original[..2]);
    assert!(
        regrown[2..].iter().all(DoseRecord::is_empty),
        "records beyond the shrink are not recoverable"
    );
}

#[test]
fn resize_to_same_length_is_identity() {
    let original = filled(3);
    assert_eq!(resize_doses(original.clone(), 3), original);
}

#[test]
fn resize_to_zero_empties() {
    assert!(resize_doses(filled(3), 0).is_empty());
}

#[test]
fn dose_serializes_as_date_and_flag() {
    let record = DoseRecord {
        date: NaiveDate::from_ymd_opt(2025, 1, 9),
        taken: true,
    };
    assert_eq!(record.to_value(), json!({"date": "2025-01-09", "taken": true}));
    assert_eq!(
        DoseRecord::default().to_value(),
        json!({"date": null, "taken": false})
    );
}

#[test]
fn counts_above_the_limit_read_as_zero() {
    assert_eq!(parse_count(&json!(MAX_DOSE_COUNT)), MAX_DOSE_COUNT);
    assert_eq!(parse_count(&json!(MAX_DOSE_COUNT + 1)), 0);
    assert_eq!(parse_count(&json!(1e300)), 0);
    assert_eq!(parse_count(&json!("18446744073709551615")), 0);
}

#[test]
fn resize_is_capped() {
    let resized = resize_doses(filled(3), usize::MAX);
    assert_eq!(resized.len(), MAX_DOSE_COUNT);
    assert_eq!(&resized[..3], &filled(3)[..]);
}
