use telecap_core::emit::caption::split_timestamp;
use telecap_core::TcError;

const HOUR_MS: i64 = 3_600_000;

#[test]
fn decomposes_known_value() {
    let t = split_timestamp(123_456_789).unwrap();
    assert_eq!((t.hours, t.minutes, t.seconds, t.millis), (34, 17, 36, 789));
}

#[test]
fn bijective_below_ninety_nine_hours() {
    let samples = [
        0,
        1,
        999,
        1_000,
        59_999,
        60_000,
        HOUR_MS - 1,
        HOUR_MS,
        123_456_789,
        98 * HOUR_MS + 59 * 60_000 + 59_000 + 999,
    ];
    for ms in samples {
        let t = split_timestamp(ms).unwrap();
        assert!((0..60).contains(&t.minutes));
        assert!((0..60).contains(&t.seconds));
        assert!((0..1000).contains(&t.millis));
        let recomposed = t.hours * HOUR_MS + t.minutes * 60_000 + t.seconds * 1000 + t.millis;
        assert_eq!(recomposed, ms);
    }
}

#[test]
fn rejects_out_of_budget_timestamps() {
    assert!(split_timestamp(99 * HOUR_MS - 1).is_ok());
    assert!(matches!(split_timestamp(99 * HOUR_MS), Err(TcError::TimeOverflow(_))));
    assert!(matches!(split_timestamp(i64::MAX), Err(TcError::TimeOverflow(_))));
    assert!(matches!(split_timestamp(-1), Err(TcError::TimeOverflow(-1))));
}
