use crate::domain::error::{SuiteError, SuiteResult};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde_json::Value;
use std::fmt::Debug;

pub fn assert_equals<T>(what: &str, expected: &T, actual: &T) -> SuiteResult<()>
where
    T: PartialEq + Debug + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(SuiteError::assertion(what, expected, actual))
    }
}

pub fn assert_not_null(what: &str, value: &Value) -> SuiteResult<()> {
    let has_null = match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(Value::is_null),
        _ => false,
    };
    if has_null {
        Err(SuiteError::assertion(what, "non-null value", value))
    } else {
        Ok(())
    }
}

pub fn assert_contains(what: &str, haystack: &str, needle: &str) -> SuiteResult<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            what,
            format!("text containing {needle:?}"),
            haystack,
        ))
    }
}

/// Each avatar URL must mention the id of the record it belongs to.
pub fn assert_avatars_contain_ids<'a, I>(records: I) -> SuiteResult<()>
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    for (id, avatar) in records {
        assert_contains(&format!("avatar of user {id}"), avatar, &id.to_string())?;
    }
    Ok(())
}

/// Pairs ids and avatars extracted separately, which must line up one to one.
pub fn zip_parallel<'a, A, B>(what: &str, left: &'a [A], right: &'a [B]) -> SuiteResult<Vec<(&'a A, &'a B)>> {
    if left.len() != right.len() {
        return Err(SuiteError::assertion(
            format!("{what}: equally long extractions"),
            left.len(),
            right.len(),
        ));
    }
    Ok(left.iter().zip(right).collect())
}

pub fn assert_all_end_with<'a, I>(what: &str, values: I, suffix: &str) -> SuiteResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let offenders: Vec<&str> = values.into_iter().filter(|v| !v.ends_with(suffix)).collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            what,
            format!("every value ending with {suffix:?}"),
            offenders,
        ))
    }
}

/// The sequence must equal its own sorted copy.
pub fn assert_non_decreasing<T>(what: &str, values: &[T]) -> SuiteResult<()>
where
    T: Ord + Clone + Debug,
{
    let mut sorted = values.to_vec();
    sorted.sort();
    assert_equals(what, sorted.as_slice(), values)
}

pub fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(0)
}

/// Compares two instants at whole-second resolution, allowing the two clocks
/// to straddle one second boundary.
pub fn assert_same_second(what: &str, expected: DateTime<Utc>, actual: DateTime<Utc>) -> SuiteResult<()> {
    let expected = truncate_to_seconds(expected);
    let actual = truncate_to_seconds(actual);
    if (expected - actual).abs() <= TimeDelta::seconds(1) {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            what,
            expected.to_rfc3339(),
            actual.to_rfc3339(),
        ))
    }
}
