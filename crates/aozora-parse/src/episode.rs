use std::cmp::Ordering;

/// Parse an episode tag value for ordering.
///
/// Tag values are not validated when decoded, and specials use decimal
/// numbers ("12.5"), so numeric interpretation happens here and runs
/// through `f64`.
pub fn episode_number(value: &str) -> Option<f64> {
    let n: f64 = value.trim().parse().ok()?;
    n.is_finite().then_some(n)
}

/// Total order over optional episode numbers.
///
/// Numeric values sort ascending; non-numeric episodes sink to the end.
pub fn compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
