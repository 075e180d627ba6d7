/// Buckets `count` into 0..=4 relative to the window's maximum.
///
/// Quartile boundaries are inclusive: a count at exactly a quarter of `max`
/// is level 1, at exactly half is level 2 and so on. A positive count with a
/// zero `max` still gets level 1.
pub fn level(count: u64, max: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    if max == 0 {
        return 1;
    }

    let count = u128::from(count) * 4;
    let max = u128::from(max);
    if count <= max {
        1
    } else if count <= max * 2 {
        2
    } else if count <= max * 3 {
        3
    } else {
        4
    }
}
