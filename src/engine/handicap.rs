use std::collections::BTreeMap;

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// Course Handicap: `round(index * slope / 113 + (rating - par))`.
///
/// Halves round away from zero. Negative results are valid and are passed
/// through unchanged.
pub fn course_handicap(handicap_index: f64, slope: u16, rating: f64, course_par: i32) -> i32 {
    let raw = handicap_index * (f64::from(slope) / STANDARD_SLOPE) + (rating - f64::from(course_par));
    raw.round() as i32
}

/// Playing Handicap for each player: course handicap minus the lowest
/// course handicap in the group, so the lowest player plays off zero.
pub fn playing_handicaps<'a, I>(group: I) -> BTreeMap<String, i32>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    let members: Vec<(&str, i32)> = group.into_iter().collect();
    let Some(lowest) = members.iter().map(|&(_, ch)| ch).min() else {
        return BTreeMap::new();
    };
    members
        .into_iter()
        .map(|(player, ch)| (player.to_string(), ch - lowest))
        .collect()
}
