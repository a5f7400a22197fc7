use crate::types::course::Course;

/// Strokes received on a hole for a course or playing handicap.
///
/// Each full 18 of handicap is one stroke on every hole; the remainder goes
/// to the hardest holes first. Handicaps of 36 or more top out at three.
/// Zero or negative handicaps receive nothing.
pub fn strokes_on_hole(handicap: i32, hole_rank: u8) -> i32 {
    let rank = i32::from(hole_rank);
    if handicap >= 36 {
        if rank <= handicap - 36 {
            3
        } else {
            2
        }
    } else if handicap >= 18 {
        if rank <= handicap - 18 {
            2
        } else {
            1
        }
    } else if rank <= handicap {
        1
    } else {
        0
    }
}

/// Strokes on every hole of a course, ordered by hole number.
pub fn allocate(handicap: i32, course: &Course) -> Vec<(u8, i32)> {
    course
        .holes_in_order()
        .iter()
        .map(|hole| (hole.number, strokes_on_hole(handicap, hole.handicap_rank)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::course::fixtures::terra_lago;

    #[test]
    fn forty_two_gets_three_on_hardest_holes() {
        assert_eq!(strokes_on_hole(42, 1), 3);
        assert_eq!(strokes_on_hole(42, 6), 3);
        assert_eq!(strokes_on_hole(42, 7), 2);
        assert_eq!(strokes_on_hole(42, 18), 2);
    }

    #[test]
    fn seventeen_skips_easiest_hole() {
        assert_eq!(strokes_on_hole(17, 17), 1);
        assert_eq!(strokes_on_hole(17, 18), 0);
    }

    #[test]
    fn eighteen_gets_exactly_one_everywhere() {
        for rank in 1..=18 {
            assert_eq!(strokes_on_hole(18, rank), 1, "rank {rank}");
        }
    }

    #[test]
    fn thirty_six_gets_exactly_two_everywhere() {
        for rank in 1..=18 {
            assert_eq!(strokes_on_hole(36, rank), 2, "rank {rank}");
        }
    }

    #[test]
    fn zero_and_negative_get_nothing() {
        for rank in 1..=18 {
            assert_eq!(strokes_on_hole(0, rank), 0);
            assert_eq!(strokes_on_hole(-3, rank), 0);
        }
    }

    #[test]
    fn allocation_total_matches_handicap() {
        let course = terra_lago();
        for handicap in 0..=54 {
            let total: i32 = allocate(handicap, &course).iter().map(|&(_, s)| s).sum();
            assert_eq!(total, handicap, "handicap {handicap}");
        }
    }

    #[test]
    fn allocation_follows_hole_order() {
        // CH 14 on Terra Lago North: ranks 15, 17, 16, 18 miss out (holes 2, 3, 11, 12).
        let strokes: Vec<i32> = allocate(14, &terra_lago()).iter().map(|&(_, s)| s).collect();
        assert_eq!(
            strokes,
            vec![1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1]
        );
    }
}
