use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Match points, counted in halves so split holes stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(u32);

impl Points {
    pub const ZERO: Points = Points(0);
    pub const HALF: Points = Points(1);
    pub const ONE: Points = Points(2);

    pub fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    pub fn halves(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Points for a head-to-head comparison where the lower value wins and a
/// tie is split.
pub fn lower_wins(a: i32, b: i32) -> (Points, Points) {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => (Points::ONE, Points::ZERO),
        std::cmp::Ordering::Greater => (Points::ZERO, Points::ONE),
        std::cmp::Ordering::Equal => (Points::HALF, Points::HALF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_halves() {
        assert_eq!(Points::from_halves(3).to_string(), "1.5");
        assert_eq!(Points::from_halves(18).to_string(), "9");
        assert_eq!(Points::ZERO.to_string(), "0");
        assert_eq!(Points::HALF.to_string(), "0.5");
    }

    #[test]
    fn serializes_as_decimal() {
        let json = serde_json::to_string(&Points::from_halves(5)).expect("points serialize");
        assert_eq!(json, "2.5");
    }

    #[test]
    fn sum_adds_halves() {
        let total: Points = [Points::ONE, Points::HALF, Points::ONE].into_iter().sum();
        assert_eq!(total, Points::from_halves(5));
        assert_eq!(total.halves(), 5);
    }

    #[test]
    fn lower_value_wins_and_ties_split() {
        assert_eq!(lower_wins(3, 4), (Points::ONE, Points::ZERO));
        assert_eq!(lower_wins(5, 4), (Points::ZERO, Points::ONE));
        assert_eq!(lower_wins(4, 4), (Points::HALF, Points::HALF));
    }
}
