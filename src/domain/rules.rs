use std::fmt;
use std::str::FromStr;

use super::{Cell, Error};

/// Largest neighbour count in a Moore neighbourhood
const MAX_NEIGHBORS: u8 = 8;

/// Birth/survival rule in `B<digits>/S<digits>` notation.
///
/// Each set is stored as a bitmask over neighbour counts 0..=8, so
/// membership checks are a single shift. Immutable once parsed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuleSet {
    born: u16,
    survive: u16,
}

impl RuleSet {
    /// Conway's Game of Life (B3/S23)
    pub const fn conway() -> Self {
        Self {
            born: 1 << 3,
            survive: 1 << 2 | 1 << 3,
        }
    }

    /// Parse a rule string such as `B3/S23` or `B36/S23`.
    ///
    /// The string must contain exactly one `/`, the first segment must be
    /// tagged `B` and the second `S` (either case), and each tag must be
    /// followed by at least one digit in 0..=8.
    pub fn parse(rule: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidRuleFormat(rule.to_owned());
        let (born, survive) = rule.trim().split_once('/').ok_or_else(invalid)?;

        Ok(Self {
            born: parse_segment(born, 'B').ok_or_else(invalid)?,
            survive: parse_segment(survive, 'S').ok_or_else(invalid)?,
        })
    }

    /// Neighbour counts that bring a dead cell to life
    pub fn born(&self) -> impl Iterator<Item = u8> + '_ {
        counts(self.born)
    }

    /// Neighbour counts that keep a live cell alive
    pub fn survive(&self) -> impl Iterator<Item = u8> + '_ {
        counts(self.survive)
    }

    #[inline]
    pub const fn is_born(&self, neighbors: u8) -> bool {
        neighbors <= MAX_NEIGHBORS && self.born & (1 << neighbors) != 0
    }

    #[inline]
    pub const fn survives(&self, neighbors: u8) -> bool {
        neighbors <= MAX_NEIGHBORS && self.survive & (1 << neighbors) != 0
    }

    /// Apply the rule to compute the next state of a single cell
    #[inline]
    pub const fn evolve(&self, current: Cell, neighbors: u8) -> Cell {
        let alive = match current {
            Cell::Dead => self.is_born(neighbors),
            Cell::Alive => self.survives(neighbors),
        };
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Strip the tag and fold the remaining digits into a bitmask.
fn parse_segment(segment: &str, tag: char) -> Option<u16> {
    let mut chars = segment.chars();
    if !chars.next()?.eq_ignore_ascii_case(&tag) {
        return None;
    }

    let digits = chars.as_str();
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0u16, |mask, c| {
        let count = c.to_digit(10).filter(|&n| n <= u32::from(MAX_NEIGHBORS))?;
        Some(mask | 1 << count)
    })
}

fn counts(mask: u16) -> impl Iterator<Item = u8> {
    (0..=MAX_NEIGHBORS).filter(move |n| mask & (1 << n) != 0)
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in self.born() {
            write!(f, "{n}")?;
        }
        f.write_str("/S")?;
        for n in self.survive() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

/// Named rules offered on the command line
pub fn all_rules() -> Vec<(&'static str, &'static str, RuleSet)> {
    [
        ("Conway", "Classic", "B3/S23"),
        ("HighLife", "Replicators", "B36/S23"),
        ("Day&Night", "Symmetric under inversion", "B3678/S34678"),
        ("Maze", "Grows corridors", "B3/S12345"),
        ("2x2", "Block-shaped oscillators", "B36/S125"),
    ]
    .into_iter()
    .filter_map(|(name, description, rule)| {
        RuleSet::parse(rule).ok().map(|r| (name, description, r))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conway() {
        let rule = RuleSet::parse("B3/S23").unwrap();
        assert_eq!(rule.born().collect::<Vec<_>>(), vec![3]);
        assert_eq!(rule.survive().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(rule, RuleSet::conway());
    }

    #[test]
    fn test_parse_ignores_digit_order_and_repeats() {
        let a = RuleSet::parse("B63/S32").unwrap();
        let b = RuleSet::parse("B366/S23").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "B36/S23");
    }

    #[test]
    fn test_parse_lowercase_tags() {
        assert_eq!(RuleSet::parse("b3/s23").unwrap(), RuleSet::conway());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "", "B3S23", "B3/", "/S23", "B/S23", "B3/S", "B3/S2x", "Bx/S23",
            "S23/B3", "B3/S23/S4", "B9/S23", "3/S23",
        ] {
            assert_eq!(
                RuleSet::parse(bad),
                Err(Error::InvalidRuleFormat(bad.to_owned())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_str_and_display_round_trip() {
        let rule: RuleSet = "B3678/S34678".parse().unwrap();
        assert_eq!(rule.to_string(), "B3678/S34678");
    }

    #[test]
    fn test_conway_rules() {
        let rule = RuleSet::conway();

        // Underpopulation
        assert_eq!(rule.evolve(Cell::Alive, 0), Cell::Dead);
        assert_eq!(rule.evolve(Cell::Alive, 1), Cell::Dead);

        // Survival
        assert_eq!(rule.evolve(Cell::Alive, 2), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Alive, 3), Cell::Alive);

        // Overpopulation
        assert_eq!(rule.evolve(Cell::Alive, 4), Cell::Dead);
        assert_eq!(rule.evolve(Cell::Alive, 8), Cell::Dead);

        // Reproduction
        assert_eq!(rule.evolve(Cell::Dead, 3), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Dead, 2), Cell::Dead);
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = RuleSet::parse("B36/S23").unwrap();
        assert_eq!(rule.evolve(Cell::Dead, 6), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Dead, 3), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Alive, 6), Cell::Dead);
    }

    #[test]
    fn test_birth_on_zero_neighbors() {
        let rule = RuleSet::parse("B0/S8").unwrap();
        assert_eq!(rule.evolve(Cell::Dead, 0), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Alive, 8), Cell::Alive);
        assert_eq!(rule.evolve(Cell::Alive, 0), Cell::Dead);
    }

    #[test]
    fn test_all_rules_parse() {
        let rules = all_rules();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0].2, RuleSet::conway());
    }
}
