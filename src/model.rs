pub mod entity {
    use std::fmt;
    use std::iter::Sum;
    use std::ops::Add;
    use std::str::FromStr;

    use serde::Deserialize;
    use thiserror::Error;

    pub type Score = u32;

    /// Sum of many [`Score`]s. Wide enough that no squad total can overflow.
    pub type Points = u64;

    /// Price baseline above which a player's cost counts as premium.
    pub const PREMIUM_BASELINE: Cost = Cost::from_tenths(40);

    #[derive(Debug, Clone, Error, PartialEq)]
    pub enum EntityError {
        #[error("invalid cost {0:?}: expected digits, a decimal point and one digit")]
        InvalidCost(String),
        #[error("invalid team code {0:?}: expected three uppercase letters")]
        InvalidTeam(String),
    }

    /// Money in tenths of a unit, so `5.5` is stored as `55`.
    ///
    /// A single price fits in a `u32`; the `u64` backing leaves room for totals.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
    #[serde(try_from = "f64")]
    pub struct Cost(u64);

    impl Cost {
        pub const ZERO: Cost = Cost(0);

        pub const fn from_tenths(tenths: u32) -> Cost {
            Cost(tenths as u64)
        }

        pub const fn tenths(self) -> u64 {
            self.0
        }

        pub fn as_f64(self) -> f64 {
            self.0 as f64 / 10.0
        }

        pub fn checked_add(self, rhs: Cost) -> Option<Cost> {
            self.0.checked_add(rhs.0).map(Cost)
        }
    }

    impl fmt::Display for Cost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}.{}", self.0 / 10, self.0 % 10)
        }
    }

    impl FromStr for Cost {
        type Err = EntityError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let invalid = || EntityError::InvalidCost(s.to_string());
            let (whole, tenth) = s.split_once('.').ok_or_else(invalid)?;
            let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if !digits(whole) || tenth.len() != 1 || !digits(tenth) {
                return Err(invalid());
            }
            let whole: u32 = whole.parse().map_err(|_| invalid())?;
            let tenth: u32 = tenth.parse().map_err(|_| invalid())?;
            whole
                .checked_mul(10)
                .and_then(|w| w.checked_add(tenth))
                .map(Cost::from_tenths)
                .ok_or_else(invalid)
        }
    }

    impl TryFrom<f64> for Cost {
        type Error = EntityError;

        fn try_from(value: f64) -> Result<Self, Self::Error> {
            let scaled = value * 10.0;
            let rounded = scaled.round();
            let exact = (scaled - rounded).abs() <= 1e-6;
            if !value.is_finite() || value < 0.0 || !exact || rounded > f64::from(u32::MAX) {
                return Err(EntityError::InvalidCost(value.to_string()));
            }
            Ok(Cost::from_tenths(rounded as u32))
        }
    }

    impl Add for Cost {
        type Output = Self;

        /// Panics on overflow, which needs billions of `u32`-sized prices.
        fn add(self, rhs: Self) -> Self::Output {
            self.checked_add(rhs).expect("cost total overflowed u64")
        }
    }

    impl Sum for Cost {
        fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
            iter.fold(Cost::ZERO, Add::add)
        }
    }

    impl<'a> Sum<&'a Cost> for Cost {
        fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Self {
            iter.copied().sum()
        }
    }

    /// Three-letter code of a real-world club.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
    #[serde(try_from = "String")]
    pub struct Team([u8; 3]);

    impl Team {
        /// Const-friendly constructor; `None` unless all three bytes are `A`..=`Z`.
        pub const fn from_code(code: [u8; 3]) -> Option<Team> {
            let [a, b, c] = code;
            if a.is_ascii_uppercase() && b.is_ascii_uppercase() && c.is_ascii_uppercase() {
                Some(Team(code))
            } else {
                None
            }
        }

        pub fn as_str(&self) -> &str {
            std::str::from_utf8(&self.0).unwrap_or("???")
        }
    }

    impl fmt::Display for Team {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Team {
        type Err = EntityError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let team = match s.as_bytes() {
                &[a, b, c] => Team::from_code([a, b, c]),
                _ => None,
            };
            team.ok_or_else(|| EntityError::InvalidTeam(s.to_string()))
        }
    }

    impl TryFrom<String> for Team {
        type Error = EntityError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            value.parse()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
    pub struct Player {
        pub name: String,
        pub team: Team,
        pub cost: Cost,
        pub score: Score,
    }

    impl Player {
        pub fn new(name: impl Into<String>, team: Team, cost: Cost, score: Score) -> Player {
            Player { name: name.into(), team, cost, score }
        }

        /// Cost above [`PREMIUM_BASELINE`]; negative for cheaper players.
        pub fn premium(&self) -> f64 {
            self.cost.as_f64() - PREMIUM_BASELINE.as_f64()
        }
    }

    impl fmt::Display for Player {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} ({}, {}, {})", self.name, self.team, self.cost, self.score)
        }
    }
}


pub mod squad {
    use std::fmt;

    use super::entity::{Cost, Player, Points};

    /// A candidate selection. Aggregates are fixed at construction.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Squad<'a> {
        members: Vec<&'a Player>,
        cost: Cost,
        score: Points,
    }

    impl<'a> Squad<'a> {
        pub fn new(members: Vec<&'a Player>) -> Squad<'a> {
            let cost: Cost = members.iter().map(|p| p.cost).sum();
            let score: Points = members.iter().map(|p| Points::from(p.score)).sum();
            Squad { members, cost, score }
        }

        pub fn members(&self) -> &[&'a Player] {
            &self.members
        }

        pub fn cost(&self) -> Cost {
            self.cost
        }

        pub fn score(&self) -> Points {
            self.score
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }

        pub fn contains(&self, player: &Player) -> bool {
            self.members.iter().any(|m| *m == player)
        }
    }

    impl<'a> FromIterator<&'a Player> for Squad<'a> {
        fn from_iter<I: IntoIterator<Item = &'a Player>>(iter: I) -> Self {
            Squad::new(iter.into_iter().collect())
        }
    }

    impl fmt::Display for Squad<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "Cost {}, points {}", self.cost, self.score)?;
            for member in &self.members {
                writeln!(f, "  {}", member)?;
            }
            Ok(())
        }
    }
}


pub mod position {
    use std::fmt;

    use serde::Deserialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Position {
        Goalkeeper,
        Defender,
        Midfielder,
        Forward,
    }

    impl Position {
        pub const ALL: [Position; 4] = [
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ];

        /// Name of the roster file holding this position's players.
        pub fn file_stem(self) -> &'static str {
            match self {
                Position::Goalkeeper => "goalkeepers",
                Position::Defender => "defenders",
                Position::Midfielder => "midfielders",
                Position::Forward => "forwards",
            }
        }
    }

    impl fmt::Display for Position {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let label = match self {
                Position::Goalkeeper => "goalkeeper",
                Position::Defender => "defender",
                Position::Midfielder => "midfielder",
                Position::Forward => "forward",
            };
            f.write_str(label)
        }
    }

    /// One value per position.
    #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
    pub struct PerPosition<T> {
        pub goalkeepers: T,
        pub defenders: T,
        pub midfielders: T,
        pub forwards: T,
    }

    impl<T> PerPosition<T> {
        pub fn new(goalkeepers: T, defenders: T, midfielders: T, forwards: T) -> PerPosition<T> {
            PerPosition { goalkeepers, defenders, midfielders, forwards }
        }

        pub fn get(&self, position: Position) -> &T {
            match position {
                Position::Goalkeeper => &self.goalkeepers,
                Position::Defender => &self.defenders,
                Position::Midfielder => &self.midfielders,
                Position::Forward => &self.forwards,
            }
        }

        pub fn map<U>(self, mut f: impl FnMut(Position, T) -> U) -> PerPosition<U> {
            PerPosition {
                goalkeepers: f(Position::Goalkeeper, self.goalkeepers),
                defenders: f(Position::Defender, self.defenders),
                midfielders: f(Position::Midfielder, self.midfielders),
                forwards: f(Position::Forward, self.forwards),
            }
        }
    }

    /// Number of players each position contributes to a squad.
    pub type Formation = PerPosition<usize>;

    impl Formation {
        pub fn squad_size(&self) -> usize {
            self.goalkeepers + self.defenders + self.midfielders + self.forwards
        }
    }
}
