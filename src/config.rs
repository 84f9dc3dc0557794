// Search configuration, read from TOML.
//
// Every field has a default, so an empty file reproduces the stock run:
// 2 seeded keepers, 5 defenders, 5 midfielders and 3 forwards on a 100.0
// budget with at most 3 players per club.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::evaluate::{Rules, DEFAULT_TEAM_CAP};
use crate::model::entity::{Cost, Player, Score, Team};
use crate::model::position::{Formation, PerPosition, Position};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// Configuration Types
// =============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Inclusive ceiling on the whole squad's cost
    #[serde(default = "default_budget")]
    pub budget: Cost,
    /// Most squad members from one real-world team
    #[serde(default = "default_team_cap")]
    pub team_cap: usize,
    /// Worker threads for parallel search
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_goalkeepers")]
    pub goalkeepers: PositionConfig,
    #[serde(default = "default_defenders")]
    pub defenders: PositionConfig,
    #[serde(default = "default_midfielders")]
    pub midfielders: PositionConfig,
    #[serde(default = "default_forwards")]
    pub forwards: PositionConfig,
}

/// Settings for one position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionConfig {
    /// Players this position contributes to a squad
    pub count: usize,
    /// Top scorers kept per exact price; defaults to `count`
    #[serde(default)]
    pub retain: Option<usize>,
    /// Players scoring below this are dropped
    #[serde(default)]
    pub min_score: Option<Score>,
    /// Inclusive ceiling on this position's combined cost
    #[serde(default)]
    pub max_cost: Option<Cost>,
    /// Players every combination must include
    #[serde(default)]
    pub required: Vec<Player>,
    /// Fixed selection used instead of enumerating the pool
    #[serde(default)]
    pub seeded: Option<Vec<Player>>,
}

impl PositionConfig {
    pub fn new(count: usize) -> PositionConfig {
        PositionConfig {
            count,
            retain: None,
            min_score: None,
            max_cost: None,
            required: Vec::new(),
            seeded: None,
        }
    }

    pub fn retention(&self) -> usize {
        self.retain.unwrap_or(self.count)
    }
}

const LIV: Team = team(*b"LIV");
const SOU: Team = team(*b"SOU");

const fn team(code: [u8; 3]) -> Team {
    match Team::from_code(code) {
        Some(team) => team,
        None => panic!("team codes are three uppercase letters"),
    }
}

fn default_budget() -> Cost {
    Cost::from_tenths(1000)
}

fn default_team_cap() -> usize {
    DEFAULT_TEAM_CAP
}

fn default_workers() -> usize {
    4
}

fn default_goalkeepers() -> PositionConfig {
    PositionConfig {
        retain: Some(2),
        seeded: Some(vec![
            Player::new("Mignolet", LIV, Cost::from_tenths(55), 140),
            Player::new("Boruc", SOU, Cost::from_tenths(45), 63),
        ]),
        ..PositionConfig::new(2)
    }
}

fn default_defenders() -> PositionConfig {
    PositionConfig {
        retain: Some(3),
        min_score: Some(45),
        max_cost: Some(Cost::from_tenths(350)),
        ..PositionConfig::new(5)
    }
}

fn default_midfielders() -> PositionConfig {
    PositionConfig {
        retain: Some(2),
        min_score: Some(60),
        ..PositionConfig::new(5)
    }
}

fn default_forwards() -> PositionConfig {
    PositionConfig {
        retain: Some(3),
        min_score: Some(80),
        max_cost: Some(Cost::from_tenths(300)),
        ..PositionConfig::new(3)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            budget: default_budget(),
            team_cap: default_team_cap(),
            workers: default_workers(),
            goalkeepers: default_goalkeepers(),
            defenders: default_defenders(),
            midfielders: default_midfielders(),
            forwards: default_forwards(),
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_cap == 0 {
            return Err(ConfigError::Invalid("team_cap must be at least 1".to_string()));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        for position in Position::ALL {
            let cfg = self.position(position);
            if let Some(seeded) = &cfg.seeded {
                if seeded.len() != cfg.count {
                    return Err(ConfigError::Invalid(format!(
                        "{} seeded {} players but the formation needs {}",
                        position,
                        seeded.len(),
                        cfg.count
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn position(&self, position: Position) -> &PositionConfig {
        match position {
            Position::Goalkeeper => &self.goalkeepers,
            Position::Defender => &self.defenders,
            Position::Midfielder => &self.midfielders,
            Position::Forward => &self.forwards,
        }
    }

    pub fn formation(&self) -> Formation {
        PerPosition::new(
            self.goalkeepers.count,
            self.defenders.count,
            self.midfielders.count,
            self.forwards.count,
        )
    }

    pub fn rules(&self) -> Rules {
        Rules { budget: self.budget, team_cap: self.team_cap }
    }
}

/// Commented TOML equivalent to [`Config::default`].
pub fn default_config_template() -> &'static str {
    r#"# Squad search configuration

# Inclusive cap on total squad cost
budget = 100.0
# Maximum players from one real-world team
team_cap = 3
# Worker threads for parallel search
workers = 4

[goalkeepers]
count = 2
retain = 2
# Pre-selected keepers replace enumeration of the keeper pool
seeded = [
    { name = "Mignolet", team = "LIV", cost = 5.5, score = 140 },
    { name = "Boruc", team = "SOU", cost = 4.5, score = 63 },
]

[defenders]
count = 5
# Top scorers kept at each price
retain = 3
# Drop players scoring below this
min_score = 45
# Cap on the combined cost of the defence
max_cost = 35.0
# Players every defence must include
required = []

[midfielders]
count = 5
retain = 2
min_score = 60

[forwards]
count = 3
retain = 3
min_score = 80
max_cost = 30.0
# e.g. required = [{ name = "Van Persie", team = "MUN", cost = 14.0, score = 262 }]
required = []
"#
}
