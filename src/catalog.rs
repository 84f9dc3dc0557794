//! Player rosters, one text file per position.
//!
//! Each line reads `<name> <TEAM> <cost> <score>`, e.g.
//! `Van Persie   MUN  14.0  262`. Names may contain spaces.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::entity::{EntityError, Player};
use crate::model::position::{PerPosition, Position};

static RECORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S(?:.*\S)?)\s+([A-Z]{3})\s+([0-9]+\.[0-9])\s+([0-9]+)\s*$")
        .expect("player record pattern is valid")
});

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("invalid player record {0:?}")]
    InvalidRecord(String),
    #[error("score {0:?} out of range")]
    ScoreOutOfRange(String),
    #[error(transparent)]
    Entity(#[from] EntityError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Loaded players for every position.
pub type Pools = PerPosition<Vec<Player>>;

pub fn parse_record(record: &str) -> Result<Player, ParseError> {
    let caps = RECORD
        .captures(record)
        .ok_or_else(|| ParseError::InvalidRecord(record.to_string()))?;
    let score = caps[4]
        .parse()
        .map_err(|_| ParseError::ScoreOutOfRange(caps[4].to_string()))?;
    Ok(Player::new(&caps[1], caps[2].parse()?, caps[3].parse()?, score))
}

/// Parses every line of `text`. Any bad line fails the whole roster.
pub fn parse_roster(path: &Path, text: &str) -> Result<Vec<Player>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(index, record)| {
            parse_record(record).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

pub fn load_pool(path: &Path) -> Result<Vec<Player>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let players = parse_roster(path, &text)?;
    info!("Got {} players from {}", players.len(), path.display());
    Ok(players)
}

/// Reads `goalkeepers`, `defenders`, `midfielders` and `forwards` from `dir`.
pub fn load_pools(dir: &Path) -> Result<Pools, LoadError> {
    let [goalkeepers, defenders, midfielders, forwards] =
        Position::ALL.map(|position| load_pool(&dir.join(position.file_stem())));
    Ok(PerPosition::new(goalkeepers?, defenders?, midfielders?, forwards?))
}
