/// The level sequence: built-in defaults, or a TOML table supplied on the
/// command line.
///
/// ```toml
/// [[level]]
/// id = 1
/// description = "Practice"
/// targets = 15
/// arrows = 20
/// time = 60
/// speed = 1.0
/// spawn = "line"
/// ```

use std::path::Path;

use serde::Deserialize;

use crate::entities::{LevelDescriptor, SpawnPattern};
use crate::error::GameError;

#[derive(Debug, Deserialize)]
struct LevelTable {
    #[serde(rename = "level", default)]
    levels: Vec<LevelDescriptor>,
}

pub fn default_levels() -> Vec<LevelDescriptor> {
    vec![
        LevelDescriptor {
            id: 1,
            description: "Practice".to_string(),
            targets: 15,
            arrows: 20,
            time: 60,
            speed: 1.0,
            spawn: SpawnPattern::Line,
        },
        LevelDescriptor {
            id: 2,
            description: "More balloons".to_string(),
            targets: 15,
            arrows: 20,
            time: 45,
            speed: 2.0,
            spawn: SpawnPattern::Random,
        },
        LevelDescriptor {
            id: 3,
            description: "Final level".to_string(),
            targets: 15,
            arrows: 15,
            time: 30,
            speed: 3.0,
            spawn: SpawnPattern::Random,
        },
    ]
}

pub fn parse_levels(text: &str) -> Result<Vec<LevelDescriptor>, GameError> {
    let table: LevelTable = toml::from_str(text)?;
    validate(&table.levels)?;
    Ok(table.levels)
}

pub fn load_levels(path: &Path) -> Result<Vec<LevelDescriptor>, GameError> {
    let text = std::fs::read_to_string(path).map_err(|source| GameError::LevelFile {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&text)?;
    log::info!("Loaded {} levels from {}", levels.len(), path.display());
    Ok(levels)
}

/// Every level must be winnable in principle: something to shoot, something
/// to shoot with, time to do it, and balloons that actually move.
pub fn validate(levels: &[LevelDescriptor]) -> Result<(), GameError> {
    if levels.is_empty() {
        return Err(GameError::InvalidLevel("no levels defined".to_string()));
    }
    for level in levels {
        let problem = if level.targets == 0 {
            Some("has no targets")
        } else if level.arrows == 0 {
            Some("has no arrows")
        } else if level.time == 0 {
            Some("has no time")
        } else if !level.speed.is_finite() || level.speed <= 0.0 {
            Some("needs a positive speed")
        } else {
            None
        };
        if let Some(problem) = problem {
            return Err(GameError::InvalidLevel(format!(
                "level {} ({}) {}",
                level.id, level.description, problem
            )));
        }
    }
    Ok(())
}
