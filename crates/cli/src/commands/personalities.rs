use aromatica_core::recommendation::personality_types;

use super::CommandResult;

pub fn run() -> CommandResult {
    CommandResult::json("personalities", &personality_types())
}
