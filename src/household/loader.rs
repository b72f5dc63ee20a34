//! Load scenarios from JSON files

use super::Scenario;
use std::error::Error;
use std::path::Path;

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, Box<dyn Error>> {
    let file = std::fs::File::open(path.as_ref())?;
    let scenario = load_scenario_from_reader(file)?;
    log::info!("loaded scenario from {}", path.as_ref().display());
    Ok(scenario)
}

/// Load a scenario from any reader (e.g., string buffer, network stream)
pub fn load_scenario_from_reader<R: std::io::Read>(reader: R) -> Result<Scenario, Box<dyn Error>> {
    let scenario: Scenario = serde_json::from_reader(reader)?;
    Ok(scenario)
}

/// Write a scenario to a JSON file, pretty-printed for hand editing
pub fn save_scenario<P: AsRef<Path>>(scenario: &Scenario, path: P) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, scenario)?;
    Ok(())
}
