//! Rules command - list the rule catalogue.

use flightcheck::RuleEngine;

use super::CommandResult;

pub fn run(json: bool) -> CommandResult {
    let descriptors = RuleEngine::new().descriptors();

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
    } else {
        crate::presenter::print_rules(&descriptors);
    }

    Ok(())
}
