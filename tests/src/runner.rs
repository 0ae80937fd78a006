//! Scenario runner.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tenantry_session::Session;

use crate::assertion::Assertion;
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::{Case, Cases};
use crate::scenario::Scenario;

/// Runs a scenario against a Tenantry session.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    cases: Cases,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let cases = scenario.load_cases()?;
        Ok(Self { scenario, cases })
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        // 1. Build the session
        let schema_path = self.scenario.schema_path()?;
        let config_path = self.scenario.config_path()?;
        let schema = read(&schema_path)?;
        let config = read(&config_path)?;

        let session = Session::from_json(&schema, &config)
            .map_err(|e| ScenarioError::session_build(&schema_path, e.to_string()))?;

        // 2. Check up-front configuration errors
        if let Some(expected) = self.scenario.expected_config_errors() {
            let actual: Vec<String> = session
                .validate()
                .iter()
                .map(|e| e.entity().to_string())
                .collect();
            if actual != expected {
                return Err(ScenarioError::assertion_failed(
                    "validate",
                    format!("expected errors for {expected:?}, got {actual:?}"),
                ));
            }
        }

        // 3. Run explicit steps
        let mut covered = HashSet::new();
        for step in self.scenario.steps() {
            let case = self
                .cases
                .get(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;
            run_case(&session, case, &step.assertion)?;
            covered.insert(step.name.as_str());
        }

        // 4. Run the remaining cases on their own expectations
        if self.scenario.runs_all_cases() {
            let defaults = Assertion::new();
            for case in self.cases.iter().filter(|c| !covered.contains(c.name.as_str())) {
                run_case(&session, case, &defaults)?;
            }
        }

        Ok(())
    }
}

fn run_case(session: &Session, case: &Case, assertion: &Assertion) -> ScenarioResult<()> {
    let result = session
        .merge(&case.input, &case.tenant_id, &case.root)
        .map_err(|e| e.to_string());
    assertion.verify(&case.name, case, &result)
}

fn read(path: &Path) -> ScenarioResult<String> {
    fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;

    #[test]
    fn test_runner_with_inline_cases() {
        let cases = r#"{ "cases": [
            { "name": "simple_create", "root": "Todo",
              "input": { "title": "My Todo" },
              "expected": { "title": "My Todo", "company": { "connect": { "id": "c1" } } } }
        ] }"#;

        let scenario = Scenario::new("inline")
            .schema("todo/schema.json")
            .config("todo/config.json")
            .cases_source(cases)
            .unwrap()
            .step("simple_create", |a| a.expected().bound("", "company"));

        scenario.run().unwrap();
    }
}
