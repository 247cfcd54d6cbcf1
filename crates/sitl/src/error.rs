/// Errors that can occur while setting up or running the harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
