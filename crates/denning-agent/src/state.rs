use std::fmt;

/// Where the agent is in answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentState {
    Initializing,
    Idle,
    QueryingDatabase,
    ConstructingPrompt,
    SynthesizingAnswer,
    /// Initialization failed; terminal.
    Failed(String),
}

impl AgentState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => f.write_str("Initializing"),
            Self::Idle => f.write_str("Idle"),
            Self::QueryingDatabase => f.write_str("Querying Database"),
            Self::ConstructingPrompt => f.write_str("Constructing Prompt"),
            Self::SynthesizingAnswer => f.write_str("Synthesizing Answer with LLM"),
            Self::Failed(reason) => write!(f, "Failed - {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(AgentState::QueryingDatabase.to_string(), "Querying Database");
        assert_eq!(AgentState::SynthesizingAnswer.to_string(), "Synthesizing Answer with LLM");
        assert_eq!(AgentState::Failed("no key".into()).to_string(), "Failed - no key");
        assert!(AgentState::Idle.is_idle());
    }
}
