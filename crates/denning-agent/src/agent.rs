use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

use denning_core::config::api_key_from_env;
use denning_core::{Config, PromptTemplate, Retrieval, Retriever, Settings, VectorStore};
use denning_vector::VectorDb;

use crate::generator::{GenerationError, Generator, HuggingFaceClient};
use crate::messages;
use crate::state::AgentState;

/// Separator placed between retrieved chunks in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Core(#[from] denning_core::Error),

    #[error("could not build the generation client: {0}")]
    Client(#[from] GenerationError),
}

/// Answers legal questions from the vector index through a language model.
pub struct Agent {
    state: AgentState,
    retriever: Retriever,
    template: PromptTemplate,
    generator: Box<dyn Generator>,
}

impl Agent {
    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        initialize(|| {
            let settings = Config::from_path(path)?.settings()?;
            Self::build(&settings)
        })
    }

    /// Configuration layered from `config.toml`, `config.<env>.toml` and `APP_*`.
    pub fn load() -> Result<Self, AgentError> {
        initialize(|| {
            let settings = Config::load()?.settings()?;
            Self::build(&settings)
        })
    }

    /// Reads `HUGGINGFACE_API_KEY`, opens the vector index and the
    /// Hugging Face client.
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        initialize(|| Self::build(settings))
    }

    /// Same checks as [`Agent::from_settings`] apart from the credential,
    /// which belongs to the injected generator.
    pub fn with_components(
        settings: &Settings,
        store: Box<dyn VectorStore>,
        generator: Box<dyn Generator>,
    ) -> Result<Self, AgentError> {
        initialize(|| {
            let template = checked_template(settings)?;
            Ok(Self::assemble(settings, template, store, generator))
        })
    }

    fn build(settings: &Settings) -> Result<Self, AgentError> {
        let api_key = api_key_from_env()?;
        let template = checked_template(settings)?;
        let store = VectorDb::from_settings(settings)?;
        let client = HuggingFaceClient::new(settings.huggingface_api_url.clone(), api_key, &settings.generation)?;
        Ok(Self::assemble(settings, template, Box::new(store), Box::new(client)))
    }

    fn assemble(settings: &Settings, template: PromptTemplate, store: Box<dyn VectorStore>, generator: Box<dyn Generator>) -> Self {
        let agent = Self {
            state: AgentState::Idle,
            retriever: Retriever::new(store, settings.retrieval_results),
            template,
            generator,
        };
        log_state(&agent.state);
        agent
    }

    pub fn get_status(&self) -> &AgentState {
        &self.state
    }

    /// Answer `question`, or explain why no answer could be produced.
    ///
    /// The agent is back in [`AgentState::Idle`] when this returns.
    pub fn handle_query(&mut self, question: &str) -> String {
        if question.trim().is_empty() {
            return messages::INVALID_QUESTION.to_string();
        }
        let reply = self.answer(question);
        self.set_state(AgentState::Idle);
        reply
    }

    fn answer(&mut self, question: &str) -> String {
        self.set_state(AgentState::QueryingDatabase);
        let chunks = match self.retriever.retrieve(question) {
            Retrieval::Found(chunks) => chunks,
            Retrieval::Empty => return messages::NO_RELEVANT_INFORMATION.to_string(),
            Retrieval::Failed(_) => return messages::DATABASE_UNAVAILABLE.to_string(),
        };

        self.set_state(AgentState::ConstructingPrompt);
        let context = chunks.join(CONTEXT_SEPARATOR);
        let prompt = match self.template.render(&context, question) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Prompt template is misconfigured: {e}");
                return messages::TEMPLATE_MISCONFIGURED.to_string();
            }
        };

        self.set_state(AgentState::SynthesizingAnswer);
        match self.generator.generate(&prompt) {
            Ok(answer) if answer.trim().is_empty() => messages::EMPTY_RESPONSE.to_string(),
            Ok(answer) => answer,
            Err(e) if e.is_transport() => {
                error!("Hugging Face API request error: {e}");
                messages::CONNECTION_FAILED.to_string()
            }
            Err(e) => {
                error!("Unexpected error during LLM communication: {e}");
                messages::UNEXPECTED_GENERATION_ERROR.to_string()
            }
        }
    }

    fn set_state(&mut self, state: AgentState) {
        self.state = state;
        log_state(&self.state);
    }
}

/// Validate the settings and parse the prompt template.
fn checked_template(settings: &Settings) -> Result<PromptTemplate, AgentError> {
    settings.validate()?;
    Ok(PromptTemplate::new(settings.prompt_template.clone())?)
}

fn log_state(state: &AgentState) {
    info!("Agent state: {state}");
}

/// Run construction between the `Initializing` and `Failed` log lines.
fn initialize(build: impl FnOnce() -> Result<Agent, AgentError>) -> Result<Agent, AgentError> {
    log_state(&AgentState::Initializing);
    build().inspect_err(|e| {
        error!("Failed to initialize Agent: {e}");
        log_state(&AgentState::Failed(e.to_string()));
    })
}
