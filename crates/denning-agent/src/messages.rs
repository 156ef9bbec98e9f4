//! Replies returned to the user in place of an answer.

pub const INVALID_QUESTION: &str = "Please provide a valid question.";
pub const NO_RELEVANT_INFORMATION: &str =
    "I could not find relevant information in the legal database to answer your question.";
pub const DATABASE_UNAVAILABLE: &str = "Error: The legal database could not be searched. Please try again later.";
pub const TEMPLATE_MISCONFIGURED: &str = "Error: The prompt template is misconfigured.";
pub const EMPTY_RESPONSE: &str = "The language model returned an empty response.";
pub const CONNECTION_FAILED: &str =
    "Error: Could not connect to the Hugging Face API. Please check your connection and API key.";
pub const UNEXPECTED_GENERATION_ERROR: &str =
    "An unexpected error occurred while communicating with the language model.";
