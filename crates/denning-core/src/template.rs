//! Prompt template with `{context}` and `{question}` placeholders.
//!
//! `{{` and `}}` render as literal braces. Any other `{name}` is an error, as
//! is a template that omits one of the two required placeholders.

use thiserror::Error;

use crate::error::{Error as CoreError, Result as CoreResult};

pub const CONTEXT_PLACEHOLDER: &str = "context";
pub const QUESTION_PLACEHOLDER: &str = "question";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is missing the {{{0}}} placeholder")]
    MissingPlaceholder(&'static str),

    #[error("template uses unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("unbalanced brace at byte {0}")]
    Unbalanced(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    raw: String,
}

enum Segment<'a> {
    Literal(&'a str),
    Context,
    Question,
}

impl PromptTemplate {
    pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CoreError::InvalidConfig("Prompt template is missing or invalid".to_string()));
        }
        Ok(Self { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn render(&self, context: &str, question: &str) -> Result<String, TemplateError> {
        let segments = self.parse()?;
        let mut has_context = false;
        let mut has_question = false;
        for segment in &segments {
            match segment {
                Segment::Context => has_context = true,
                Segment::Question => has_question = true,
                Segment::Literal(_) => {}
            }
        }
        if !has_context {
            return Err(TemplateError::MissingPlaceholder(CONTEXT_PLACEHOLDER));
        }
        if !has_question {
            return Err(TemplateError::MissingPlaceholder(QUESTION_PLACEHOLDER));
        }

        let mut out = String::with_capacity(self.raw.len() + context.len() + question.len());
        for segment in segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Context => out.push_str(context),
                Segment::Question => out.push_str(question),
            }
        }
        Ok(out)
    }

    fn parse(&self) -> Result<Vec<Segment<'_>>, TemplateError> {
        let raw = self.raw.as_str();
        let bytes = raw.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    segments.push(Segment::Literal(&raw[literal_start..=i]));
                    i += 2;
                    literal_start = i;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    segments.push(Segment::Literal(&raw[literal_start..=i]));
                    i += 2;
                    literal_start = i;
                }
                b'{' => {
                    let close = raw[i + 1..].find('}').map(|off| i + 1 + off).ok_or(TemplateError::Unbalanced(i))?;
                    let name = &raw[i + 1..close];
                    if name.contains('{') {
                        return Err(TemplateError::Unbalanced(i));
                    }
                    segments.push(Segment::Literal(&raw[literal_start..i]));
                    segments.push(match name {
                        CONTEXT_PLACEHOLDER => Segment::Context,
                        QUESTION_PLACEHOLDER => Segment::Question,
                        other => return Err(TemplateError::UnknownPlaceholder(other.to_string())),
                    });
                    i = close + 1;
                    literal_start = i;
                }
                b'}' => return Err(TemplateError::Unbalanced(i)),
                _ => i += 1,
            }
        }
        segments.push(Segment::Literal(&raw[literal_start..]));
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_context_and_question() {
        let t = PromptTemplate::new("{context} {question}").unwrap();
        assert_eq!(t.render("A\n\n---\n\nB", "What is X?").unwrap(), "A\n\n---\n\nB What is X?");
    }

    #[test]
    fn placeholders_may_repeat_and_appear_in_any_order() {
        let t = PromptTemplate::new("Q: {question}\nContext:\n{context}\nAgain: {question}").unwrap();
        assert_eq!(t.render("ctx", "why?").unwrap(), "Q: why?\nContext:\nctx\nAgain: why?");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let t = PromptTemplate::new("{{json}} {context} {{ {question} }}").unwrap();
        assert_eq!(t.render("c", "q").unwrap(), "{json} c { q }");
    }

    #[test]
    fn substituted_values_are_not_reparsed() {
        let t = PromptTemplate::new("{context}|{question}").unwrap();
        assert_eq!(t.render("{question}", "{context}").unwrap(), "{question}|{context}");
    }

    #[test]
    fn missing_placeholder_is_reported() {
        let t = PromptTemplate::new("Answer this: {question}").unwrap();
        assert_eq!(t.render("c", "q"), Err(TemplateError::MissingPlaceholder("context")));
        let t = PromptTemplate::new("Context: {context}").unwrap();
        assert_eq!(t.render("c", "q"), Err(TemplateError::MissingPlaceholder("question")));
    }

    #[test]
    fn unknown_placeholder_is_reported() {
        let t = PromptTemplate::new("{context} {question} {jurisdiction}").unwrap();
        assert_eq!(t.render("c", "q"), Err(TemplateError::UnknownPlaceholder("jurisdiction".into())));
    }

    #[test]
    fn stray_braces_are_reported() {
        assert!(matches!(PromptTemplate::new("{context} {question").unwrap().render("c", "q"), Err(TemplateError::Unbalanced(_))));
        assert!(matches!(PromptTemplate::new("{context} } {question}").unwrap().render("c", "q"), Err(TemplateError::Unbalanced(_))));
    }

    #[test]
    fn blank_template_is_invalid_configuration() {
        assert!(matches!(PromptTemplate::new("   \n"), Err(CoreError::InvalidConfig(_))));
    }
}
