// src/core/prompt.rs — Instruction templates and reply parsing

use minijinja::{context, Environment};

use crate::infra::errors::FinGptError;

const FINANCIAL_TEMPLATE: &str = "You are a financial expert. Answer concisely and always provide sources in the format:\nAnswer: <your answer>\nSource: <source link or reference>\nQuestion: {{ question }}";

const CONCISE_TEMPLATE: &str = "Answer concisely.\nQuestion: {{ question }}";

const SOURCE_MARKER: &str = "Source:";
const ANSWER_LABEL: &str = "Answer:";

/// Renders the instruction sent ahead of each question.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, FinGptError> {
        let mut env = Environment::new();
        env.add_template("financial", FINANCIAL_TEMPLATE)
            .map_err(anyhow::Error::from)?;
        env.add_template("concise", CONCISE_TEMPLATE)
            .map_err(anyhow::Error::from)?;
        Ok(Self { env })
    }

    pub fn build(&self, question: &str, financial: bool) -> Result<String, FinGptError> {
        let name = if financial { "financial" } else { "concise" };
        let rendered = self
            .env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(context! { question => question }))
            .map_err(anyhow::Error::from)?;
        Ok(rendered)
    }
}

/// A reply split into its answer and cited source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub answer: String,
    pub source: String,
}

/// Split `reply` at the first `Source:` marker when the question was financial.
///
/// The answer loses its first `Answer:` label. The source runs up to the next
/// marker, if the model repeated it. Otherwise the whole reply is the answer.
pub fn parse_reply(reply: &str, financial: bool) -> ParsedReply {
    if financial {
        if let Some((before, after)) = reply.split_once(SOURCE_MARKER) {
            let source = after.split(SOURCE_MARKER).next().unwrap_or("");
            return ParsedReply {
                answer: before.replacen(ANSWER_LABEL, "", 1).trim().to_string(),
                source: source.trim().to_string(),
            };
        }
    }
    ParsedReply {
        answer: reply.to_string(),
        source: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_financial_instruction() {
        let builder = PromptBuilder::new().unwrap();
        let text = builder.build("What is ROI?", true).unwrap();
        assert_eq!(
            text,
            "You are a financial expert. Answer concisely and always provide sources in the format:\nAnswer: <your answer>\nSource: <source link or reference>\nQuestion: What is ROI?"
        );
    }

    #[test]
    fn test_concise_instruction() {
        let builder = PromptBuilder::new().unwrap();
        let text = builder.build("Tell me a joke", false).unwrap();
        assert_eq!(text, "Answer concisely.\nQuestion: Tell me a joke");
    }

    #[test]
    fn test_question_is_not_interpreted_as_template() {
        let builder = PromptBuilder::new().unwrap();
        let text = builder.build("{{ 1 + 1 }} <b>", false).unwrap();
        assert!(text.ends_with("Question: {{ 1 + 1 }} <b>"));
    }

    #[test]
    fn test_split_answer_and_source() {
        let parsed = parse_reply(
            "Answer: Keep six months of expenses.\nSource: https://example.org/savings",
            true,
        );
        assert_eq!(
            parsed,
            ParsedReply {
                answer: "Keep six months of expenses.".into(),
                source: "https://example.org/savings".into(),
            }
        );
    }

    #[test]
    fn test_without_answer_label() {
        let parsed = parse_reply("Rates vary.  Source:  RBI ", true);
        assert_eq!(parsed.answer, "Rates vary.");
        assert_eq!(parsed.source, "RBI");
    }

    #[test]
    fn test_repeated_marker_keeps_first_source() {
        let parsed = parse_reply("A\nSource: one\nSource: two", true);
        assert_eq!(parsed.answer, "A");
        assert_eq!(parsed.source, "one");
    }

    #[test]
    fn test_non_financial_reply_untouched() {
        let reply = "Answer: 42\nSource: the book";
        let parsed = parse_reply(reply, false);
        assert_eq!(parsed.answer, reply);
        assert_eq!(parsed.source, "");
    }

    #[test]
    fn test_financial_reply_without_marker() {
        let parsed = parse_reply("Answer: just this", true);
        assert_eq!(parsed.answer, "Answer: just this");
        assert_eq!(parsed.source, "");
    }
}
