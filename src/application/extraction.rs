//! Constraint extraction service.
//!
//! Turns free text plus conversation history into a partially-filled
//! constraint set: one reasoning call to extract a typed draft, then
//! per-side location resolution. Unresolvable names are reported back as a
//! combined, user-facing outcome instead of partial constraints.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::trip::{parse_reply, ConstraintDraft, ConversationTurn, TripConstraints};
use crate::ports::{LocationResolver, Reasoning, ReasoningError};

/// Result of one extraction turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// Constraints extracted and (where needed) resolved.
    Constraints(TripConstraints),
    /// One or more place names could not be resolved. The turn's partial
    /// constraints are discarded; each entry is a user-facing message.
    Unresolved(Vec<String>),
}

/// Extracts structured constraints from conversation turns.
pub struct ConstraintExtractor {
    reasoning: Arc<dyn Reasoning>,
    resolver: Arc<dyn LocationResolver>,
}

impl ConstraintExtractor {
    pub fn new(reasoning: Arc<dyn Reasoning>, resolver: Arc<dyn LocationResolver>) -> Self {
        Self { reasoning, resolver }
    }

    /// Runs one extraction turn.
    ///
    /// A reasoning failure propagates to the caller; a malformed reply is
    /// treated as an empty extraction and the turn continues.
    pub async fn extract(
        &self,
        prior_turns: &[ConversationTurn],
        message: &str,
        today: NaiveDate,
    ) -> Result<ExtractionOutcome, ReasoningError> {
        let prompt = build_extraction_prompt(prior_turns, message, today);
        let reply = self.reasoning.chat(&prompt).await?;

        let draft = match parse_reply(&reply) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(%err, "extraction reply was malformed, treating as empty");
                ConstraintDraft::default()
            }
        };
        tracing::debug!(?draft, "extraction draft");

        let mut failures = Vec::new();
        let origin = self
            .resolve_side(draft.origin_code, draft.origin_name, &mut failures)
            .await;
        let destination = self
            .resolve_side(draft.destination_code, draft.destination_name, &mut failures)
            .await;

        if !failures.is_empty() {
            return Ok(ExtractionOutcome::Unresolved(failures));
        }

        Ok(ExtractionOutcome::Constraints(TripConstraints {
            origin,
            destination,
            depart_date: draft.depart_date,
            return_date: draft.return_date,
            travelers: draft.travelers,
        }))
    }

    /// An explicit code wins; otherwise the name goes through the resolver.
    async fn resolve_side(
        &self,
        code: Option<String>,
        name: Option<String>,
        failures: &mut Vec<String>,
    ) -> Option<String> {
        if let Some(code) = code {
            return Some(code.trim().to_uppercase());
        }
        let name = name?;
        match self.resolver.resolve(&name).await {
            Some(code) => Some(code),
            None => {
                failures.push(format!("I couldn't identify the location \"{}\".", name));
                None
            }
        }
    }

    /// Asks the model for a short follow-up question naming exactly the
    /// missing fields. Falls back to a templated prompt when the reasoning
    /// call fails, so the turn still ends in a single send.
    pub async fn follow_up(&self, known: &TripConstraints, missing: &[&str]) -> String {
        let known_json = serde_json::to_string(known).unwrap_or_else(|_| "{}".to_string());
        let prompt = format!(
            "You are a travel planning assistant texting with a user over SMS.\n\
             What is known about their trip so far: {known_json}\n\
             Still missing: {missing}.\n\
             Write one short, friendly SMS question asking for exactly the missing \
             items and nothing else. Output only the question.",
            missing = missing.join(", "),
        );
        match self.reasoning.chat(&prompt).await {
            Ok(question) if !question.trim().is_empty() => question.trim().to_string(),
            Ok(_) | Err(_) => format!("Almost there! I still need your {}.", missing.join(", ")),
        }
    }
}

/// Builds the fixed extraction instruction with the full conversation as
/// context and relative dates anchored to today.
fn build_extraction_prompt(prior_turns: &[ConversationTurn], message: &str, today: NaiveDate) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are a travel planning assistant. Today's date is ");
    prompt.push_str(&today.format("%Y-%m-%d").to_string());
    prompt.push_str(".\n");

    if !prior_turns.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for turn in prior_turns {
            prompt.push_str("User: ");
            prompt.push_str(&turn.message);
            prompt.push('\n');
        }
    }

    prompt.push_str("New message: \"");
    prompt.push_str(message);
    prompt.push_str("\"\n");
    prompt.push_str(
        "Extract the user's travel constraints from the whole conversation as a single \
         JSON object with exactly these fields: {\"originCode\", \"destinationCode\", \
         \"originName\", \"destinationName\", \"departDate\", \"returnDate\", \
         \"travelers\"}. Use null for anything not stated. Put IATA airport codes in \
         originCode/destinationCode only when the user gives a code; otherwise put the \
         place name in originName/destinationName. Dates must be YYYY-MM-DD; resolve \
         relative dates against today's date. Output only the JSON object.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geo::StaticLocationResolver;
    use crate::adapters::reasoning::ScriptedReasoning;
    use crate::domain::foundation::Timestamp;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn turn(message: &str) -> ConversationTurn {
        ConversationTurn {
            message: message.into(),
            constraints: TripConstraints::new(),
            plan: None,
            received_at: Timestamp::now(),
        }
    }

    fn extractor(reasoning: ScriptedReasoning) -> ConstraintExtractor {
        ConstraintExtractor::new(Arc::new(reasoning), Arc::new(StaticLocationResolver::default()))
    }

    #[tokio::test]
    async fn resolves_names_through_the_resolver() {
        let reasoning = ScriptedReasoning::new().with_reply(
            r#"{"originName": "NYC", "destinationName": "LA", "departDate": "2026-03-01"}"#,
        );
        let outcome = extractor(reasoning)
            .extract(&[], "NYC to LA March 1", today())
            .await
            .unwrap();
        let ExtractionOutcome::Constraints(constraints) = outcome else {
            panic!("expected constraints");
        };
        assert_eq!(constraints.origin.as_deref(), Some("JFK"));
        assert_eq!(constraints.destination.as_deref(), Some("LAX"));
        assert_eq!(constraints.depart_date.as_deref(), Some("2026-03-01"));
    }

    #[tokio::test]
    async fn explicit_code_wins_over_name() {
        let reasoning = ScriptedReasoning::new()
            .with_reply(r#"{"originCode": "ewr", "originName": "New York"}"#);
        let outcome = extractor(reasoning)
            .extract(&[], "from EWR actually", today())
            .await
            .unwrap();
        let ExtractionOutcome::Constraints(constraints) = outcome else {
            panic!("expected constraints");
        };
        assert_eq!(constraints.origin.as_deref(), Some("EWR"));
    }

    #[tokio::test]
    async fn two_unresolvable_names_produce_two_combined_messages() {
        let reasoning = ScriptedReasoning::new()
            .with_reply(r#"{"originName": "Atlantis", "destinationName": "Narnia"}"#);
        let outcome = extractor(reasoning)
            .extract(&[], "Atlantis to Narnia", today())
            .await
            .unwrap();
        let ExtractionOutcome::Unresolved(failures) = outcome else {
            panic!("expected unresolved");
        };
        assert_eq!(failures.len(), 2);
        assert!(failures[0].contains("Atlantis"));
        assert!(failures[1].contains("Narnia"));
    }

    #[tokio::test]
    async fn malformed_reply_is_an_empty_extraction() {
        let reasoning = ScriptedReasoning::new().with_reply("Where would you like to go?");
        let outcome = extractor(reasoning)
            .extract(&[], "hmm", today())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ExtractionOutcome::Constraints(TripConstraints::new())
        );
    }

    #[tokio::test]
    async fn reasoning_failure_propagates() {
        let reasoning = ScriptedReasoning::new()
            .with_error(ReasoningError::unavailable("model down"));
        let result = extractor(reasoning).extract(&[], "hi", today()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn prompt_includes_history_current_date_and_message() {
        let reasoning = ScriptedReasoning::new().with_reply("{}");
        let reasoning_handle = reasoning.clone();
        let prior = vec![turn("I want a beach trip"), turn("maybe from NYC")];
        extractor(reasoning)
            .extract(&prior, "leaving next Friday", today())
            .await
            .unwrap();
        let calls = reasoning_handle.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("2026-02-14"));
        assert!(calls[0].contains("I want a beach trip"));
        assert!(calls[0].contains("maybe from NYC"));
        assert!(calls[0].contains("leaving next Friday"));
    }

    #[tokio::test]
    async fn follow_up_falls_back_to_template_when_reasoning_fails() {
        let reasoning = ScriptedReasoning::new()
            .with_error(ReasoningError::unavailable("model down"));
        let question = extractor(reasoning)
            .follow_up(&TripConstraints::new(), &["origin", "departure date"])
            .await;
        assert!(question.contains("origin"));
        assert!(question.contains("departure date"));
    }

    #[tokio::test]
    async fn follow_up_uses_model_reply_when_available() {
        let reasoning =
            ScriptedReasoning::new().with_reply("Where are you flying from, and when?");
        let question = extractor(reasoning)
            .follow_up(&TripConstraints::new(), &["origin", "departure date"])
            .await;
        assert_eq!(question, "Where are you flying from, and when?");
    }
}
