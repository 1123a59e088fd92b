//! Prompt builders: per-kind system messages, user-prompt templates, and the
//! response schemas handed to the provider's structured-output mode.

use serde_json::{Value, json};

/// System instructions for text-only answering.
pub const ANSWER_SYSTEM: &str = r#"
You are a "Space Chat-Guide", an expert assistant for astronomy and space exploration.
Your goal is to provide clear, accurate, and engaging answers.
1. Analyze the user's query.
2. Synthesize information from the provided context (arXiv papers, Wikipedia) to form a comprehensive answer.
3. Search for relevant images based on the primary subject of the query and include their direct URLs.
4. Format your response as a JSON object that strictly follows the provided schema, including the textual answer and a list of image URLs.
5. If the user's query is conversational (e.g. "hello", "thank you"), provide a friendly, brief response and leave the image list empty.
"#;

/// System instructions for image-augmented answering.
pub const MULTIMODAL_SYSTEM: &str = r#"
You are a "Space Chat-Guide", an expert assistant for astronomy and space exploration.
Your goal is to provide clear, accurate, and engaging answers.
1. Analyze the user's query AND the attached image.
2. Synthesize information from the provided context (arXiv papers, Wikipedia) to form a comprehensive answer.
3. Search for relevant images based on the primary subject of the query and include their direct URLs.
4. Format your response as a JSON object that strictly follows the provided schema, including the textual answer and a list of image URLs.
"#;

/// System instructions for the fact-check pass.
pub const FACT_CHECK_SYSTEM: &str = r#"
You are a rigorous fact-checking AI specializing in astronomy and space science.
Your role is to validate the accuracy of information provided about space-related topics.
Be thorough but constructive.
"#;

/// User prompt for both answer kinds: labeled context block plus the query.
pub fn build_answer_prompt(query: &str, papers: &str, wiki: &str) -> String {
    format!(
        "CONTEXT:\n- ArXiv Papers: {papers}\n- Wikipedia: {wiki}\n\nUSER QUERY: {query}\n"
    )
}

/// User prompt for the fact-check pass: the original query, the answer under
/// test, the same two context snippets, and the verdict instructions.
pub fn build_fact_check_prompt(
    original_query: &str,
    answer_to_check: &str,
    papers: &str,
    wiki: &str,
) -> String {
    format!(
        "ORIGINAL QUERY: {original_query}\n\n\
         GENERATED ANSWER TO FACT-CHECK: {answer_to_check}\n\n\
         SUPPORTING CONTEXT:\n- ArXiv Papers: {papers}\n- Wikipedia: {wiki}\n\n\
         Instructions:\n\
         1. Cross-reference the generated answer against the provided scientific sources.\n\
         2. Identify any factual inaccuracies or unsupported claims in the answer.\n\
         3. Verify scientific facts mentioned in the answer against established astronomical knowledge.\n\
         4. Check for outdated information that may no longer be accurate due to recent discoveries.\n\
         5. Assess the overall reliability of the information provided.\n\n\
         Report whether the information is generally accurate, a confidence score from 0.0 to 1.0,\n\
         any issues found, the facts you could verify, and recommendations for improving accuracy or clarity.\n"
    )
}

/// User prompt asking for three distinct follow-up questions about a topic.
pub fn build_suggestions_prompt(topic: &str) -> String {
    format!(
        "You are a creative assistant. Based on the topic \"{topic}\", generate three interesting \
         and distinct follow-up questions that a curious person might ask.\n\
         The questions should be suitable for a chat and encourage further exploration.\n\
         Format your response as a JSON object with a 'questions' key containing a list of strings.\n"
    )
}

/// User prompt for the simplest-terms explanation.
pub fn build_eli5_prompt(topic: &str) -> String {
    format!(
        "Explain the topic '{topic}' to me like I'm five years old, using simple terms and a real-world analogy."
    )
}

/// User prompt for the technical deep dive.
pub fn build_deep_dive_prompt(topic: &str) -> String {
    format!(
        "Provide a more detailed, in-depth explanation of the topic '{topic}'. \
         Assume I have a basic understanding but want to know more technical details."
    )
}

/* ------------------------- response schemas ------------------------- */

/// Schema for the main answer: text plus a list of image URLs.
pub fn answer_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "answer": {"type": "STRING"},
            "image_urls": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["answer", "image_urls"]
    })
}

/// Schema for the suggestion action: a list of question strings.
pub fn suggestions_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "questions": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["questions"]
    })
}

/// Schema for the fact-check verdict.
pub fn fact_check_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "is_accurate": {"type": "BOOLEAN"},
            "confidence_score": {"type": "NUMBER"},
            "issues_found": {"type": "ARRAY", "items": {"type": "STRING"}},
            "verified_facts": {"type": "ARRAY", "items": {"type": "STRING"}},
            "recommendations": {"type": "STRING"}
        },
        "required": ["is_accurate", "confidence_score", "recommendations"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_carries_context_and_query() {
        let p = build_answer_prompt("What is a pulsar?", "PAPER-CTX", "WIKI-CTX");
        assert!(p.contains("USER QUERY: What is a pulsar?"));
        assert!(p.contains("- ArXiv Papers: PAPER-CTX"));
        assert!(p.contains("- Wikipedia: WIKI-CTX"));
    }

    #[test]
    fn fact_check_prompt_carries_answer_under_test() {
        let p = build_fact_check_prompt("query", "the answer", "papers", "wiki");
        assert!(p.contains("ORIGINAL QUERY: query"));
        assert!(p.contains("GENERATED ANSWER TO FACT-CHECK: the answer"));
    }

    #[test]
    fn schemas_declare_required_fields() {
        assert_eq!(answer_schema()["required"][0], "answer");
        assert_eq!(suggestions_schema()["required"][0], "questions");
        assert_eq!(fact_check_schema()["properties"]["is_accurate"]["type"], "BOOLEAN");
    }
}
