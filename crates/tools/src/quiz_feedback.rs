//! Quiz feedback tool — explains a quiz answer against the option the
//! learner actually picked.
//!
//! The learner's selection is not part of the advertised schema: the LLM
//! never chooses it. The orchestrator supplies it through the call context
//! as the `selected_option` extra, and the tool defensively re-checks that
//! it is present.

use async_trait::async_trait;
use sensei_core::error::ToolError;
use sensei_core::schema::ParameterSchema;
use sensei_core::tool::{Tool, ToolContext, ToolResult};

/// Context extra carrying the learner's previously selected option.
pub const SELECTED_OPTION_EXTRA: &str = "selected_option";

pub struct QuizFeedbackTool;

#[async_trait]
impl Tool for QuizFeedbackTool {
    fn name(&self) -> &str {
        "quiz_feedback"
    }

    fn description(&self) -> &str {
        "Give feedback on the quiz option the learner just picked. Call this after the learner \
         answers; their selection is provided automatically, do not ask for it."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::object([
            (
                "question",
                ParameterSchema::string().description("The quiz question text"),
            ),
            (
                "correct_option",
                ParameterSchema::string().description("The label of the correct option"),
            ),
            (
                "explanation",
                ParameterSchema::string()
                    .description("Why the correct option is correct, in course terms"),
            ),
            (
                "detail",
                ParameterSchema::string()
                    .description("How thorough the feedback should be")
                    .enum_strings(["brief", "standard", "thorough"]),
            ),
        ])
        .required(["question", "correct_option", "explanation"])
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let question = arguments["question"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidInput("Missing 'question' argument".into()))?;
        let correct = arguments["correct_option"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidInput("Missing 'correct_option' argument".into()))?;
        let explanation = arguments["explanation"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidInput("Missing 'explanation' argument".into()))?;
        let detail = arguments["detail"].as_str().unwrap_or("standard");

        let selected = ctx
            .extra(SELECTED_OPTION_EXTRA)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolError::InvalidInput(format!(
                    "call context is missing the '{SELECTED_OPTION_EXTRA}' extra"
                ))
            })?;

        let is_correct = selected == correct;
        let output = feedback_text(question, selected, correct, explanation, is_correct, detail);

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
            data: Some(serde_json::json!({
                "selected": selected,
                "correct": correct,
                "is_correct": is_correct,
            })),
        })
    }
}

fn feedback_text(
    question: &str,
    selected: &str,
    correct: &str,
    explanation: &str,
    is_correct: bool,
    detail: &str,
) -> String {
    let verdict = if is_correct {
        format!("Correct — '{selected}' is the right answer.")
    } else {
        format!("Not quite — you picked '{selected}', but the answer is '{correct}'.")
    };

    match detail {
        "brief" => verdict,
        "thorough" => format!(
            "{verdict}\n\nQuestion: {question}\n\n{explanation}\n\nIf this still feels shaky, \
             try rephrasing the question in your own words before moving on."
        ),
        _ => format!("{verdict}\n\n{explanation}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with_selection(option: &str) -> ToolContext {
        ToolContext::new("learner_1", "session_1")
            .with_extra(SELECTED_OPTION_EXTRA, serde_json::json!(option))
    }

    fn args() -> serde_json::Value {
        serde_json::json!({
            "question": "Which smart pointer provides shared ownership?",
            "correct_option": "Rc<T>",
            "explanation": "Rc<T> keeps a reference count and allows multiple owners.",
        })
    }

    #[test]
    fn tool_definition() {
        let tool = QuizFeedbackTool;
        let def = tool.definition();
        assert_eq!(def.name, "quiz_feedback");
        assert_eq!(
            def.parameters["properties"]["detail"]["enum"],
            serde_json::json!(["brief", "standard", "thorough"])
        );
    }

    #[tokio::test]
    async fn correct_selection() {
        let tool = QuizFeedbackTool;
        let result = tool
            .execute(args(), &ctx_with_selection("Rc<T>"))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("Correct"));
        assert_eq!(result.data.unwrap()["is_correct"], true);
    }

    #[tokio::test]
    async fn incorrect_selection_names_the_answer() {
        let tool = QuizFeedbackTool;
        let result = tool
            .execute(args(), &ctx_with_selection("Box<T>"))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("Box<T>"));
        assert!(result.output.contains("Rc<T>"));
        assert_eq!(result.data.unwrap()["is_correct"], false);
    }

    #[tokio::test]
    async fn detail_levels_change_verbosity() {
        let tool = QuizFeedbackTool;
        let mut brief_args = args();
        brief_args["detail"] = serde_json::json!("brief");
        let brief = tool
            .execute(brief_args, &ctx_with_selection("Rc<T>"))
            .await
            .unwrap();

        let mut thorough_args = args();
        thorough_args["detail"] = serde_json::json!("thorough");
        let thorough = tool
            .execute(thorough_args, &ctx_with_selection("Rc<T>"))
            .await
            .unwrap();

        assert!(brief.output.len() < thorough.output.len());
        assert!(thorough.output.contains("reference count"));
    }

    #[tokio::test]
    async fn missing_selection_extra_is_invalid_input() {
        let tool = QuizFeedbackTool;
        let err = tool
            .execute(args(), &ToolContext::new("learner_1", "session_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(msg) if msg.contains("selected_option")));
    }

    #[tokio::test]
    async fn missing_question_is_invalid_input() {
        let tool = QuizFeedbackTool;
        let err = tool
            .execute(serde_json::json!({}), &ctx_with_selection("A"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
