//! Tool trait — the abstraction over tutoring-agent capabilities.
//!
//! Tools are what let the agent act beyond plain conversation: search the
//! learner's study history, record insights, explain quiz answers, etc.
//! The registry advertises tool definitions to the LLM and dispatches the
//! tool calls it produces.

use crate::error::ToolError;
use crate::schema::ParameterSchema;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ambient, call-scoped data supplied by the orchestrator.
///
/// Carries who is calling and in which session, plus tool-specific extras
/// a tool declares it needs (e.g. the quiz option the learner just picked).
/// Extras are never part of the advertised parameter schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContext {
    /// The learner this call acts on behalf of.
    pub user_id: String,

    /// The conversation session the call belongs to.
    pub session_id: String,

    /// Tool-specific ambient fields.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extras: HashMap<String, serde_json::Value>,
}

impl ToolContext {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            extras: HashMap::new(),
        }
    }

    /// Attach a tool-specific ambient field.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    /// Look up a tool-specific ambient field.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extras.get(key)
    }
}

/// A request to execute a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result is for
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// The output content
    pub output: String,

    /// Optional structured data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A tool definition sent to the LLM so it knows what tools it can call.
///
/// Always derived from a [`Tool`] via [`Tool::definition`], never
/// hand-constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// The core Tool trait.
///
/// Each tool (memory_search, study_note, quiz_feedback, ...) implements
/// this trait. Tools are registered in the ToolRegistry and made available
/// to the agent loop. Implementations must be effectively stateless: all
/// per-call state comes from `arguments` and `ctx`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "memory_search"). Non-empty.
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM). Non-empty.
    fn description(&self) -> &str;

    /// The schema describing this tool's parameters. Always object-kind,
    /// possibly with zero properties.
    fn parameters(&self) -> ParameterSchema;

    /// Execute the tool with the given arguments and call context.
    ///
    /// `arguments` has already been validated against [`Tool::parameters`]
    /// by the registry; tools should still fail with
    /// [`ToolError::InvalidInput`] if they detect inconsistency in their
    /// own ambient preconditions.
    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> std::result::Result<ToolResult, ToolError>;

    /// Project this tool into a ToolDefinition for sending to the LLM.
    ///
    /// A pure, repeatable projection of the identity fields — calling it
    /// twice yields structurally equal values.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().to_value(),
        }
    }
}

/// A registry of available tools.
///
/// The agent loop uses this to:
/// 1. Get tool definitions to send to the LLM
/// 2. Look up and execute tools when the LLM requests them
///
/// Populated once at startup; read-only in steady state. Registration after
/// startup is a rare administrative operation and takes `&mut self`, so
/// concurrent readers can never observe a partially-updated entry.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    /// First-registration order of the names in `tools`.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name
    /// (last write wins); the replaced tool keeps its original position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "replacing previously registered tool");
        } else {
            self.order.push(name);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All registered tools, in first-registration order.
    pub fn list(&self) -> Vec<&dyn Tool> {
        self.order
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// All registered tool names, in first-registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Get all tool definitions (the capability payload sent to the LLM),
    /// in first-registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list().iter().map(|t| t.definition()).collect()
    }

    /// Execute a tool by name.
    ///
    /// Fails with [`ToolError::UnknownTool`] if no tool is registered under
    /// `name`, and with [`ToolError::InvalidInput`] if `arguments` does not
    /// conform to the tool's parameter schema. Tool failures propagate
    /// unchanged — no retry, no swallowing.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> std::result::Result<ToolResult, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        if let Err(violations) = tool.parameters().validate_value(&arguments) {
            let summary = violations
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ToolError::InvalidInput(summary));
        }

        debug!(tool = %name, session = %ctx.session_id, "dispatching tool call");
        tool.execute(arguments, ctx).await
    }

    /// Execute a tool call produced by the LLM.
    ///
    /// Same semantics as [`ToolRegistry::execute`], with the call's ID
    /// stamped onto the result so the orchestrator can pair it back up
    /// with the LLM's tool_call.id.
    pub async fn execute_call(
        &self,
        call: &ToolCall,
        ctx: &ToolContext,
    ) -> std::result::Result<ToolResult, ToolError> {
        let mut result = self.execute(&call.name, call.arguments.clone(), ctx).await?;
        result.call_id = call.id.clone();
        Ok(result)
    }

    /// Number of registered tools (distinct names).
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
