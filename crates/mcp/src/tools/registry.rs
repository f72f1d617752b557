// MCP tool trait, registry and schema helpers

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Failures the caller should read belong in the returned `CallToolResult`.
    /// An `Err` is still turned into `Error:` text by the registry.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name. `None` if no such tool is registered.
    pub async fn call(&self, name: &str, arguments: serde_json::Value) -> Option<CallToolResult> {
        let tool = self.get(name)?;
        let result = match tool.execute(arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool execution failed");
                CallToolResult::error(format!("{:#}", e))
            }
        };
        Some(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

/// Schema for a tool that takes no arguments
pub fn json_schema_empty() -> serde_json::Value {
    json_schema_object(serde_json::json!({}), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".to_string(),
                description: "Echo the input".to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({"text": json_schema_string("Text to echo")}),
                    vec!["text"],
                ),
            }
        }

        async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
            let text = arguments
                .get("text")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow::anyhow!("text is required"))?;
            Ok(CallToolResult::text(text))
        }
    }

    struct NoopTool(&'static str);

    #[async_trait::async_trait]
    impl Tool for NoopTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.0.to_string(),
                description: String::new(),
                input_schema: json_schema_empty(),
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(""))
        }
    }

    #[tokio::test]
    async fn test_call_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry
            .call("echo", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(result.joined_text(), "hi");
        assert!(result.is_error.is_none());

        assert!(registry.call("missing", serde_json::json!({})).await.is_none());
    }

    #[tokio::test]
    async fn test_call_turns_errors_into_text() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry.call("echo", serde_json::json!({})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.joined_text(), "Error: text is required");
    }

    #[test]
    fn test_schemas_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NoopTool("zeta")));
        registry.register(Arc::new(NoopTool("alpha")));
        registry.register(Arc::new(EchoTool));

        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "echo", "zeta"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("echo"));
    }
}
