// Local filesystem tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use toolbridge_core::list_directory;

/// Tool to list a directory in `ls -al` form
pub struct ListDirectoryEntriesTool;

#[derive(Debug, Deserialize)]
struct ListDirectoryArgs {
    #[serde(default)]
    path: String,
}

#[async_trait::async_trait]
impl Tool for ListDirectoryEntriesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_directory_entries".to_string(),
            description: "List all entries of a directory like `ls -al`: mode, links, owner, group, size, modification time and name. Symlinks are not followed".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "path": json_schema_string("Absolute or relative path of the directory to list")
                }),
                vec!["path"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListDirectoryArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for list_directory_entries")?;

        if args.path.trim().is_empty() {
            return Ok(CallToolResult::lines(vec![
                "[ERROR] path must not be empty".to_string(),
            ]));
        }

        tracing::debug!(path = %args.path, "Listing directory");
        let lines = tokio::task::spawn_blocking(move || list_directory(&args.path))
            .await
            .context("Directory listing task failed")?;

        Ok(CallToolResult::lines(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use std::fs;
    use tempfile::TempDir;

    fn texts(result: &CallToolResult) -> Vec<&str> {
        result
            .content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_one_block_per_entry() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let result = ListDirectoryEntriesTool
            .execute(serde_json::json!({"path": dir.path().to_str().unwrap()}))
            .await
            .unwrap();
        let lines = texts(&result);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(" ."));
        assert!(lines[1].ends_with(" .."));
        let file_line = lines.iter().find(|l| l.ends_with(" a.txt")).unwrap();
        assert!(file_line.starts_with("-rw"));
        assert!(file_line.contains("       5 "));
        assert!(lines.iter().any(|l| l.starts_with('d') && l.ends_with(" sub")));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = ListDirectoryEntriesTool
            .execute(serde_json::json!({"path": missing.to_str().unwrap()}))
            .await
            .unwrap();
        let lines = texts(&result);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[ERROR]"));
    }

    #[tokio::test]
    async fn test_empty_path() {
        let result = ListDirectoryEntriesTool
            .execute(serde_json::json!({"path": ""}))
            .await
            .unwrap();

        assert_eq!(texts(&result), vec!["[ERROR] path must not be empty"]);
    }
}
