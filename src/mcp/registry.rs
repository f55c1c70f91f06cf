//! Flat tool registry.
//!
//! Each domain contributes a [`ToolSet`] of entries. An entry couples the
//! advertised descriptor (name, description, input schema) with its handler,
//! so a descriptor can never exist without a handler or vice versa. The
//! registry merges all sets into one `name → entry` map and refuses to build
//! when two entries share a name.
//!
//! The input schema is generated from the handler's parameter record. Serde
//! defaults on that record (`#[serde(default = "...")]`) appear as `default`
//! in the schema and are applied when the raw arguments are parsed, so each
//! default is declared exactly once.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use rmcp::model::{JsonObject, Tool};
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;
use crate::gitlab::GitLabClient;

/// Future returned by every tool handler.
pub type ToolFuture = BoxFuture<'static, Result<Value, AppError>>;

type Handler = Arc<dyn Fn(Arc<GitLabClient>, JsonObject) -> ToolFuture + Send + Sync>;

/// A tool descriptor paired with the handler that serves it.
#[derive(Clone)]
pub struct ToolEntry {
    descriptor: Tool,
    handler: Handler,
}

impl ToolEntry {
    /// Create an entry whose schema and argument parsing both come from `P`.
    pub fn new<P, F, Fut>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(Arc<GitLabClient>, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, AppError>> + Send + 'static,
    {
        let handler: Handler = Arc::new(
            move |client: Arc<GitLabClient>, arguments: JsonObject| -> ToolFuture {
                match parse_arguments::<P>(name, arguments) {
                    Ok(params) => handler(client, params).boxed(),
                    Err(err) => future::ready(Err(err)).boxed(),
                }
            },
        );

        Self {
            descriptor: Tool::new(name, description, input_schema::<P>()),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &Tool {
        &self.descriptor
    }

    /// Parse `arguments` into the parameter record and run the handler.
    pub fn call(&self, client: Arc<GitLabClient>, arguments: JsonObject) -> ToolFuture {
        (self.handler)(client, arguments)
    }
}

/// The tools contributed by one domain.
pub struct ToolSet {
    pub domain: &'static str,
    pub tools: Vec<ToolEntry>,
}

impl ToolSet {
    pub fn new(domain: &'static str, tools: Vec<ToolEntry>) -> Self {
        Self { domain, tools }
    }

    /// Names declared by this domain, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolEntry::name).collect()
    }
}

/// Every registered tool, addressable by name.
pub struct ToolRegistry {
    entries: Vec<(&'static str, ToolEntry)>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Merge tool sets in order. Fails on the first duplicated name.
    pub fn build(sets: impl IntoIterator<Item = ToolSet>) -> Result<Self, AppError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for set in sets {
            for entry in set.tools {
                let name = entry.name().to_string();
                if index.contains_key(&name) {
                    return Err(AppError::DuplicateTool(name));
                }
                index.insert(name, entries.len());
                entries.push((set.domain, entry));
            }
        }

        tracing::debug!(count = entries.len(), "Built tool registry");
        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Domain that registered `name`.
    pub fn domain_of(&self, name: &str) -> Option<&'static str> {
        self.index.get(name).map(|&i| self.entries[i].0)
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .map(|(_, entry)| entry.descriptor().clone())
            .collect()
    }

    /// Look up `name` and run it. Missing arguments count as an empty object.
    pub async fn dispatch(
        &self,
        client: Arc<GitLabClient>,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<Value, AppError> {
        let entry = self
            .get(name)
            .ok_or_else(|| AppError::UnknownTool(name.to_string()))?;
        entry.call(client, arguments.unwrap_or_default()).await
    }
}

fn parse_arguments<P: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<P, AppError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| AppError::InvalidParams {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// JSON Schema for `P`, shaped as an MCP `inputSchema` object.
fn input_schema<P: JsonSchema>() -> JsonObject {
    let mut schema = match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    schema.remove("$schema");
    schema.remove("title");
    schema
        .entry("type")
        .or_insert_with(|| Value::String("object".to_string()));
    schema
}
