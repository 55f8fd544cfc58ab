//! Prompt templates for the two language-model calls.

use crate::analytics::domain::{QueryRequest, ResultSet};
use minijinja::Environment;
use serde_json::json;
use thiserror::Error;

/// Template for the query-synthesis call.
///
/// Grounds the model in the table identifier and column list, carries the
/// prior conversation, and tells the model to expect the query results in a
/// follow-up turn.
const SYNTHESIS_TEMPLATE: &str = r"You translate analytics questions about an online store into SQL.

The data lives in the table `{{ table_id }}` with these columns:
{% for column in columns -%}
- {{ column.name }} ({{ column.column_type }})
{% endfor -%}
{% if history -%}
Prior conversation:
{% for turn in history -%}
{{ turn.role }}: {{ turn.text }}
{% endfor -%}
{% endif -%}
Question: {{ question }}

Reply with a single SQL query against the table above that answers the question, and nothing else. The query results will be sent back to you in a follow-up message so you can explain them.";

/// Template for the answer-synthesis call.
const SUMMARY_TEMPLATE: &str = r#"You are answering the question "{{ question }}" for a merchant in a chat window that renders markdown.

This SQL query was run against the sales data:

```sql
{{ formatted_query }}
```

It returned {{ row_count }} row(s):

{{ results_table }}

Answer the question using only the evidence in the table above. Include the query in your response inside a ```sql fenced block, and format the whole response as markdown."#;

/// A prompt template failed to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} prompt: {reason}")]
pub struct PromptError {
    /// Which template failed.
    pub template: &'static str,
    /// Renderer-supplied failure detail.
    pub reason: String,
}

/// Renders the query-synthesis prompt for one request.
pub(crate) fn render_synthesis_prompt(request: &QueryRequest) -> Result<String, PromptError> {
    let context = json!({
        "table_id": request.table_id().to_string(),
        "columns": request.schema().columns(),
        "history": request.history(),
        "question": request.question(),
    });
    render("synthesis", SYNTHESIS_TEMPLATE, &context)
}

/// Renders the answer-synthesis prompt from the executed query and its
/// tabular evidence.
pub(crate) fn render_summary_prompt(
    question: &str,
    formatted_query: &str,
    results: &ResultSet,
) -> Result<String, PromptError> {
    let context = json!({
        "question": question,
        "formatted_query": formatted_query,
        "row_count": results.row_count(),
        "results_table": results.to_markdown(),
    });
    render("summary", SUMMARY_TEMPLATE, &context)
}

fn render(
    name: &'static str,
    template: &str,
    context: &serde_json::Value,
) -> Result<String, PromptError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| PromptError {
            template: name,
            reason: error.to_string(),
        })
}
