//! Unit tests for prompt rendering.

use crate::analytics::domain::{
    ConversationTurn, QueryRequest, ResultSet, SchemaDescriptor, TableId,
};
use crate::analytics::services::prompts::{render_summary_prompt, render_synthesis_prompt};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn request() -> QueryRequest {
    let table_id = TableId::products("demo-project").expect("valid table id");
    QueryRequest::new(
        "What is total revenue this year?",
        vec![
            ConversationTurn::user("How many products do we have?"),
            ConversationTurn::assistant("You have 240 products."),
        ],
        SchemaDescriptor::products(),
        table_id,
    )
    .expect("valid request")
}

#[rstest]
fn synthesis_prompt_grounds_the_model(request: QueryRequest) {
    let prompt = render_synthesis_prompt(&request).expect("prompt should render");

    assert!(prompt.contains("demo-project.shopify_ai.shopify_products"));
    assert!(prompt.contains("- product_id (INT64)"));
    assert!(prompt.contains("- product_total_tax (FLOAT64)"));
    assert!(prompt.contains("Question: What is total revenue this year?"));
    assert!(prompt.contains("follow-up message"));
}

#[rstest]
fn synthesis_prompt_carries_prior_conversation(request: QueryRequest) {
    let prompt = render_synthesis_prompt(&request).expect("prompt should render");

    assert!(prompt.contains("Prior conversation:"));
    assert!(prompt.contains("user: How many products do we have?"));
    assert!(prompt.contains("assistant: You have 240 products."));
}

#[rstest]
fn synthesis_prompt_omits_empty_history() {
    let table_id = TableId::products("demo-project").expect("valid table id");
    let bare = QueryRequest::new(
        "What is total revenue this year?",
        Vec::new(),
        SchemaDescriptor::products(),
        table_id,
    )
    .expect("valid request");

    let prompt = render_synthesis_prompt(&bare).expect("prompt should render");
    assert!(!prompt.contains("Prior conversation:"));
}

#[rstest]
fn summary_prompt_embeds_query_and_evidence() {
    let results = ResultSet::new(
        vec!["revenue".to_owned()],
        vec![vec![json!(10250.5)]],
    )
    .expect("valid result set");

    let prompt = render_summary_prompt(
        "What is total revenue this year?",
        "SELECT SUM(subtotal_sold)\nFROM products",
        &results,
    )
    .expect("prompt should render");

    assert!(prompt.contains("SELECT SUM(subtotal_sold)\nFROM products"));
    assert!(prompt.contains("| revenue |"));
    assert!(prompt.contains("10250.5"));
    assert!(prompt.contains("1 row(s)"));
    assert!(prompt.contains("only the evidence"));
}
