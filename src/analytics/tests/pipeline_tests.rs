//! Unit tests for retry orchestration.

use crate::analytics::adapters::memory::{ScriptedLanguageModel, ScriptedWarehouse};
use crate::analytics::domain::{QueryRequest, ResultSet, SchemaDescriptor, TableId};
use crate::analytics::ports::{MockLanguageModel, MockWarehouse, WarehouseError};
use crate::analytics::services::{AnswerPipeline, FALLBACK_ANSWER, SUMMARY_FAILURE_ANSWER};
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

const MODEL_NAME: &str = "gemini-pro";

#[fixture]
fn request() -> QueryRequest {
    let table_id = TableId::products("demo-project").expect("valid table id");
    QueryRequest::new(
        "What is total revenue this year?",
        Vec::new(),
        SchemaDescriptor::products(),
        table_id,
    )
    .expect("valid request")
}

fn revenue_results() -> ResultSet {
    ResultSet::new(vec!["revenue".to_owned()], vec![vec![json!(10250.5)]])
        .expect("valid result set")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn both_stages_are_bounded_by_the_budget(request: QueryRequest) {
    let mut model = MockLanguageModel::new();
    model
        .expect_generate()
        .times(3)
        .returning(|_| Ok("SELECT 1".to_owned()));

    let mut warehouse = MockWarehouse::new();
    warehouse
        .expect_run_query()
        .times(3)
        .returning(|_| Err(WarehouseError::InvalidQuery("no such column".to_owned())));

    let pipeline = AnswerPipeline::new(Arc::new(model), Arc::new(warehouse), MODEL_NAME)
        .with_max_attempts(3);

    let answer = pipeline.answer(request).await;

    assert!(!answer.succeeded());
    assert_eq!(answer.text(), FALLBACK_ANSWER);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn synthesis_failures_skip_execution_but_spend_the_budget(request: QueryRequest) {
    let mut model = MockLanguageModel::new();
    model
        .expect_generate()
        .times(2)
        .returning(|_| Err(crate::analytics::ports::ModelUnavailable("quota".to_owned())));

    let mut warehouse = MockWarehouse::new();
    warehouse.expect_run_query().times(0);

    let pipeline = AnswerPipeline::new(Arc::new(model), Arc::new(warehouse), MODEL_NAME)
        .with_max_attempts(2);

    let answer = pipeline.answer(request).await;

    assert!(!answer.succeeded());
    assert_eq!(answer.text(), FALLBACK_ANSWER);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn success_invokes_the_summarizer_exactly_once(request: QueryRequest) {
    let model = ScriptedLanguageModel::new();
    model.enqueue_reply("```sql\nSELECT SUM(subtotal_sold) AS revenue FROM t\n```");
    model.enqueue_reply("Total revenue this year is $10,250.50.");

    let warehouse = ScriptedWarehouse::new();
    warehouse.enqueue_results(revenue_results());

    let pipeline =
        AnswerPipeline::new(Arc::new(model.clone()), Arc::new(warehouse.clone()), MODEL_NAME);

    let answer = pipeline.answer(request).await;

    assert!(answer.succeeded());
    assert_eq!(answer.text(), "Total revenue this year is $10,250.50.");
    assert_eq!(model.call_count(), 2);
    assert_eq!(warehouse.call_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarization_failure_is_terminal_and_never_reruns_the_query(request: QueryRequest) {
    let model = ScriptedLanguageModel::new();
    model.enqueue_reply("SELECT SUM(subtotal_sold) AS revenue FROM t");
    model.enqueue_error("model overloaded");

    let warehouse = ScriptedWarehouse::new();
    warehouse.enqueue_results(revenue_results());

    let pipeline =
        AnswerPipeline::new(Arc::new(model.clone()), Arc::new(warehouse.clone()), MODEL_NAME);

    let answer = pipeline.answer(request).await;

    assert!(!answer.succeeded());
    assert_eq!(answer.text(), SUMMARY_FAILURE_ANSWER);
    assert_eq!(warehouse.call_count(), 1);
    assert_eq!(model.call_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn executor_receives_sanitized_query_text(request: QueryRequest) {
    let model = ScriptedLanguageModel::new();
    model.enqueue_reply("```sql\nSELECT title FROM products\n```");
    model.enqueue_reply("Here are your products.");

    let warehouse = ScriptedWarehouse::new();
    warehouse.enqueue_results(revenue_results());

    let pipeline =
        AnswerPipeline::new(Arc::new(model.clone()), Arc::new(warehouse.clone()), MODEL_NAME);

    let answer = pipeline.answer(request).await;

    assert!(answer.succeeded());
    let received = warehouse.received();
    assert_eq!(
        received.first().map(String::as_str),
        Some("SELECT title FROM products")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_model_call_names_the_configured_model(request: QueryRequest) {
    let model = ScriptedLanguageModel::new();
    model.enqueue_reply("SELECT 1");
    model.enqueue_reply("One.");

    let warehouse = ScriptedWarehouse::new();
    warehouse.enqueue_results(revenue_results());

    let pipeline =
        AnswerPipeline::new(Arc::new(model.clone()), Arc::new(warehouse), MODEL_NAME);

    let answer = pipeline.answer(request).await;

    assert!(answer.succeeded());
    assert!(
        model
            .requests()
            .iter()
            .all(|request| request.model() == MODEL_NAME)
    );
}
