//! Unit tests for analytics domain types.

use crate::analytics::domain::{
    AnalyticsDomainError, AnswerResult, Column, ColumnType, ConversationTurn, QueryRequest,
    ResultSet, RetryState, SchemaDescriptor, TableId, format_sql, strip_code_fences,
};
use rstest::rstest;
use serde_json::json;

fn two_column_schema() -> SchemaDescriptor {
    let columns = vec![
        Column::new("title", ColumnType::String).expect("valid column"),
        Column::new("subtotal_sold", ColumnType::Float64).expect("valid column"),
    ];
    SchemaDescriptor::new(columns).expect("valid schema")
}

#[rstest]
fn products_schema_lists_all_fourteen_columns() {
    let schema = SchemaDescriptor::products();
    assert_eq!(schema.columns().len(), 14);
    let first = schema.columns().first().expect("first column");
    assert_eq!(first.name(), "product_id");
    assert_eq!(first.column_type(), ColumnType::Int64);
    let last = schema.columns().last().expect("last column");
    assert_eq!(last.name(), "product_total_tax");
    assert_eq!(last.column_type(), ColumnType::Float64);
}

#[rstest]
fn empty_schema_is_rejected() {
    assert_eq!(
        SchemaDescriptor::new(Vec::new()),
        Err(AnalyticsDomainError::EmptySchema)
    );
}

#[rstest]
fn duplicate_column_names_are_rejected() {
    let columns = vec![
        Column::new("title", ColumnType::String).expect("valid column"),
        Column::new("title", ColumnType::Int64).expect("valid column"),
    ];
    assert_eq!(
        SchemaDescriptor::new(columns),
        Err(AnalyticsDomainError::DuplicateColumn("title".to_owned()))
    );
}

#[rstest]
#[case("INT64", ColumnType::Int64)]
#[case("string", ColumnType::String)]
#[case(" timestamp ", ColumnType::Timestamp)]
#[case("BOOL", ColumnType::Bool)]
#[case("Float64", ColumnType::Float64)]
fn column_types_parse_from_warehouse_spelling(#[case] input: &str, #[case] expected: ColumnType) {
    assert_eq!(ColumnType::try_from(input), Ok(expected));
}

#[rstest]
fn unknown_column_type_is_rejected() {
    assert!(ColumnType::try_from("GEOGRAPHY").is_err());
}

#[rstest]
fn table_id_renders_fully_qualified() {
    let table_id = TableId::products("demo-project").expect("valid table id");
    assert_eq!(table_id.to_string(), "demo-project.shopify_ai.shopify_products");
}

#[rstest]
fn blank_project_is_rejected() {
    assert_eq!(
        TableId::products("  "),
        Err(AnalyticsDomainError::EmptyTableIdSegment("project"))
    );
}

#[rstest]
fn empty_question_is_rejected() {
    let table_id = TableId::products("demo-project").expect("valid table id");
    let request = QueryRequest::new("   ", Vec::new(), two_column_schema(), table_id);
    assert_eq!(request, Err(AnalyticsDomainError::EmptyQuestion));
}

#[rstest]
fn question_is_trimmed() {
    let table_id = TableId::products("demo-project").expect("valid table id");
    let request = QueryRequest::new(
        "  How many products?  ",
        vec![ConversationTurn::user("hello")],
        two_column_schema(),
        table_id,
    )
    .expect("valid request");
    assert_eq!(request.question(), "How many products?");
    assert_eq!(request.history().len(), 1);
}

#[rstest]
#[case("```sql\nSELECT 1\n```", "SELECT 1")]
#[case("```\nSELECT 1\n```", "SELECT 1")]
#[case("```SELECT 1```", "SELECT 1")]
#[case("  SELECT 1  ", "SELECT 1")]
fn code_fences_are_stripped(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(strip_code_fences(raw), expected);
}

#[rstest]
fn fence_stripping_is_idempotent() {
    let once = strip_code_fences("```sql\nSELECT title FROM products\n```");
    let twice = strip_code_fences(&once);
    assert_eq!(once, twice);
}

#[rstest]
fn format_sql_uppercases_keywords_and_breaks_clauses() {
    let formatted = format_sql(
        "select title, subtotal_sold from products where status = 'active' order by subtotal_sold desc limit 5",
    );
    assert_eq!(
        formatted,
        "SELECT title, subtotal_sold\nFROM products\nWHERE status = 'active'\nORDER BY subtotal_sold DESC\nLIMIT 5"
    );
}

#[rstest]
fn format_sql_preserves_string_literals() {
    let formatted = format_sql("select title from products where collections = 'From The Vault'");
    assert!(formatted.contains("'From The Vault'"));
    assert!(formatted.starts_with("SELECT title\nFROM products"));
}

#[rstest]
fn format_sql_keeps_join_qualifiers_on_one_line() {
    let formatted = format_sql("select * from a left join b on a.id = b.id");
    assert_eq!(formatted, "SELECT *\nFROM a\nLEFT JOIN b ON a.id = b.id");
}

#[rstest]
fn result_set_rejects_ragged_rows() {
    let result = ResultSet::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![vec![json!(1)]],
    );
    assert_eq!(
        result,
        Err(AnalyticsDomainError::RowWidthMismatch {
            expected: 2,
            actual: 1
        })
    );
}

#[rstest]
fn result_set_renders_markdown() {
    let results = ResultSet::new(
        vec!["title".to_owned(), "sold".to_owned()],
        vec![
            vec![json!("Cozy Red Wool Sweater"), json!(41.0)],
            vec![json!("Sleek | Pipe"), json!(null)],
        ],
    )
    .expect("valid result set");

    let markdown = results.to_markdown();
    assert_eq!(
        markdown,
        "| title | sold |\n| --- | --- |\n| Cozy Red Wool Sweater | 41.0 |\n| Sleek \\| Pipe | null |"
    );
}

#[rstest]
fn retry_state_tracks_budget() {
    let mut retry = RetryState::new(2);
    assert!(!retry.exhausted());
    retry.record_failure("syntax error");
    assert_eq!(retry.attempts_used(), 1);
    assert_eq!(retry.last_error(), Some("syntax error"));
    assert!(!retry.exhausted());
    retry.record_failure("another syntax error");
    assert!(retry.exhausted());
}

#[rstest]
fn zero_budget_is_clamped_to_one() {
    let retry = RetryState::new(0);
    assert_eq!(retry.max_attempts(), 1);
}

#[rstest]
fn answer_result_reports_success() {
    assert!(AnswerResult::answered("42 units").succeeded());
    assert!(!AnswerResult::failed("sorry").succeeded());
}
