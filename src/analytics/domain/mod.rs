//! Domain types for the question-answering pipeline.

mod answer;
mod conversation;
mod error;
mod ids;
mod outcome;
mod query;
mod request;
mod retry;
mod schema;

pub use answer::AnswerResult;
pub use conversation::{ConversationTurn, Role};
pub use error::AnalyticsDomainError;
pub use ids::InvocationId;
pub use outcome::{ExecutionOutcome, ResultSet};
pub use query::{CandidateQuery, format_sql, strip_code_fences};
pub use request::{QueryRequest, TableId};
pub use retry::RetryState;
pub use schema::{Column, ColumnType, ParseColumnTypeError, SchemaDescriptor};
