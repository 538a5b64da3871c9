//! Execution layer
//!
//! - `operation`: the operations and the command documents they map to
//! - `plan`: the fixed, ordered list of steps
//! - `query`: executes one operation against the collection
//! - `runner`: runs a plan step by step, stopping at the first failure
//! - `session`: connect, run and always disconnect
//! - `result`: what each operation returns

pub mod operation;
pub mod plan;
pub mod query;
pub mod result;
pub mod runner;
pub mod session;


pub use operation::{ExplainVerbosity, Operation};
pub use plan::{Step, book_plan};
pub use query::QueryExecutor;
pub use result::{ExecutionResult, ExecutionStats, ResultData};
pub use runner::BookQueryRunner;
pub use session::{SessionReporter, run_session};
