//! Expression evaluation over tuples.
//!
//! [`Evaluator`] decides WHERE-style conditions and computes arithmetic for a
//! single [`Tuple`] of named values, without any table or storage behind it.

mod error;
mod evaluator;
mod tuple;

pub use error::EvalError;
pub use evaluator::Evaluator;
pub use tuple::{Tuple, Value};
