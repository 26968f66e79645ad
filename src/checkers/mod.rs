//! Built-in checker families

pub mod context;
pub mod expression;
pub mod lexical;

pub use context::ContextChecker;
pub use expression::ExpressionChecker;
pub use lexical::LexicalChecker;
