//! Shared-expense engine.
//!
//! Groups own members and expenses; every expense is allocated across members
//! as splits, and member balances are always derived from that history.

pub use allocation::{AllocationPolicy, EqualRounding, ExplicitSum, Share, SplitMode, allocate};
pub use balances::{MemberBalance, compute_balances};
pub use commands::ExpenseCmd;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseDetail, SplitDetail};
pub use groups::Group;
pub use members::Member;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use splits::Split;

mod allocation;
mod balances;
mod commands;
mod error;
mod expenses;
mod groups;
mod members;
mod money;
mod ops;
mod splits;

type ResultEngine<T> = Result<T, EngineError>;
