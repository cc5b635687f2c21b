//! Bus dispatch
//!
//! Splits main/side street state over the boards of the chain.

pub mod chain;
pub mod dispatcher;

pub use chain::{ChainConfig, RoleFlags, MAX_CHAIN_LEN};
pub use dispatcher::{
    plan, BusDispatcher, BusWrite, DispatchError, DispatchPlan, DispatchReport,
};
