//! LayerEdge light-node bot: registers wallets under a referral code and
//! keeps their light-node sessions cycling (status, stop-and-claim, start,
//! points) on a rotating schedule.

pub mod api;
pub mod config;
pub mod proxy;
pub mod register;
pub mod scheduler;
pub mod session;
