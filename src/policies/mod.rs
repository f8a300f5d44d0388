mod kl_ucb;
mod policy;
mod ucb;

pub use kl_ucb::KlUcb;
pub use policy::{CloneBoxedIndexPolicy, IndexPolicy, PolicyType};
pub use ucb::Ucb1;
