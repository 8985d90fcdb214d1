//! Loading interaction graphs and cluster memberships from disk

pub mod clusters;
pub mod edgelist;
