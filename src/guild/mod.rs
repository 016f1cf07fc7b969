//! Guild dispatch: supply/demand evaluation and work orders

pub mod dispatcher;

pub use dispatcher::{gather_action_for_key, GuildDispatcher, GuildIssue, EXPLORE_ACTION};
