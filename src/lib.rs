// Core modules
pub mod cli;      // argument classification and dispatch
pub mod classify; // candidate-path scan over residual arguments
pub mod lookup;   // snapshot query client (external lookup tool)
pub mod snapshot; // snapshot executor (unprivileged probe + escalated retry)
pub mod grant;    // one-shot --give-priv flow
pub mod privilege; // escalation program discovery
pub mod exec;     // target hand-off and exit-status forwarding

// Support modules
pub mod consts;
pub mod deps;

// Convenience re-exports
pub use cli::run;
