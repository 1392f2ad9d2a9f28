//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each handler implements the
//! business logic for a specific CLI subcommand.

mod associate;
mod output;

pub use associate::{
    check_settings, read_name_list, run_associate, to_candidate_names, to_source_names, EXIT_UNMATCHED,
};
pub use output::{render_association, write_output, OutputTarget};

pub use crate::config::AssociateConfig;
