use basketry_core::config::LoadOptions;

use super::{build_index, load_config, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match load_config(options) {
        Ok(config) => config,
        Err((error_class, message)) => {
            return CommandResult::failure("stats", &error_class, message, 1)
        }
    };

    let index = match build_index(&config) {
        Ok(index) => index,
        Err((error_class, message)) => {
            return CommandResult::failure("stats", &error_class, message, 1)
        }
    };

    let stats = index.stats();
    CommandResult::success(
        "stats",
        format!(
            "{} line items, {} eligible orders, {} distinct triples",
            stats.line_items, stats.eligible_orders, stats.distinct_triples
        ),
        stats,
    )
}
