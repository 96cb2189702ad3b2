use basketry_core::config::LoadOptions;
use basketry_core::{ProductId, SuggestionEntry};
use serde::Serialize;

use super::{build_index, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct SuggestReport {
    product: String,
    matched_by: &'static str,
    suggestions: Vec<SuggestionEntry>,
}

pub fn run(
    options: LoadOptions,
    product: &str,
    by_id: bool,
    limit: Option<usize>,
) -> CommandResult {
    let config = match load_config(options) {
        Ok(config) => config,
        Err((error_class, message)) => {
            return CommandResult::failure("suggest", &error_class, message, 1)
        }
    };

    let index = match build_index(&config) {
        Ok(index) => index,
        Err((error_class, message)) => {
            return CommandResult::failure("suggest", &error_class, message, 1)
        }
    };

    let mut suggestions = if by_id {
        index.suggest_by_id(&ProductId(product.to_string()))
    } else {
        index.suggest(product)
    };

    let cap = limit.unwrap_or(config.suggestions.max_results);
    if cap > 0 {
        suggestions.truncate(cap);
    }

    let message = if suggestions.is_empty() {
        format!("no cross-selling suggestions found for `{product}`")
    } else {
        format!("{} cross-sell suggestions for `{product}`", suggestions.len())
    };

    CommandResult::success(
        "suggest",
        message,
        SuggestReport {
            product: product.to_string(),
            matched_by: if by_id { "product_id" } else { "product_name" },
            suggestions,
        },
    )
}
