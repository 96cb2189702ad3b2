use basketry_core::config::LoadOptions;
use serde::Serialize;

use super::{build_index, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct TripleLine {
    products: Vec<String>,
    frequency: u64,
}

#[derive(Debug, Serialize)]
struct TripleReport {
    total: usize,
    shown: usize,
    triples: Vec<TripleLine>,
}

pub fn run(options: LoadOptions, limit: Option<usize>) -> CommandResult {
    let config = match load_config(options) {
        Ok(config) => config,
        Err((error_class, message)) => {
            return CommandResult::failure("triples", &error_class, message, 1)
        }
    };

    let index = match build_index(&config) {
        Ok(index) => index,
        Err((error_class, message)) => {
            return CommandResult::failure("triples", &error_class, message, 1)
        }
    };

    let all = index.all_triples();
    let shown = match limit {
        Some(limit) => &all[..limit.min(all.len())],
        None => all,
    };

    let triples: Vec<TripleLine> = shown
        .iter()
        .map(|frequency| TripleLine {
            products: frequency
                .triple
                .products()
                .iter()
                .map(|product| product.name.clone())
                .collect(),
            frequency: frequency.count,
        })
        .collect();

    CommandResult::success(
        "triples",
        format!("{} of {} indexed triples", triples.len(), all.len()),
        TripleReport { total: all.len(), shown: triples.len(), triples },
    )
}
