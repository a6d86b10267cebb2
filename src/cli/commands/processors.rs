//! processors command - List the available tag processors

use crate::version::ProcessorRegistry;
use anyhow::Result;

/// Print registered processors, highest precedence (the default) first.
pub fn processors() -> Result<()> {
    let registry = ProcessorRegistry::default();
    for line in listing(&registry) {
        println!("{}", line);
    }
    Ok(())
}

fn listing(registry: &ProcessorRegistry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                format!("{} (default)", name)
            } else {
                name.to_string()
            }
        })
        .collect()
}
