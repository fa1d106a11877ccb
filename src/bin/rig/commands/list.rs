//! `rig list` command

use anyhow::Result;

use crate::cli::ListArgs;
use rigging::MiddlewareRegistry;

pub fn execute(args: ListArgs) -> Result<()> {
    let registry = MiddlewareRegistry::with_builtins();

    let width = registry.names().map(str::len).max().unwrap_or(0);
    for middleware in registry.all() {
        if args.quiet || middleware.description().is_empty() {
            println!("{}", middleware.name());
        } else {
            println!(
                "{:width$}  {}",
                middleware.name(),
                middleware.description(),
                width = width
            );
        }
    }

    Ok(())
}
