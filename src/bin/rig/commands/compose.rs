//! `rig build`, `rig start` and `rig test` commands

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::ComposeArgs;
use rigging::core::environment::Command;
use rigging::ops::{compose, ComposeOptions};
use rigging::GlobalContext;

pub fn execute(ctx: &GlobalContext, command: Command, args: ComposeArgs) -> Result<()> {
    let opts = ComposeOptions {
        command,
        preset: args.preset,
        root: args.root,
        mode: args.mode,
        options: args.options.unwrap_or(Value::Null),
    };

    let composition = compose(ctx, opts)?;

    if args.run_list {
        for name in &composition.run_list {
            println!("{}", name);
        }
        return Ok(());
    }

    let json = composition.configuration.to_json();
    let output = if args.compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    }
    .context("failed to serialize configuration")?;
    println!("{}", output);

    Ok(())
}
