//! Backends command.

use anyhow::Result;
use inverter_ops::backend::{self, Backend};

/// Run the backends command.
pub fn run() -> Result<()> {
    print!("{}", backend::describe_backends());
    println!("auto resolves to: {}", Backend::Auto.resolve()?.name());
    Ok(())
}
