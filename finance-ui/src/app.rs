use std::io::{BufRead, Write};

use anyhow::Result;
use finance_core::StoreRegistry;
use finance_core::store::MemoryStoreFactory;
use finance_store_sqlite::SqliteStoreFactory;
use tracing::{debug, error, warn};

use crate::session::{Command, Response, Session};

const PROMPT: &str = "> ";

/// Build the store registry with every backend compiled into this binary.
///
/// Add new backends here as additional `registry.register(...)` calls.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Reads commands from `input` until end of input or `quit`, writing the
/// screen, alerts and prompts to `output`.
///
/// A storage failure is reported and the loop keeps going; the screen
/// stays usable.
pub async fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{session}")?;

    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!(input = line.trim(), error = %e, "rejected command");
                writeln!(output, "{e}")?;
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Response::Quit) => break,
            Ok(Response::Alert(alert)) => writeln!(output, "{alert}")?,
            Ok(Response::Text(text)) => writeln!(output, "{text}")?,
            Err(e) => {
                error!(error = %e, "storage failure");
                writeln!(output, "Error Alert: {e}")?;
            }
        }
    }

    Ok(())
}
