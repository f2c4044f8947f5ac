//! Processed-set command implementation.

use crate::cli::{ProcessedAction, ProcessedArgs};
use crate::config::ConcallConfig;
use crate::error::Result;
use crate::output::Formatter;
use concall_store::ProcessedSetStore;

/// Execute the processed command.
pub fn execute_processed(
    args: ProcessedArgs,
    config: &ConcallConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut store = ProcessedSetStore::open(&config.store.processed_file)?;

    match args.action {
        ProcessedAction::List => {
            let subjects: Vec<&str> = store.iter().collect();
            println!("{}", formatter.format_subjects(&subjects)?);
        }
        ProcessedAction::Forget { subject } => {
            println!("{}", forget_message(&mut store, &subject, formatter)?);
        }
    }

    Ok(())
}

fn forget_message(
    store: &mut ProcessedSetStore,
    subject: &str,
    formatter: &Formatter,
) -> Result<String> {
    if store.forget(subject)? {
        Ok(formatter.success(&format!(
            "Forgot '{}'; it will be processed on the next run",
            subject
        )))
    } else {
        Ok(formatter.warning(&format!("'{}' is not in the processed set", subject)))
    }
}
