//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::ConcallConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use concall_domain::traits::EntrySource;
use concall_domain::Entry;
use concall_extractor::Extractor;
use concall_llm::ChatCompletionProvider;
use concall_pipeline::{default_target_date, filter_by_date, JsonEntrySource, Pipeline};
use concall_report::{HttpSink, ReportWriter};
use concall_resolver::ContentResolver;
use concall_store::ProcessedSetStore;
use tracing::{info, warn};

/// Execute the run command.
pub async fn execute_run(
    args: RunArgs,
    config: &ConcallConfig,
    formatter: &Formatter,
) -> Result<()> {
    config.validate()?;
    let api_key = config.resolve_api_key(args.api_key.as_deref())?;

    let entries = select_entries(&args)?;
    if entries.is_empty() {
        println!("{}", formatter.info("No entries to process"));
        return Ok(());
    }

    let provider = ChatCompletionProvider::new(
        &config.llm.endpoint,
        &config.llm.model,
        api_key,
        config.extraction.request_timeout(),
    )?
    .with_temperature(config.llm.temperature);

    let sink = HttpSink::new(config.sink.endpoint.clone(), config.sink.timeout())?;
    if config.sink.endpoint.is_none() {
        info!("No sink endpoint configured; records are kept locally only");
    }

    let mut pipeline = Pipeline::new(
        ContentResolver::from_config(&config.resolver)?,
        Extractor::new(provider, config.extraction.clone())?,
        ProcessedSetStore::open(&config.store.processed_file)?,
        ReportWriter::new(&config.report.output_dir),
        sink,
        config.pipeline.clone(),
    );

    // Every commit is durable on its own, so dropping the run mid-entry
    // leaves that subject for the next run.
    let summary = tokio::select! {
        summary = pipeline.run(&entries) => summary,
        _ = tokio::signal::ctrl_c() => {
            warn!("Shutdown signal received, stopping run");
            return Err(CliError::Interrupted);
        }
    };

    info!("{}", summary.summary());
    println!("{}", formatter.format_summary(&summary)?);
    if let Some(notice) = formatter.failure_notice(&summary) {
        eprintln!("{}", notice);
    }
    Ok(())
}

/// Discover entries and keep those for the requested date.
fn select_entries(args: &RunArgs) -> Result<Vec<Entry>> {
    let entries = JsonEntrySource::new(&args.entries).discover()?;

    if args.all_dates {
        return Ok(entries);
    }

    let target = args.date.clone().unwrap_or_else(default_target_date);
    let discovered = entries.len();
    let selected = filter_by_date(entries, &target);
    info!(
        "{} of {} entries published on {}",
        selected.len(),
        discovered,
        target
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn args_for(entries: PathBuf, date: Option<&str>, all_dates: bool) -> RunArgs {
        RunArgs {
            entries,
            date: date.map(str::to_string),
            all_dates,
            api_key: None,
        }
    }

    fn write_entries(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("entries.json");
        fs::write(
            &path,
            r#"[
                {"companyName": "AcmeCorp", "link": "https://youtu.be/dQw4w9WgXcQ", "date": "15 March 2024"},
                {"companyName": "Globex", "link": "https://example.com/q3.pdf", "date": "14 March 2024"}
            ]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_select_entries_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entries(dir.path());

        let selected = select_entries(&args_for(path, Some("15 March 2024"), false)).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].subject_id, "AcmeCorp");
    }

    #[test]
    fn test_select_all_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entries(dir.path());

        let selected = select_entries(&args_for(path, None, true)).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_missing_entries_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = select_entries(&args_for(dir.path().join("absent.json"), None, true));
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }

    #[tokio::test]
    async fn test_run_without_api_key_fails_before_work() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entries(dir.path());
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);

        let result = execute_run(
            args_for(path, None, true),
            &ConcallConfig::default(),
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
