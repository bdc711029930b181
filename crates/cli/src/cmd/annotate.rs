//! Annotate command: generate front matter for each file argument.

use std::process::ExitCode;

use docmeta_core::annotate::{AnnotateOptions, Annotator, Outcome};
use docmeta_core::config::ResolvedConfig;
use docmeta_core::generate::GeminiClient;
use tracing::info;

use crate::Cli;

pub fn run(rc: &ResolvedConfig, cli: &Cli) -> ExitCode {
    let client = match GeminiClient::new(&rc.generation) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(model = client.model(), files = cli.files.len(), "annotating");

    let options = AnnotateOptions { ignore_existing: cli.ignore_existing, dry_run: cli.dry_run };
    let annotator = Annotator::new(client, options);

    let summary = annotator.run(&cli.files, |result| match result {
        Ok(report) => {
            let path = report.path.display();
            if let Some(preview) = &report.preview {
                println!("==> {path}");
                print!("{preview}");
                return;
            }
            match report.outcome {
                Outcome::Skipped => {
                    println!("skipped  {path} (already has a description)");
                }
                Outcome::Created => println!("created  {path}"),
                Outcome::Updated => println!("updated  {path}"),
            }
        }
        Err(e) => eprintln!("Error: {e}"),
    });

    println!(
        "{} created, {} updated, {} skipped, {} failed",
        summary.created, summary.updated, summary.skipped, summary.failed
    );

    if summary.has_failures() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
