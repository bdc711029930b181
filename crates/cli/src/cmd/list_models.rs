use std::process::ExitCode;

use docmeta_core::config::ResolvedConfig;
use docmeta_core::generate::GeminiClient;

pub fn run(rc: &ResolvedConfig) -> ExitCode {
    let models = GeminiClient::new(&rc.generation).and_then(|client| client.list_models());

    match models {
        Ok(models) if models.is_empty() => {
            eprintln!("No models supporting content generation were found.");
            ExitCode::FAILURE
        }
        Ok(models) => {
            for model in models {
                println!("{model}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error listing models: {e}");
            ExitCode::FAILURE
        }
    }
}
