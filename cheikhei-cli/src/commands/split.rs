//! Split command implementation

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use cheikhei_core::{CoreError, SentenceSpan, SentenceSplitter, SplitterConfig};

use crate::error::{CliError, CliResult};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Keyword that ends interactive mode
const EXIT_KEYWORD: &str = "quit";

/// Arguments for the split command
#[derive(Debug, Parser)]
#[command(
    name = "cheikhei",
    about = "Split Meitei Mayek text into sentences",
    version
)]
pub struct SplitArgs {
    /// Path to the trained model directory
    #[arg(short, long, value_name = "DIR", default_value = "./output/model-best")]
    pub model: PathBuf,

    /// Path to the SentencePiece .model file
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        default_value = "meitei_tokenizer.model"
    )]
    pub tokenizer: PathBuf,

    /// Text to split into sentences
    #[arg(short, long)]
    pub text: Option<String>,

    /// Run in interactive mode (reads lines until 'quit')
    #[arg(short, long)]
    pub interactive: bool,

    /// Override the boundary probability threshold
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Enumerated sentence list
    Text,
    /// JSON array of sentences with offsets
    Json,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();

        if self.text.is_none() && !self.interactive {
            bail!("nothing to do: pass --text or --interactive");
        }

        let config = self.build_config()?;

        // The CLI loads synchronously before running any command, so there
        // is no window in which a request can observe an unloaded model.
        if !self.quiet {
            println!("Loading model...");
        }
        let splitter = SentenceSplitter::from_artifacts(&config)
            .map_err(|e| match e {
                CoreError::ArtifactNotFound(path) => {
                    CliError::ArtifactNotFound(path.display().to_string())
                }
                other => CliError::LoadError(other.to_string()),
            })
            .context("failed to load segmentation artifacts")?;
        if !self.quiet {
            println!("Model loaded.");
        }

        if let Some(text) = &self.text {
            if !self.quiet {
                println!("\nSentences:");
            }
            let spans = split_spans(&splitter, text)?;
            self.print_spans(&spans)?;
        }

        if self.interactive {
            self.run_interactive(&splitter)?;
        }

        Ok(())
    }

    fn build_config(&self) -> CliResult<SplitterConfig> {
        let builder = SplitterConfig::builder()
            .model_dir(&self.model)
            .tokenizer_path(&self.tokenizer);
        let builder = match self.threshold {
            Some(threshold) => builder.threshold(threshold),
            None => builder,
        };
        Ok(builder.build()?)
    }

    fn print_spans(&self, spans: &[SentenceSpan]) -> CliResult<()> {
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout())),
        };
        for span in spans {
            formatter.format_sentence(&span.text, span.start)?;
        }
        formatter.finish()?;

        Ok(())
    }

    fn run_interactive(&self, splitter: &SentenceSplitter) -> CliResult<()> {
        if !self.quiet {
            println!("\nInteractive mode. Type '{EXIT_KEYWORD}' to exit.\n");
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("Enter text: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let text = line?.trim().to_string();
            if text.to_lowercase() == EXIT_KEYWORD {
                break;
            }
            if text.is_empty() {
                continue;
            }

            let spans = split_spans(splitter, &text)?;
            println!("\nFound {} sentence(s):", spans.len());
            self.print_spans(&spans)?;
            println!();
        }

        Ok(())
    }

    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();

        log::debug!("arguments: {:?}", self);
    }
}

fn split_spans(splitter: &SentenceSplitter, text: &str) -> CliResult<Vec<SentenceSpan>> {
    let spans = splitter
        .split_spans(text)
        .map_err(|e| CliError::SegmentationError(e.to_string()))?;
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_definition() {
        SplitArgs::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_training_layout() {
        let args = SplitArgs::try_parse_from(["cheikhei"]).unwrap();
        assert_eq!(args.model, PathBuf::from("./output/model-best"));
        assert_eq!(args.tokenizer, PathBuf::from("meitei_tokenizer.model"));
        assert!(args.text.is_none());
        assert!(!args.interactive);
    }

    #[test]
    fn one_shot_text_and_format_parse() {
        let args = SplitArgs::try_parse_from([
            "cheikhei", "-t", "ꯑꯩ ꯆꯥꯛ ꯆꯥꯔꯦ꯫", "-f", "json",
        ])
        .unwrap();
        assert_eq!(args.text.as_deref(), Some("ꯑꯩ ꯆꯥꯛ ꯆꯥꯔꯦ꯫"));
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn execute_without_text_or_interactive_fails() {
        let args = SplitArgs::try_parse_from(["cheikhei", "--quiet"]).unwrap();
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("--text or --interactive"));
    }
}
