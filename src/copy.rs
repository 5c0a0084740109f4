use crate::aggregator::{ContextCreator, Document};
use crate::errors::ContextError;
use crate::filter::FileFilter;
use crate::reporting::{print_stats, summary_line};
use crate::sink::{select_sink, ContextSink};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a run needs, already parsed from the command line.
#[derive(Debug, Clone)]
pub struct ContextCreatorConfig {
    pub directory: PathBuf,
    pub use_gitignore: bool,
    pub exclude_patterns: Vec<String>,
    pub no_clipboard: bool,
    pub output: Option<PathBuf>,
    pub no_stats: bool,
}

impl Default for ContextCreatorConfig {
    fn default() -> Self {
        ContextCreatorConfig {
            directory: PathBuf::from("."),
            use_gitignore: true,
            exclude_patterns: Vec::new(),
            no_clipboard: false,
            output: None,
            no_stats: false,
        }
    }
}

/// Builds the document for `config.directory` without delivering it.
pub fn build_document(config: &ContextCreatorConfig) -> Result<Document, ContextError> {
    info!("Scanning directory: {}", config.directory.display());
    let filter = FileFilter::new(
        &config.directory,
        config.use_gitignore,
        &config.exclude_patterns,
    )?;
    let creator = ContextCreator::with_filter(&config.directory, filter)?;
    Ok(creator.create_context())
}

/// Builds the document and hands it to the sink chosen by `config`.
pub async fn copy_project_context(config: ContextCreatorConfig) -> Result<Document, ContextError> {
    let sink = select_sink(config.output.clone(), config.no_clipboard);
    deliver_with(&config, sink.as_ref()).await
}

pub async fn deliver_with(
    config: &ContextCreatorConfig,
    sink: &dyn ContextSink,
) -> Result<Document, ContextError> {
    let document = build_document(config)?;
    debug!("Final content length: {}", document.as_str().len());

    sink.deliver(&document).await?;

    info!("{}", summary_line(&document, &sink.describe()));
    if !config.no_stats && !document.is_empty() {
        print_stats(&document);
    }
    Ok(document)
}
