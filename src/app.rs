//! Command execution: wires the CLI to reading, the form workflows and
//! writing.

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::config::{ExtractConfig, MergeConfig, OutputSettings, OverwriteMode};
use crate::document::PdfSource;
use crate::error::{Result, SpliceError};
use crate::form::{
    Download, EXTRACT_SUCCESS_MESSAGE, ExtractRequest, MERGE_SUCCESS_MESSAGE, MergeRequest,
};
use crate::io::{BufferWriter, SourceReader, WriteStatistics};
use crate::output::{OperationKind, OperationReport, OutputFormatter};

/// Run the command described by `cli`.
///
/// Success messages and reports are printed here; errors are returned for
/// the caller to report (see [`report_error`]).
pub async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Merge(args) => merge(args.to_config(&cli.global)?).await,
        Command::Extract(args) => extract(args.to_config(&cli.global)?).await,
        Command::Info(args) => {
            let settings = OutputSettings {
                output: args.input.clone(),
                verbose: cli.global.verbose,
                quiet: cli.global.quiet,
                json: cli.global.json,
                ..Default::default()
            };
            info(args.input.clone(), &settings).await
        }
    }
}

/// Print `err` the way the command line reports failures.
pub fn report_error(cli: &Cli, err: &SpliceError) {
    if cli.global.json {
        let report =
            OperationReport::failure(cli.command.kind(), err, cli.command.raw_inputs());
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error: {err}"),
        }
    } else if err.is_page_selection_error() || matches!(err, SpliceError::MissingFormInput { .. })
    {
        OutputFormatter::quiet().error(&err.user_message());
    } else {
        OutputFormatter::quiet().error(&format!("Error: {err}"));
    }
}

async fn merge(config: MergeConfig) -> Result<()> {
    let formatter = OutputFormatter::from_settings(&config.settings);
    handle_output_overwrite(&config.settings, &formatter).await?;

    formatter.info(&format!("Reading {} file(s)...", config.inputs.len()));
    let files = SourceReader::new().read_all(&config.inputs).await?;
    list_sources(&formatter, &files);
    formatter.debug(&format!("Compression: {:?}", config.settings.write.compression));

    let request = MergeRequest {
        files,
        output_name: config.settings.output.display().to_string(),
        options: config.settings.write,
    };
    let download = request.submit()?;

    let write = BufferWriter::new()
        .write(&download.bytes, &config.settings.output)
        .await?;

    finish(
        OperationKind::Merge,
        MERGE_SUCCESS_MESSAGE,
        config.inputs,
        &config.settings,
        &formatter,
        &download,
        &write,
    )
}

async fn extract(config: ExtractConfig) -> Result<()> {
    let formatter = OutputFormatter::from_settings(&config.settings);
    handle_output_overwrite(&config.settings, &formatter).await?;

    let file = SourceReader::new().read(&config.input).await?;
    list_sources(&formatter, std::slice::from_ref(&file));
    formatter.debug(&format!("Pages requested: {}", config.pages));

    let request = ExtractRequest {
        file: Some(file),
        output_name: config.settings.output.display().to_string(),
        pages: config.pages.clone(),
        options: config.settings.write,
    };
    let download = request.submit()?;

    let write = BufferWriter::new()
        .write(&download.bytes, &config.settings.output)
        .await?;

    finish(
        OperationKind::Extract,
        EXTRACT_SUCCESS_MESSAGE,
        vec![config.input],
        &config.settings,
        &formatter,
        &download,
        &write,
    )
}

async fn info(path: PathBuf, settings: &OutputSettings) -> Result<()> {
    let source = SourceReader::new().read(&path).await?;
    let document = source.open()?;

    if settings.json {
        let message = format!("{} has {} page(s)", source.name(), document.page_count());
        let report = OperationReport::success(OperationKind::Info, message, vec![path])
            .with_pages(document.page_count());
        println!("{}", report.to_json()?);
    } else if !settings.quiet {
        println!("{}", source.name());
        println!("  Pages: {}", document.page_count());
        println!("  PDF version: {}", document.version());
        println!("  Size: {}", crate::io::format_file_size(source.len() as u64));
    }

    Ok(())
}

fn list_sources(formatter: &OutputFormatter, sources: &[PdfSource]) {
    for (index, source) in sources.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} ({})",
                source.name(),
                crate::io::format_file_size(source.len() as u64)
            ),
        );
    }
}

fn finish(
    kind: OperationKind,
    message: &str,
    inputs: Vec<PathBuf>,
    settings: &OutputSettings,
    formatter: &OutputFormatter,
    download: &Download,
    write: &WriteStatistics,
) -> Result<()> {
    if settings.json {
        let report = OperationReport::success(kind, message, inputs)
            .with_statistics(&download.statistics, write);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    formatter.success(message);
    formatter.info(&format!(
        "Wrote {} page(s) to {} ({})",
        download.statistics.pages,
        write.output_path.display(),
        write.format_file_size()
    ));

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input files", &download.statistics.sources.to_string());
        formatter.detail("Input size", &download.statistics.format_input_size());
        formatter.detail("Output pages", &download.statistics.pages.to_string());
        formatter.detail("Output size", &write.format_file_size());
        formatter.detail(
            "Assembly time",
            &format!("{:.2}s", download.statistics.elapsed.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

/// Decide whether an existing output file may be replaced.
async fn handle_output_overwrite(
    settings: &OutputSettings,
    formatter: &OutputFormatter,
) -> Result<()> {
    if !BufferWriter::new().exists(&settings.output).await {
        return Ok(());
    }

    match settings.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(SpliceError::output_exists(settings.output.clone())),
        OverwriteMode::Prompt => {
            // Nobody to ask when output is silenced.
            if formatter.is_quiet() {
                return Err(SpliceError::output_exists(settings.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                settings.output.display()
            ));

            use std::io::{self, Write};
            eprint!("Overwrite? [y/N]: ");
            io::stderr().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;

            match response.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(()),
                _ => Err(SpliceError::Cancelled),
            }
        }
    }
}
