use anyhow::{Context, Result, bail};
use clap::Parser;
use notion_mathsync_config::Config;
use notion_mathsync_engine::{
    ClientSettings, NotionClient, SyncOptions, Synchronizer, staging::write_jsonl,
};
use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::PathBuf,
    process,
};

#[derive(Parser, Debug)]
#[command(
    name = "notion-mathsync",
    version,
    about = "Rewrite $...$ and $$...$$ math in a Notion page into native equations"
)]
struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        help = "Config file (default: ~/.config/notion-mathsync/config.toml)"
    )]
    config: Option<PathBuf>,
    #[arg(long, value_name = "ID", help = "Page to sync, overriding the config file")]
    page: Option<String>,
    #[arg(long, value_name = "N", help = "Blocks per append call")]
    batch_size: Option<usize>,
    #[arg(long, help = "Fetch and convert, print the blocks, write nothing")]
    dry_run: bool,
    #[arg(
        long,
        value_name = "PATH",
        help = "Write the flattened records as JSON Lines"
    )]
    dump_records: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(page) = &self.page {
            config.page_id = page.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::error!("Run failed: {e:#}");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns whether every stage succeeded.
fn run(cli: &Cli) -> Result<bool> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let Some(mut config) = Config::load_from_path(&config_path)? else {
        bail!(
            "No config file found at {}; create one with api_key and page_id",
            config_path.display()
        );
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let client = NotionClient::new(&ClientSettings {
        api_key: config.api_key.clone(),
        notion_version: config.notion_version.clone(),
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
    })
    .context("Failed to build HTTP client")?;

    let sync = Synchronizer::new(
        client,
        config.page_id.clone(),
        SyncOptions {
            batch_size: config.batch_size,
            batch_delay: config.batch_delay(),
        },
    );

    log::info!("Fetching blocks of page {}", config.page_id);
    let prepared = sync.prepare();

    if let Some(path) = &cli.dump_records {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_jsonl(&prepared.records, BufWriter::new(file))
            .with_context(|| format!("Failed to write records to {}", path.display()))?;
        log::info!("Wrote {} records to {}", prepared.records.len(), path.display());
    }

    for failure in &prepared.fetch.failures {
        eprintln!(
            "Fetch of children of {} failed: {}",
            failure.parent_id, failure.error
        );
    }
    if prepared.fetch.blocks.is_empty() {
        eprintln!("Error: no content fetched from page {}", config.page_id);
        return Ok(false);
    }

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&prepared.blocks)?);
        eprintln!(
            "Dry run: {} blocks fetched, {} would be written",
            prepared.fetch.blocks.len(),
            prepared.blocks.len()
        );
        return Ok(prepared.fetch.failures.is_empty());
    }

    let confirmed = confirm(
        io::stdin().lock(),
        io::stdout(),
        &config.page_id,
        prepared.blocks.len(),
    )?;
    if !confirmed {
        eprintln!("Aborted, nothing was written.");
        return Ok(false);
    }

    let report = sync.upload(prepared);
    println!("{report}");
    Ok(report.is_success())
}

/// Asks the operator to clear the destination page and confirm the write.
fn confirm<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    page_id: &str,
    count: usize,
) -> io::Result<bool> {
    writeln!(output, "About to append {count} blocks to page {page_id}.")?;
    writeln!(
        output,
        "Delete the page's existing content in Notion first, or it will be duplicated."
    )?;
    write!(output, "Continue? [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "notion-mathsync",
            "--page",
            "other-page",
            "--batch-size",
            "10",
            "--dry-run",
        ])
        .unwrap();
        let mut config = Config::new("secret", "page");
        cli.apply_overrides(&mut config);

        assert!(cli.dry_run);
        assert_eq!(config.page_id, "other-page");
        assert_eq!(config.batch_size, 10);
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["notion-mathsync"]).unwrap();
        let mut config = Config::new("secret", "page");
        cli.apply_overrides(&mut config);

        assert_eq!(config, Config::new("secret", "page"));
    }

    #[test]
    fn confirm_accepts_yes() {
        for answer in ["y\n", "YES\n", "  yes  \n"] {
            let mut out = Vec::new();
            assert!(confirm(answer.as_bytes(), &mut out, "p", 3).unwrap());
        }
    }

    #[test]
    fn confirm_rejects_anything_else() {
        for answer in ["\n", "no\n", "sure\n", ""] {
            let mut out = Vec::new();
            assert!(!confirm(answer.as_bytes(), &mut out, "p", 3).unwrap());
        }
    }

    #[test]
    fn confirm_prompt_names_page_and_count() {
        let mut out = Vec::new();
        confirm("n\n".as_bytes(), &mut out, "page-42", 7).unwrap();
        let prompt = String::from_utf8(out).unwrap();

        assert!(prompt.starts_with("About to append 7 blocks to page page-42."));
        assert!(prompt.ends_with("Continue? [y/N] "));
    }
}
