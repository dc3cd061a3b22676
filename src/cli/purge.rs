use std::time::Duration;

use dialoguer::{Confirm, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    Error, Res,
    config::Config,
    info,
    spotify::library::{
        REMOVE_BATCH_SIZE, SAVED_ALBUMS_PAGE_LIMIT, get_all_saved_albums, remove_saved_albums,
    },
    success, utils,
};

/// Asks the user a yes/no question.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> Res<bool>;
}

/// Interactive terminal prompt, defaulting to "No".
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> Res<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

#[derive(Debug, Clone)]
pub struct PurgeOptions {
    pub dry_run: bool,
    pub page_limit: u64,
    pub batch_size: usize,
}

impl Default for PurgeOptions {
    fn default() -> Self {
        PurgeOptions {
            dry_run: false,
            page_limit: SAVED_ALBUMS_PAGE_LIMIT,
            batch_size: REMOVE_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    NothingToRemove,
    DryRun(usize),
    Declined,
    Removed(usize),
}

/// Fetches the saved albums, shows them, asks for confirmation and removes
/// them in batches.
///
/// An empty library or a declined prompt ends the run without any removal
/// request. The first failing batch aborts the run; albums in earlier batches
/// stay removed.
pub async fn purge(
    client: &Client,
    config: &Config,
    token: &str,
    confirmation: &dyn Confirmation,
    options: &PurgeOptions,
) -> Res<PurgeOutcome> {
    let pb = spinner("Fetching saved albums...");
    let fetched = get_all_saved_albums(client, config, token, options.page_limit).await;
    pb.finish_and_clear();
    let albums = fetched?;

    if albums.is_empty() {
        info!("No saved albums found. Nothing to remove.");
        return Ok(PurgeOutcome::NothingToRemove);
    }

    for saved in &albums {
        tracing::debug!(album = %saved.album.name, id = %saved.album.id, "saved album");
    }

    let total = albums.len();
    println!("{}", Table::new(utils::album_table_rows(&albums)));
    info!("Found {} saved albums", total);

    if options.dry_run {
        info!("Dry run, no albums were removed");
        return Ok(PurgeOutcome::DryRun(total));
    }

    let confirmed =
        confirmation.confirm(&format!("Remove all {total} saved albums from your library?"))?;
    info!("You answered: {}", utils::bool_to_text(confirmed));

    if !confirmed {
        info!("Operation cancelled by user");
        return Ok(PurgeOutcome::Declined);
    }

    let ids: Vec<String> = albums.into_iter().map(|saved| saved.album.id).collect();

    let progress = progress_bar(total as u64);
    match remove_in_batches(client, config, token, &ids, options.batch_size, &progress).await {
        Ok(removed) => {
            progress.finish_and_clear();
            success!("All {} saved albums removed successfully", removed);
            Ok(PurgeOutcome::Removed(removed))
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

/// Removes `ids` in chunks of `batch_size`, one request per chunk, in order.
///
/// Returns the number of ids removed. A failure stops the loop and is
/// reported with its 1-based batch number.
pub async fn remove_in_batches(
    client: &Client,
    config: &Config,
    token: &str,
    ids: &[String],
    batch_size: usize,
    progress: &ProgressBar,
) -> Res<usize> {
    let batch_size = batch_size.max(1);
    let total = ids.len();
    let mut removed = 0;

    for (index, chunk) in ids.chunks(batch_size).enumerate() {
        let batch = index + 1;
        let offset = index * batch_size;

        remove_saved_albums(client, config, token, chunk)
            .await
            .map_err(|e| match e {
                Error::RemoveFailed { status, .. } => Error::RemoveFailed { batch, status },
                other => other,
            })?;

        removed += chunk.len();
        progress.set_message(format!("Removing albums {removed}/{total}"));
        progress.inc(chunk.len() as u64);
        tracing::debug!(batch, offset, size = chunk.len(), "removed albums batch");
    }

    Ok(removed)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.green/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb.set_message("Removing albums");
    pb
}
