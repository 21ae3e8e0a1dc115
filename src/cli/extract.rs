use std::path::PathBuf;

use tabled::builder::Builder;

use crate::{
    error,
    extract::{ExtractOptions, Extractor, FeatureTable},
    info,
    management::FeatureTableManager,
    spotify::SpotifyClient,
    success, utils, warning,
};

pub async fn extract(
    playlist: String,
    out: Option<PathBuf>,
    chunks: Option<usize>,
    force: bool,
    preview: Option<usize>,
) {
    let table_mgr =
        FeatureTableManager::new(out.unwrap_or_else(|| utils::default_output_path(&playlist)));

    let table = if table_mgr.exists() && !force {
        info!(
            "Features for {} already saved at {}",
            playlist,
            table_mgr.path().display()
        );
        match table_mgr.load().await {
            Ok(table) => table,
            Err(e) => error!(
                "Failed to read {}. Run again with --force.\n Error: {}",
                table_mgr.path().display(),
                e
            ),
        }
    } else {
        let table = fetch_remote_table(&playlist, chunks).await;
        match table_mgr.persist(&table).await {
            Ok(_) => success!("Saved features to {}", table_mgr.path().display()),
            Err(e) => warning!(
                "Failed to save features to {}: {}",
                table_mgr.path().display(),
                e
            ),
        }
        table
    };

    success!(
        "{} tracks with audio features, {} columns",
        table.len(),
        table.columns().len()
    );

    if let Some(rows) = preview {
        print_preview(&table, rows);
    }
}

async fn fetch_remote_table(playlist: &str, chunks: Option<usize>) -> FeatureTable {
    let client = match SpotifyClient::from_cache().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    let mut options = ExtractOptions::from_env();
    if let Some(chunks) = chunks {
        options = options.with_chunks(chunks);
    }

    info!("Extracting audio features for playlist {}", playlist);
    let pb = utils::spinner("Fetching playlist tracks...");

    let result = Extractor::new(&client)
        .with_options(options)
        .with_progress(pb.clone())
        .run(playlist)
        .await;

    pb.finish_and_clear();
    match result {
        Ok(table) => table,
        Err(e) => error!("Failed to extract playlist features: {}", e),
    }
}

fn print_preview(table: &FeatureTable, rows: usize) {
    if table.is_empty() {
        warning!("Nothing to preview.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns());
    for record in table.records().take(rows) {
        builder.push_record(record);
    }

    println!("{}", builder.build());
}
