//! Command-line lookup: load an AlphaFold model by UniProt accession, or
//! search UniProtKB.

use std::path::Path;

use foldscope::net::{
    classify_error, validate_identifier, RequestError, UreqTransport,
};
use foldscope::options::Options;
use foldscope::Session;

fn load_options() -> Options {
    let Ok(path) = std::env::var("FOLDSCOPE_OPTIONS") else {
        return Options::default();
    };
    match Options::load(Path::new(&path)) {
        Ok(options) => {
            log::info!("Loaded options from {path}");
            options
        }
        Err(e) => {
            log::error!("{path}: {e}");
            std::process::exit(1);
        }
    }
}

fn report_failure(error: &RequestError) -> ! {
    let descriptor = classify_error(error);
    log::error!("{}", descriptor.message);
    log::error!("Details: {}", descriptor.technical_details);
    log::error!("Next step: {}", descriptor.user_action);
    std::process::exit(1);
}

fn show_structure(session: &mut Session<UreqTransport>, id: &str) {
    let loaded = match session.load(id, None) {
        Ok(loaded) => loaded,
        Err(e) => report_failure(&e),
    };

    if let Some(entry) = loaded.metadata.first() {
        log::info!(
            "{} | {} | {}",
            entry.entry_id.as_deref().unwrap_or("-"),
            entry.uniprot_description.as_deref().unwrap_or("-"),
            entry.organism_scientific_name.as_deref().unwrap_or("-"),
        );
    }
    let data = &loaded.confidence;
    if let Some(mean) = data.mean_score() {
        log::info!("{} residues, mean pLDDT {mean:.1}", data.len());
    }
    for (level, count) in data.level_counts() {
        log::info!("  {:<28} {count}", level.label());
    }
}

fn run_search(session: &Session<UreqTransport>, query: &str) {
    let hits = match session.search(query, None) {
        Ok(hits) => hits,
        Err(e) => report_failure(&e),
    };
    if hits.is_empty() {
        log::info!("No UniProt entries match {query:?}");
        return;
    }
    for hit in hits {
        log::info!(
            "{:<10} {:<12} {} ({})",
            hit.accession,
            hit.gene.as_deref().unwrap_or("-"),
            hit.protein_name.as_deref().unwrap_or("-"),
            hit.organism.as_deref().unwrap_or("-"),
        );
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if input.trim().is_empty() {
        log::error!("Usage: foldscope <UNIPROT_ID | search terms...>");
        std::process::exit(1);
    }

    let options = load_options();
    let mut session = Session::with_options(&options);

    if validate_identifier(Some(input.as_str())).is_ok() {
        show_structure(&mut session, &input);
    } else {
        run_search(&session, &input);
    }
}
