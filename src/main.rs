use anyhow::Context;
use clap::Parser;
use k4_search::cli::Args;
use k4_search::report::{render_table, SearchReport};
use k4_search::{
    CandidateScorer, CipherEngine, ScoringTables, SearchCoordinator, SearchProgress, SearchState,
    TOP_CANDIDATES,
};
use std::sync::Arc;
use tokio::sync::mpsc;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    let request = args.to_request()?;

    // Print configuration
    println!("Kryptos K4 Key Search v0.1.0");
    println!("{}", "=".repeat(60));
    println!();
    println!("Configuration:");
    println!("  Ciphertext length:  {}", request.ciphertext.len());
    println!("  Method:             {}", request.method);
    println!("  Max key length:     {}", request.max_key_length);
    println!("  Workers:            {}", request.workers);
    println!("  Seed keys:          {}", request.seeds.len());
    println!();

    let engine = CipherEngine::default();
    let scorer = CandidateScorer::new(ScoringTables::default());
    let coordinator = Arc::new(SearchCoordinator::new(engine, scorer));

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    let outcome = runtime.block_on(async {
        let (tx, mut rx) = mpsc::channel::<SearchProgress>(256);

        let search = {
            let coordinator = Arc::clone(&coordinator);
            let request = request.clone();
            tokio::task::spawn_blocking(move || coordinator.run(&request, Some(tx)))
        };

        // Live aggregation: the channel closes once every worker is done
        let mut live = SearchState::new(0);
        while let Some(message) = rx.recv().await {
            let is_batch = matches!(message, SearchProgress::ChunkCompleted { .. });
            live.absorb(message);
            if is_batch || live.keys_processed() % 1000 == 0 {
                println!(
                    "Progress: {}/{} ({:.1}%), {} candidates",
                    live.keys_processed(),
                    live.total_keys(),
                    live.percent_complete(),
                    live.candidate_count()
                );
            }
        }

        let outcome = search.await.context("search worker pool failed")??;
        anyhow::Ok(outcome)
    })?;

    println!();
    println!(
        "Search complete: {} of {} keys in {:.2}s, {} candidates",
        outcome.keys_processed,
        outcome.total_keys,
        outcome.duration_secs,
        outcome.ranked.len()
    );
    println!();

    if args.json {
        let report = SearchReport::new(&request, &outcome, TOP_CANDIDATES);
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_table(&outcome.ranked, TOP_CANDIDATES));
    }

    Ok(())
}
