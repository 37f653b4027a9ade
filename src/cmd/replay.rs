use crate::reports::{self, ReplaySummary};
use clap::Args;
use dwellword::config::ResolverParams;
use dwellword::error::DwResult;
use dwellword::Dataset;
use rayon::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub resolver: ResolverParams,

    /// Query file: one `code<TAB>context words` per line.
    pub queries: String,

    /// Print every query's candidates as well as the summary.
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

struct Query {
    code: String,
    context: Vec<String>,
}

fn parse_queries(content: &str) -> Vec<Query> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(2, '\t');
            let code = fields.next()?.trim();
            if code.is_empty() || code.starts_with('#') {
                return None;
            }
            let context = fields
                .next()
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect();
            Some(Query {
                code: code.to_string(),
                context,
            })
        })
        .collect()
}

pub fn run(args: ReplayArgs, params: ResolverParams, dataset: &Dataset) -> DwResult<()> {
    let content = fs::read_to_string(&args.queries)?;
    let queries = parse_queries(&content);
    info!("🔁 Replaying {} queries from {}", queries.len(), args.queries);

    let resolver = dataset.resolver(params);
    let start = Instant::now();
    let results: Vec<Vec<String>> = queries
        .par_iter()
        .map(|q| resolver.suggest(&q.code, &q.context))
        .collect();
    let elapsed = start.elapsed();

    if args.show {
        for (q, candidates) in queries.iter().zip(&results) {
            reports::print_candidates(&q.code, &q.context, candidates);
        }
    }

    let summary = ReplaySummary {
        queries: results.len(),
        empty: results.iter().filter(|r| r.is_empty()).count(),
        total_candidates: results.iter().map(Vec::len).sum(),
        longest: results.iter().map(Vec::len).max().unwrap_or(0),
        elapsed,
    };
    reports::print_replay_summary(&summary);
    Ok(())
}
