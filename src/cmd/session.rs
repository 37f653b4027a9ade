use crate::reports;
use clap::Args;
use dwellword::config::{ResolverParams, SessionParams};
use dwellword::context::ContextWindow;
use dwellword::error::DwResult;
use dwellword::rerank::{CommandReranker, GuardedReranker};
use dwellword::Dataset;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[command(flatten)]
    pub resolver: ResolverParams,

    #[command(flatten)]
    pub session: SessionParams,
}

/// Stands in for the dwell keyboard: each line is one committed key or command.
///
///   letters  extend the pending input
///   :N       confirm suggestion N into the context
///   <        delete the last letter
///   .        clear the pending input
///   ..       clear the context
///   exit     quit
pub fn run(args: SessionArgs, params: ResolverParams, dataset: &Dataset) -> DwResult<()> {
    let resolver = dataset.resolver(params.clone());
    let mut window = ContextWindow::new(args.session.context_window);
    let mut typed = String::new();

    let reranker = args
        .session
        .rerank_cmd
        .as_deref()
        .and_then(CommandReranker::from_command_line)
        .map(|cmd| {
            info!("🤖 External reranker: {:?}", cmd);
            GuardedReranker::new(
                Arc::new(cmd),
                Duration::from_millis(args.session.rerank_timeout_ms),
                params.top_k,
            )
        });

    println!("Dwell session. Letters extend input, ':N' confirms, '.' clears, 'exit' quits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut candidates: Vec<String> = Vec::new();

    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = line.trim();

        match cmd {
            "exit" => break,
            "" => {}
            "." => typed.clear(),
            ".." => window.clear(),
            "<" => {
                typed.pop();
            }
            s if s.starts_with(':') => match s[1..].parse::<usize>() {
                Ok(n) if n >= 1 && n <= candidates.len() => {
                    let chosen = candidates[n - 1].clone();
                    println!("Confirmed: '{}'", chosen);
                    window.push(&chosen);
                    typed.clear();
                }
                _ => warn!("No suggestion at '{}'", s),
            },
            s => typed.push_str(s),
        }

        let code = dataset.encode_input(&typed);
        let context = window.words();
        candidates = resolver.suggest(&code, &context);
        if let Some(guard) = &reranker {
            candidates = guard.apply(candidates, &context);
        }
        reports::print_candidates(&code, &context, &candidates);

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}
