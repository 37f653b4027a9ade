use crate::reports;
use clap::Args;
use dwellword::config::ResolverParams;
use dwellword::Dataset;

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub resolver: ResolverParams,

    /// Code to resolve (or typed letters with --encode).
    pub code: String,

    /// Recently confirmed words, oldest first.
    #[arg(short = 'x', long, num_args = 0.., value_delimiter = ' ')]
    pub context: Vec<String>,

    /// Treat CODE as typed letters and map them through the key groups.
    #[arg(long, default_value_t = false)]
    pub encode: bool,
}

pub fn run(args: SuggestArgs, params: ResolverParams, dataset: &Dataset) {
    let resolver = dataset.resolver(params);
    let code = if args.encode {
        dataset.encode_input(&args.code)
    } else {
        args.code.clone()
    };

    let candidates = resolver.suggest(&code, &args.context);
    reports::print_candidates(&code, &args.context, &candidates);
}
