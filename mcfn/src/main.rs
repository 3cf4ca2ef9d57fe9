//! Command line front end for the metastability-containing function search.

use clap::Parser;
use mcfn::analyze::{Analyzer, InputRelevance, MetastabilityContaining, OutputOrdered};
use mcfn::{enumerate, Function, SearchOptions, MAX_BITS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of binary input pins.
    #[clap(default_value = "3", value_parser = clap::value_parser!(u32).range(1..=MAX_BITS as i64))]
    num_inputs: u32,
    /// Number of binary output pins.
    #[clap(default_value = "3", value_parser = clap::value_parser!(u32).range(1..=MAX_BITS as i64))]
    num_outputs: u32,

    /// Steps between progress log lines (0 disables progress reporting).
    #[clap(long, default_value = "5000000")]
    progress_interval: u64,
}

fn main() -> color_eyre::Result<()> {
    // Parameter errors exit with status 1, not clap's default. Help and
    // version requests surface as errors here too, but complete normally.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    color_eyre::install()?;
    mcfn_logger::setup();

    log::info!(
        "n_in = {}, n_out = {}",
        args.num_inputs,
        args.num_outputs
    );

    let mut f = Function::new(args.num_inputs, args.num_outputs);

    // The analyzers are not fully independent: output ordering occasionally
    // rules out candidates that also violate metastability containment, so
    // running with a subset of them can skip more functions than expected.
    let mut ord;
    let mut msc = MetastabilityContaining;
    let mut rel = InputRelevance::new(&f);

    let mut analyzers: Vec<&mut dyn Analyzer> = Vec::new();
    if mcfn::analyze::can_fit(args.num_outputs, f.end_input) {
        ord = OutputOrdered::new(&f);
        analyzers.push(&mut ord);
    }
    analyzers.push(&mut msc);
    analyzers.push(&mut rel);

    log::info!("searching for functions with {} properties:", analyzers.len());
    for analyzer in analyzers.iter() {
        log::info!("{}", analyzer.name());
    }

    let stats = enumerate(
        &mut f,
        &mut analyzers,
        &SearchOptions {
            progress_interval: args.progress_interval,
        },
        |f| println!("{f}"),
    );

    log::info!(
        "done searching, found {} fns in {} steps",
        stats.functions,
        stats.steps
    );

    Ok(())
}
