extern crate clap;
use clap::*;

mod cmd_ragr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("ragr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`ragr` - Reference-Assisted Genome Reconstruction")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Verbosity: -v for info, -vv for debug messages on stderr"),
        )
        .subcommand(cmd_ragr::filter::make_subcommand())
        .subcommand(cmd_ragr::graph::make_subcommand())
        .subcommand(cmd_ragr::infer::make_subcommand())
        .after_help(
            r###"Subcommands:

* filter - Drop duplicated synteny blocks from permutations
* graph  - Connected components of the breakpoint graph
* infer  - Infer target adjacencies from the breakpoint graph and a phylogeny

Permutation format:

    >genome.chromosome
    +1 -2 +3 $

"###,
        );

    let matches = app.get_matches();
    if let Some((_, sub_matches)) = matches.subcommand() {
        init_logger(sub_matches.get_count("verbose"));
    }

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("filter", sub_matches)) => cmd_ragr::filter::execute(sub_matches),
        Some(("graph", sub_matches)) => cmd_ragr::graph::execute(sub_matches),
        Some(("infer", sub_matches)) => cmd_ragr::infer::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

fn init_logger(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
}
