//! Subcommand modules for the `ragr` binary.

pub mod filter;
pub mod graph;
pub mod infer;

use clap::*;

// Arguments shared by every subcommand reading permutations
pub fn perm_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("infile")
            .required(true)
            .num_args(1)
            .index(1)
            .help("Permutation file. [stdin] for standard input"),
    )
    .arg(
        Arg::new("target")
            .long("target")
            .short('t')
            .required(true)
            .num_args(1)
            .help("Name of the target genome"),
    )
    .arg(
        Arg::new("genomes")
            .long("genomes")
            .short('g')
            .num_args(1)
            .value_delimiter(',')
            .action(ArgAction::Append)
            .help("Genomes to use, comma separated. Default: every genome in the input"),
    )
    .arg(
        Arg::new("target-blocks-only")
            .long("target-blocks-only")
            .action(ArgAction::SetTrue)
            .help("Drop reference blocks that never occur in the target"),
    )
}

pub fn recipe_from(args: &ArgMatches) -> ragr::libs::synteny::Recipe {
    let target = args.get_one::<String>("target").unwrap();
    let genomes: Vec<String> = args
        .get_many::<String>("genomes")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    ragr::libs::synteny::Recipe::new(target)
        .with_genomes(genomes)
        .with_restrict_to_target(args.get_flag("target-blocks-only"))
}
