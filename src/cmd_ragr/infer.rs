use clap::*;
use ragr::libs::breakpoint::{AdjacencyInferer, BreakpointGraph, DebugSink};
use ragr::libs::phylo::Phylogeny;
use ragr::libs::synteny::PermutationContainer;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("infer")
        .about("Infer target adjacencies from the breakpoint graph and a phylogeny")
        .after_help(
            r###"
Each connected component of the breakpoint graph is resolved independently. Candidate
adjacencies are scored by weighted parsimony on the phylogeny, adjacencies already
present in the target cost nothing, and a maximum-cardinality minimum-cost matching
picks the result.

Output: one connection per line, `start<TAB>end`, meaning block `start` is followed
by block `end`. Both are signed; the reverse strand appears as its own line.

Notes:
* The leaves of the tree must be exactly the target and the reference genomes
* --debug DIR writes compN-bg.dot, compN-weighted.dot and used_contigs.txt

Examples:
1. Infer adjacencies:
   $ ragr infer perms.txt --tree tree.nwk --target T

2. Circular references, four threads, keep diagnostics:
   $ ragr infer perms.txt --tree tree.nwk --target T --circular --parallel 4 --debug debug/

"###,
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .required(true)
                .num_args(1)
                .help("Newick file with the phylogeny of all genomes"),
        )
        .arg(
            Arg::new("circular")
                .long("circular")
                .action(ArgAction::SetTrue)
                .help("Reference chromosomes are circular"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .num_args(1)
                .help("Directory receiving per-component diagnostics"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        );

    super::perm_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let tree_file = args.get_one::<String>("tree").unwrap();
    let recipe = super::recipe_from(args);
    let is_circular = args.get_flag("circular");

    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build_global()?;

    let debug = match args.get_one::<String>("debug") {
        Some(dir) => Some(DebugSink::new(dir)?),
        None => None,
    };

    let mut writer = ragr::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Loading
    //----------------------------
    let container = PermutationContainer::from_file(infile, &recipe)?;
    let phylogeny = Phylogeny::from_file(tree_file)?;

    let mut genomes = vec![container.target().to_string()];
    genomes.extend(container.reference_genomes());
    phylogeny.check_genomes(&genomes)?;

    if let Some(sink) = &debug {
        sink.write_permutations("used_contigs.txt", &container.target_perms_filtered);
    }

    //----------------------------
    // Operating
    //----------------------------
    let graph = BreakpointGraph::build_from(&container, is_circular);
    let mut inferer = AdjacencyInferer::new(&graph, &phylogeny).parallel(opt_parallel > 1);
    if let Some(sink) = &debug {
        inferer = inferer.with_debug(sink);
    }
    let adjacencies = inferer.infer_adjacencies()?;

    //----------------------------
    // Output
    //----------------------------
    for conn in adjacencies.connections() {
        writer.write_fmt(format_args!("{:+}\t{:+}\n", conn.start, conn.end))?;
    }

    Ok(())
}
