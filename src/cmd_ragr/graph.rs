use clap::*;
use itertools::Itertools;
use ragr::libs::breakpoint::BreakpointGraph;
use ragr::libs::synteny::PermutationContainer;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("graph")
        .about("Connected components of the breakpoint graph")
        .after_help(
            r###"
Nodes are signed block extremities. Consecutive blocks `left right` of a reference
chromosome link `-left` with `right`, one edge per reference genome.

Output columns:
* comp    - component index, components ordered by their smallest node
* nodes   - number of extremities
* edges   - number of edges, parallel edges included
* members - the extremities

Examples:
1. Component table:
   $ ragr graph perms.txt --target T

2. The whole multigraph in Graphviz format:
   $ ragr graph perms.txt --target T --dot | dot -Tpdf -o bg.pdf

"###,
        )
        .arg(
            Arg::new("circular")
                .long("circular")
                .action(ArgAction::SetTrue)
                .help("Reference chromosomes are circular"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .action(ArgAction::SetTrue)
                .help("Write the graph in DOT format"),
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
    let recipe = super::recipe_from(args);
    let is_circular = args.get_flag("circular");
    let is_dot = args.get_flag("dot");
    let mut writer = ragr::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Operating
    //----------------------------
    let container = PermutationContainer::from_file(infile, &recipe)?;
    let graph = BreakpointGraph::build_from(&container, is_circular);

    //----------------------------
    // Output
    //----------------------------
    if is_dot {
        let nodes: Vec<i64> = graph.nodes().collect();
        writer.write_all(graph.to_dot(&nodes).as_bytes())?;
        return Ok(());
    }

    writer.write_fmt(format_args!("#comp\tnodes\tedges\tmembers\n"))?;
    for (comp_id, nodes) in graph.components().iter().enumerate() {
        let edges: usize = nodes
            .iter()
            .map(|&n| {
                graph
                    .edges(n)
                    .iter()
                    .filter(|e| n <= e.neighbor)
                    .count()
            })
            .sum();
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\n",
            comp_id,
            nodes.len(),
            edges,
            nodes.iter().map(|n| format!("{:+}", n)).join(",")
        ))?;
    }

    Ok(())
}
