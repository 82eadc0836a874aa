use clap::*;
use ragr::libs::synteny::{format::write_permutations, PermutationContainer};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("filter")
        .about("Drop duplicated synteny blocks from permutations")
        .after_help(
            r###"
A block is duplicated when its id occurs more than once within one genome. Duplicated
blocks are removed from every genome, and permutations left empty are dropped.

Notes:
* Target permutations are written first, then the references
* With --target-blocks-only, reference blocks absent from the target are dropped too
* Fails when no reference or no target block survives

Examples:
1. Filter all genomes:
   $ ragr filter perms.txt --target T

2. Use two of the references only:
   $ ragr filter perms.txt --target T --genomes A,B -o filtered.txt

"###,
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
    let mut writer = ragr::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Operating
    //----------------------------
    let container = PermutationContainer::from_file(infile, &recipe)?;
    log::info!(
        "{} duplicated blocks dropped; {} target and {} reference permutations kept",
        container.duplications.len(),
        container.target_perms_filtered.len(),
        container.ref_perms_filtered.len()
    );

    //----------------------------
    // Output
    //----------------------------
    write_permutations(&container.target_perms_filtered, &mut writer)?;
    write_permutations(&container.ref_perms_filtered, &mut writer)?;

    Ok(())
}
