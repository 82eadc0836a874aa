use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_infer_keeps_target_order() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    let output = cmd
        .arg("infer")
        .arg("tests/perm/two_refs.txt")
        .arg("--tree")
        .arg("tests/newick/abt.nwk")
        .arg("--target")
        .arg("T")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "-3\t-1\n-2\t-3\n+1\t+3\n+3\t+2\n");

    Ok(())
}

#[test]
fn command_infer_joins_contigs() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    let output = cmd
        .arg("infer")
        .arg("tests/perm/fragmented.txt")
        .arg("--tree")
        .arg("tests/newick/abct.nwk")
        .arg("--target")
        .arg("T")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("+2\t+3\n"));
    assert!(stdout.contains("+3\t+4\n"));
    assert!(stdout.contains("-4\t-3\n"));
    assert!(stdout.starts_with("-6\t-5\n"));

    Ok(())
}

#[test]
fn command_infer_parallel_debug() -> anyhow::Result<()> {
    let tempdir = tempfile::TempDir::new()?;
    let debug_dir = tempdir.path().join("debug");

    let mut cmd = Command::cargo_bin("ragr")?;
    let output = cmd
        .arg("infer")
        .arg("tests/perm/fragmented.txt")
        .arg("--tree")
        .arg("tests/newick/abct.nwk")
        .arg("--target")
        .arg("T")
        .arg("--parallel")
        .arg("2")
        .arg("--debug")
        .arg(debug_dir.to_str().unwrap())
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 10);

    let used = std::fs::read_to_string(debug_dir.join("used_contigs.txt"))?;
    assert!(used.starts_with(">T.ctg1\n+1 +2 $\n"));

    // components: {-5,+6}, {-4,-2,+3,+5}, {-3,+4}, {-1,+2}
    assert!(debug_dir.join("comp1-bg.dot").is_file());
    assert!(debug_dir.join("comp1-weighted.dot").is_file());
    assert!(!debug_dir.join("comp0-bg.dot").exists());

    Ok(())
}

#[test]
fn command_infer_outfile() -> anyhow::Result<()> {
    let tempdir = tempfile::TempDir::new()?;
    let outfile = tempdir.path().join("adj.tsv");

    let mut cmd = Command::cargo_bin("ragr")?;
    cmd.arg("infer")
        .arg("tests/perm/two_refs.txt")
        .arg("--tree")
        .arg("tests/newick/abt.nwk")
        .arg("--target")
        .arg("T")
        .arg("-o")
        .arg(outfile.to_str().unwrap())
        .assert()
        .success();

    let content = std::fs::read_to_string(&outfile)?;
    assert_eq!(content.lines().count(), 4);

    Ok(())
}

#[test]
fn command_infer_tree_mismatch() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    cmd.arg("infer")
        .arg("tests/perm/two_refs.txt")
        .arg("--tree")
        .arg("tests/newick/at.nwk")
        .arg("--target")
        .arg("T")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Genome \"B\" is not a leaf of the phylogeny",
        ));

    Ok(())
}

#[test]
fn command_infer_unused_leaf() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    cmd.arg("infer")
        .arg("tests/perm/two_refs.txt")
        .arg("--tree")
        .arg("tests/newick/abct.nwk")
        .arg("--target")
        .arg("T")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Leaf \"C\" of the phylogeny names none of the genomes in use",
        ));

    Ok(())
}

#[test]
fn command_infer_reference_outside_target() -> anyhow::Result<()> {
    // C shares no block with T and is emptied by --target-blocks-only
    let mut cmd = Command::cargo_bin("ragr")?;
    let output = cmd
        .arg("infer")
        .arg("stdin")
        .arg("--tree")
        .arg("tests/newick/abct.nwk")
        .arg("--target")
        .arg("T")
        .arg("--target-blocks-only")
        .write_stdin(
            ">A.chr1\n+1 +2 +3 $\n>B.chr1\n+1 +3 +2 $\n>C.chr1\n+7 +8 $\n>T.ctg1\n+1 +3 +2 $\n",
        )
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, "-3\t-1\n-2\t-3\n+1\t+3\n+3\t+2\n");

    Ok(())
}

#[test]
fn command_infer_reference_all_duplicated() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    let output = cmd
        .arg("infer")
        .arg("stdin")
        .arg("--tree")
        .arg("tests/newick/abct.nwk")
        .arg("--target")
        .arg("T")
        .write_stdin(
            ">A.chr1\n+1 +2 +3 $\n>B.chr1\n+1 +3 +2 $\n>C.chr1\n+9 $\n>C.chr2\n+9 $\n>T.ctg1\n+1 +3 +2 $\n",
        )
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, "-3\t-1\n-2\t-3\n+1\t+3\n+3\t+2\n");

    Ok(())
}

#[test]
fn command_infer_bad_tree() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("ragr")?;
    cmd.arg("infer")
        .arg("tests/perm/two_refs.txt")
        .arg("--tree")
        .arg("stdin")
        .arg("--target")
        .arg("T")
        .write_stdin("((A,B),T")
        .assert()
        .failure();

    Ok(())
}
