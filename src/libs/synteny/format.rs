//! The plain signed-permutation text format.
//!
//! ```text
//! >genome.chromosome
//! +1 -2 +3 $
//! ```
use super::block::Block;
use super::error::PermError;
use super::permutation::Permutation;
use itertools::Itertools;
use std::io::Write;

/// Parse permutations from `content`. `file` is only used in error messages.
///
/// ```
/// use ragr::libs::synteny::format::parse_permutations;
///
/// let perms = parse_permutations(">human.chr1\n+1 -2 +3 $\n", "stdin").unwrap();
/// assert_eq!(perms[0].genome_name, "human");
/// assert_eq!(perms[0].signed_ids(), vec![1, -2, 3]);
/// ```
pub fn parse_permutations(content: &str, file: &str) -> Result<Vec<Permutation>, PermError> {
    let mut permutations: Vec<Permutation> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('>') {
            let (genome, chr) = match name.split_once('.') {
                Some((genome, chr)) if !genome.is_empty() && !chr.is_empty() => (genome, chr),
                _ => {
                    return Err(PermError::NamingError {
                        file: file.to_string(),
                        line: line_no,
                        name: name.to_string(),
                    })
                }
            };
            permutations.push(Permutation::new(genome, chr, permutations.len()));
            continue;
        }

        let perm = match permutations.last_mut() {
            Some(perm) => perm,
            None => {
                return Err(PermError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    message: "blocks found before any '>' header".to_string(),
                })
            }
        };

        for token in line.split_whitespace() {
            if token == "$" {
                break;
            }
            let signed_id = parse_signed_id(token).ok_or_else(|| PermError::ParseError {
                file: file.to_string(),
                line: line_no,
                message: format!("invalid block \"{}\"", token),
            })?;
            perm.blocks.push(Block::from_signed(signed_id));
        }
    }

    Ok(permutations)
}

fn parse_signed_id(token: &str) -> Option<i64> {
    let id = token.parse::<i64>().ok()?;
    if id == 0 || id.unsigned_abs() > u32::MAX as u64 {
        return None;
    }
    Some(id)
}

/// Read permutations from a file, `stdin` or a `.gz` file.
pub fn read_permutations(infile: &str) -> anyhow::Result<Vec<Permutation>> {
    let content = crate::libs::io::read_to_string(infile)?;
    let permutations = parse_permutations(&content, infile)?;
    if permutations.is_empty() {
        anyhow::bail!("Error reading permutations from {}", infile);
    }
    Ok(permutations)
}

/// `+3` or `-3`
pub fn format_signed(signed_id: i64) -> String {
    format!("{:+}", signed_id)
}

pub fn write_permutations(permutations: &[Permutation], writer: &mut dyn Write) -> std::io::Result<()> {
    for perm in permutations {
        writeln!(writer, ">{}", perm.name())?;
        let blocks = perm
            .blocks
            .iter()
            .map(|b| format_signed(b.signed_id()))
            .join(" ");
        if blocks.is_empty() {
            writeln!(writer, "$")?;
        } else {
            writeln!(writer, "{} $", blocks)?;
        }
    }
    Ok(())
}
