use super::error::PermError;
use super::permutation::Permutation;
use anyhow::Context;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Which genomes take part in a reconstruction and which one is the target.
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    pub target: String,
    /// Genomes to use. Empty means every genome of the input.
    pub genomes: Vec<String>,
    /// Drop reference blocks that never occur in the target
    pub restrict_to_target: bool,
}

impl Recipe {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_genomes(mut self, genomes: Vec<String>) -> Self {
        self.genomes = genomes;
        self
    }

    pub fn with_restrict_to_target(mut self, restrict: bool) -> Self {
        self.restrict_to_target = restrict;
        self
    }

    fn uses(&self, genome: &str) -> bool {
        genome == self.target || self.genomes.is_empty() || self.genomes.iter().any(|g| g == genome)
    }
}

/// Reference and target permutations, before and after duplication filtering.
#[derive(Debug, Clone)]
pub struct PermutationContainer {
    pub ref_perms: Vec<Permutation>,
    pub target_perms: Vec<Permutation>,
    pub ref_perms_filtered: Vec<Permutation>,
    pub target_perms_filtered: Vec<Permutation>,
    /// Block ids seen more than once within a genome
    pub duplications: BTreeSet<u32>,
    target: String,
}

impl PermutationContainer {
    /// Split `permutations` by the recipe and filter duplicated blocks.
    ///
    /// Fails when no reference or no target permutation keeps a block.
    pub fn new(permutations: Vec<Permutation>, recipe: &Recipe) -> Result<Self, PermError> {
        let mut ref_perms = Vec::new();
        let mut target_perms = Vec::new();
        for perm in permutations {
            if !recipe.uses(&perm.genome_name) {
                continue;
            }
            if perm.genome_name == recipe.target {
                target_perms.push(perm);
            } else {
                ref_perms.push(perm);
            }
        }

        log::debug!("Read {} reference sequences", ref_perms.len());
        if ref_perms.is_empty() {
            return Err(PermError::NoReferenceBlocks);
        }
        log::debug!("Read {} target sequences", target_perms.len());
        if target_perms.is_empty() {
            return Err(PermError::NoTargetBlocks {
                target: recipe.target.clone(),
            });
        }

        let duplications = find_duplications(ref_perms.iter().chain(target_perms.iter()));
        if !duplications.is_empty() {
            log::debug!("Dropping {} duplicated blocks", duplications.len());
        }

        let target_perms_filtered: Vec<Permutation> = target_perms
            .iter()
            .map(|p| filter_permutation(p, |id| !duplications.contains(&id)))
            .filter(|p| !p.is_empty())
            .collect();
        let target_blocks: HashSet<u32> = target_perms_filtered
            .iter()
            .flat_map(|p| p.blocks.iter().map(|b| b.block_id))
            .collect();

        let ref_perms_filtered: Vec<Permutation> = ref_perms
            .iter()
            .map(|p| {
                filter_permutation(p, |id| {
                    !duplications.contains(&id)
                        && (!recipe.restrict_to_target || target_blocks.contains(&id))
                })
            })
            .filter(|p| !p.is_empty())
            .collect();

        if ref_perms_filtered.is_empty() {
            return Err(PermError::NoReferenceBlocks);
        }
        if target_perms_filtered.is_empty() {
            return Err(PermError::NoTargetBlocks {
                target: recipe.target.clone(),
            });
        }

        Ok(Self {
            ref_perms,
            target_perms,
            ref_perms_filtered,
            target_perms_filtered,
            duplications,
            target: recipe.target.clone(),
        })
    }

    /// Read a permutation file and build the container from it.
    pub fn from_file(infile: &str, recipe: &Recipe) -> anyhow::Result<Self> {
        let permutations = super::format::read_permutations(infile)?;
        let container = Self::new(permutations, recipe)
            .with_context(|| format!("no usable synteny blocks in {}", infile))?;
        Ok(container)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Reference genome names in order of first appearance.
    ///
    /// Genomes whose blocks were all filtered out are listed too.
    pub fn reference_genomes(&self) -> Vec<String> {
        let mut genomes: Vec<String> = Vec::new();
        for perm in &self.ref_perms {
            if !genomes.contains(&perm.genome_name) {
                genomes.push(perm.genome_name.clone());
            }
        }
        genomes
    }
}

/// Block ids occurring more than once within the permutations of a single genome.
///
/// ```
/// use ragr::libs::synteny::{find_duplications, Permutation};
///
/// let perms = vec![
///     Permutation::from_signed("a", "1", &[1, 2]),
///     Permutation::from_signed("a", "2", &[-2, 3]),
///     Permutation::from_signed("b", "1", &[1, 2, 3]),
/// ];
/// let dups = find_duplications(perms.iter());
/// assert_eq!(dups.into_iter().collect::<Vec<_>>(), vec![2]);
/// ```
pub fn find_duplications<'a, I>(perms: I) -> BTreeSet<u32>
where
    I: IntoIterator<Item = &'a Permutation>,
{
    let mut index: HashMap<u32, HashSet<&str>> = HashMap::new();
    let mut duplications = BTreeSet::new();

    for perm in perms {
        for block in &perm.blocks {
            let genomes = index.entry(block.block_id).or_default();
            if !genomes.insert(perm.genome_name.as_str()) {
                duplications.insert(block.block_id);
            }
        }
    }

    duplications
}

/// A copy of `perm` holding only the blocks whose id passes `keep`.
pub fn filter_permutation<F>(perm: &Permutation, keep: F) -> Permutation
where
    F: Fn(u32) -> bool,
{
    let blocks = perm
        .blocks
        .iter()
        .filter(|b| keep(b.block_id))
        .copied()
        .collect();
    Permutation {
        genome_name: perm.genome_name.clone(),
        chr_name: perm.chr_name.clone(),
        chr_id: perm.chr_id,
        chr_len: perm.chr_len,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms() -> Vec<Permutation> {
        vec![
            Permutation::from_signed("ref1", "chr1", &[1, 2, 3, 4, 5]),
            Permutation::from_signed("ref1", "chr2", &[-4, 6]),
            Permutation::from_signed("ref2", "chr1", &[1, -3, 2, 7]),
            Permutation::from_signed("tgt", "ctg1", &[1, 2]),
            Permutation::from_signed("tgt", "ctg2", &[3, 4, 5, 6]),
        ]
    }

    #[test]
    fn test_duplications_dropped_everywhere() {
        let container = PermutationContainer::new(perms(), &Recipe::new("tgt")).unwrap();
        assert_eq!(container.duplications, BTreeSet::from([4]));

        for perm in container
            .ref_perms_filtered
            .iter()
            .chain(container.target_perms_filtered.iter())
        {
            assert!(perm.blocks.iter().all(|b| b.block_id != 4));
        }

        assert_eq!(container.ref_perms_filtered[0].signed_ids(), vec![1, 2, 3, 5]);
        assert_eq!(container.ref_perms_filtered[1].signed_ids(), vec![6]);
        assert_eq!(container.target_perms_filtered[1].signed_ids(), vec![3, 5, 6]);
        // the unfiltered sets are kept untouched
        assert_eq!(container.ref_perms[1].signed_ids(), vec![-4, 6]);
    }

    #[test]
    fn test_restrict_to_target() {
        let recipe = Recipe::new("tgt").with_restrict_to_target(true);
        let container = PermutationContainer::new(perms(), &recipe).unwrap();
        assert_eq!(container.ref_perms_filtered[2].signed_ids(), vec![1, -3, 2]);

        let container = PermutationContainer::new(perms(), &Recipe::new("tgt")).unwrap();
        assert_eq!(container.ref_perms_filtered[2].signed_ids(), vec![1, -3, 2, 7]);
    }

    #[test]
    fn test_recipe_genomes() {
        let recipe = Recipe::new("tgt").with_genomes(vec!["ref2".to_string()]);
        let container = PermutationContainer::new(perms(), &recipe).unwrap();
        assert_eq!(container.reference_genomes(), vec!["ref2".to_string()]);
        assert_eq!(container.target(), "tgt");
        assert_eq!(container.target_perms.len(), 2);
    }

    #[test]
    fn test_emptied_reference_genome_kept() {
        // every block of ref3 is duplicated
        let mut input = perms();
        input.push(Permutation::from_signed("ref3", "chr1", &[8]));
        input.push(Permutation::from_signed("ref3", "chr2", &[-8]));
        let container = PermutationContainer::new(input, &Recipe::new("tgt")).unwrap();
        assert!(container
            .ref_perms_filtered
            .iter()
            .all(|p| p.genome_name != "ref3"));
        assert_eq!(
            container.reference_genomes(),
            vec!["ref1".to_string(), "ref2".to_string(), "ref3".to_string()]
        );

        // ref3 shares no block with the target
        let mut input = perms();
        input.push(Permutation::from_signed("ref3", "chr1", &[9, 10]));
        let recipe = Recipe::new("tgt").with_restrict_to_target(true);
        let container = PermutationContainer::new(input, &recipe).unwrap();
        assert_eq!(container.ref_perms_filtered.len(), 3);
        assert_eq!(container.reference_genomes().len(), 3);
    }

    #[test]
    fn test_missing_target() {
        let err = PermutationContainer::new(perms(), &Recipe::new("nope")).unwrap_err();
        assert_eq!(
            err,
            PermError::NoTargetBlocks {
                target: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_missing_references() {
        let input = vec![Permutation::from_signed("tgt", "ctg1", &[1, 2])];
        let err = PermutationContainer::new(input, &Recipe::new("tgt")).unwrap_err();
        assert_eq!(err, PermError::NoReferenceBlocks);
    }

    #[test]
    fn test_everything_filtered() {
        // every target block is duplicated
        let input = vec![
            Permutation::from_signed("ref", "chr1", &[1, 2]),
            Permutation::from_signed("tgt", "ctg1", &[1, 1]),
        ];
        let err = PermutationContainer::new(input, &Recipe::new("tgt")).unwrap_err();
        assert!(matches!(err, PermError::NoTargetBlocks { .. }));
    }
}
