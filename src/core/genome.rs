//! Chromosome catalogs and genome queries.
//!
//! A [`Genome`] is the ordered chromosome catalog of one build; every
//! chromosome carries a dense integer id assigned by catalog order, which
//! the containers in this crate use for array addressing. A
//! [`GenomeQuery`] fixes an ordered chromosome subset of one genome and
//! serves as the immutable key domain for [`crate::core::genome_map`]
//! containers. It also resolves free-form chromosome names ("chr1", "1",
//! "CHR1") back to catalog entries when loading persisted data.

use crate::core::error::UnknownChromosome;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named sequence within one genome build.
///
/// Cheap to clone: the name and build tag are shared `Arc<str>`s.
#[derive(Debug, Clone)]
pub struct Chromosome {
    id: usize,
    name: Arc<str>,
    length: u32,
    build: Arc<str>,
}

impl Chromosome {
    /// Dense id, stable within one genome build, usable as an array index.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Build tag of the owning genome, e.g. `"hg38"`.
    pub fn build(&self) -> &str {
        &self.build
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.build == other.build
    }
}

impl Eq for Chromosome {}

impl std::hash::Hash for Chromosome {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.build.hash(state);
    }
}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Chromosome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.build
            .cmp(&other.build)
            .then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered chromosome catalog for one genome build.
#[derive(Debug)]
pub struct Genome {
    build: Arc<str>,
    chromosomes: Vec<Chromosome>,
}

impl Genome {
    /// Creates a catalog; ids are assigned by catalog order.
    pub fn new(build: &str, chromosomes: &[(&str, u32)]) -> Arc<Genome> {
        let build: Arc<str> = Arc::from(build);
        let chromosomes = chromosomes
            .iter()
            .enumerate()
            .map(|(id, &(name, length))| Chromosome {
                id,
                name: Arc::from(name),
                length,
                build: Arc::clone(&build),
            })
            .collect();

        Arc::new(Genome { build, chromosomes })
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Number of chromosomes in the catalog, i.e. the id capacity.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}

/// Normalize chromosome name for flexible matching
///
/// Converts to lowercase and removes the common "chr" prefix.
fn normalize_chrom_key(chrom: &str) -> String {
    let lower = chrom.to_lowercase();
    match lower.strip_prefix("chr") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// An ordered, fixed chromosome subset of one genome.
///
/// The subset defines the key domain of every map built against it and
/// never changes after construction.
#[derive(Debug, Clone)]
pub struct GenomeQuery {
    genome: Arc<Genome>,
    chromosomes: Vec<Chromosome>,
    /// Chromosome id -> position within [`Self::chromosomes`].
    positions: Vec<Option<usize>>,
    /// Normalized chromosome name -> position within [`Self::chromosomes`].
    by_name: HashMap<String, usize>,
}

impl GenomeQuery {
    /// A query over every chromosome of the genome, in catalog order.
    pub fn new(genome: &Arc<Genome>) -> GenomeQuery {
        let chromosomes = genome.chromosomes().to_vec();
        Self::from_chromosomes(Arc::clone(genome), chromosomes)
    }

    /// A query restricted to the given chromosome names, in catalog order.
    pub fn with_names(
        genome: &Arc<Genome>,
        names: &[&str],
    ) -> Result<GenomeQuery, UnknownChromosome> {
        let full = Self::new(genome);
        let mut keep = vec![false; genome.len()];
        for &name in names {
            let chromosome = full.resolve(name).ok_or_else(|| UnknownChromosome {
                name: name.to_string(),
                build: genome.build().to_string(),
            })?;
            keep[chromosome.id()] = true;
        }

        let chromosomes = genome
            .chromosomes()
            .iter()
            .filter(|c| keep[c.id()])
            .cloned()
            .collect();
        Ok(Self::from_chromosomes(Arc::clone(genome), chromosomes))
    }

    fn from_chromosomes(genome: Arc<Genome>, chromosomes: Vec<Chromosome>) -> GenomeQuery {
        let mut positions = vec![None; genome.len()];
        let mut by_name = HashMap::with_capacity(2 * chromosomes.len());
        for (position, chromosome) in chromosomes.iter().enumerate() {
            positions[chromosome.id()] = Some(position);
            by_name.insert(chromosome.name().to_string(), position);
            by_name.insert(normalize_chrom_key(chromosome.name()), position);
        }

        GenomeQuery {
            genome,
            chromosomes,
            positions,
            by_name,
        }
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn build(&self) -> &str {
        self.genome.build()
    }

    /// The ordered key domain.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Number of chromosomes in the query.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Resolves a free-form chromosome name against the query.
    ///
    /// Accepts the catalog spelling as well as the usual naming variants
    /// ("chr1", "1", "CHR1"). Returns `None` for chromosomes outside the
    /// query.
    pub fn resolve(&self, name: &str) -> Option<&Chromosome> {
        let position = match self.by_name.get(name) {
            Some(&position) => position,
            None => *self.by_name.get(&normalize_chrom_key(name))?,
        };
        Some(&self.chromosomes[position])
    }

    /// Position of a chromosome within the query, validating the build tag.
    pub(crate) fn position_of(&self, chromosome: &Chromosome) -> Option<usize> {
        if chromosome.build() != self.build() {
            return None;
        }
        self.positions.get(chromosome.id()).copied().flatten()
    }
}

impl PartialEq for GenomeQuery {
    fn eq(&self, other: &Self) -> bool {
        self.build() == other.build()
            && self.chromosomes.len() == other.chromosomes.len()
            && self
                .chromosomes
                .iter()
                .zip(&other.chromosomes)
                .all(|(a, b)| a.name() == b.name())
    }
}

impl Eq for GenomeQuery {}

impl fmt::Display for GenomeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{} chromosomes]", self.build(), self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_genome() -> Arc<Genome> {
        Genome::new("to1", &[("chr1", 1000), ("chr2", 2000), ("chrX", 500)])
    }

    #[test]
    fn test_dense_ids() {
        let genome = test_genome();
        let ids: Vec<usize> = genome.chromosomes().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(genome.chromosomes()[2].name(), "chrX");
    }

    #[test]
    fn test_query_all() {
        let genome = test_genome();
        let query = GenomeQuery::new(&genome);
        assert_eq!(query.len(), 3);
        assert_eq!(query.build(), "to1");
    }

    #[test]
    fn test_query_subset_preserves_catalog_order() {
        let genome = test_genome();
        let query = GenomeQuery::with_names(&genome, &["chrX", "chr1"]).unwrap();
        let names: Vec<&str> = query.chromosomes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["chr1", "chrX"]);
    }

    #[test]
    fn test_query_unknown_name() {
        let genome = test_genome();
        let err = GenomeQuery::with_names(&genome, &["chr7"]).unwrap_err();
        assert_eq!(err.name, "chr7");
        assert_eq!(err.build, "to1");
    }

    #[test]
    fn test_resolve_name_variants() {
        let genome = test_genome();
        let query = GenomeQuery::new(&genome);

        assert_eq!(query.resolve("chr1").map(|c| c.id()), Some(0));
        assert_eq!(query.resolve("1").map(|c| c.id()), Some(0));
        assert_eq!(query.resolve("CHR1").map(|c| c.id()), Some(0));
        assert_eq!(query.resolve("Chr2").map(|c| c.id()), Some(1));
        assert_eq!(query.resolve("x").map(|c| c.id()), Some(2));
        assert!(query.resolve("chr7").is_none());
    }

    #[test]
    fn test_resolve_outside_subset() {
        let genome = test_genome();
        let query = GenomeQuery::with_names(&genome, &["chr2"]).unwrap();
        assert!(query.resolve("chr1").is_none());
        assert!(query.resolve("chr2").is_some());
    }

    #[test]
    fn test_position_of_foreign_build() {
        let genome = test_genome();
        let query = GenomeQuery::new(&genome);

        let foreign = Genome::new("to2", &[("chr1", 1000)]);
        let chromosome = foreign.chromosomes()[0].clone();
        assert!(query.position_of(&chromosome).is_none());
    }

    #[test]
    fn test_query_equality() {
        let genome = test_genome();
        let all = GenomeQuery::new(&genome);
        let same = GenomeQuery::new(&genome);
        let subset = GenomeQuery::with_names(&genome, &["chr1"]).unwrap();

        assert_eq!(all, same);
        assert_ne!(all, subset);
    }
}
