//! Fixed-key containers over the chromosomes of a genome query.
//!
//! Both maps are built once, sequentially or with one rayon task per key,
//! and the constructor returns only after every key has a value. A
//! panicking initializer propagates out of the constructor (rayon rethrows
//! the first panic), so a partially built map is never observable. After
//! construction the key domain is frozen; `get` and `set` on different
//! keys are independent, and `set` on the same key is an atomic
//! last-writer-wins replace.
//!
//! Values are handed out as `Arc<T>` snapshots, so readers are never
//! blocked by a concurrent `set` beyond the length of a slot lock.

use crate::core::error::NoSuchKey;
use crate::core::genome::{Chromosome, GenomeQuery};
use crate::core::range::Strand;
use rayon::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

/// Creates a new genome map from a given `init` function.
///
/// If `parallel` is `false`, initialization is performed sequentially,
/// otherwise `init` runs as a separate rayon task per chromosome.
pub fn genome_map<T, F>(genome_query: &GenomeQuery, parallel: bool, init: F) -> GenomeMap<T>
where
    T: Send + Sync,
    F: Fn(&Chromosome) -> T + Send + Sync,
{
    let values = if parallel {
        genome_query
            .chromosomes()
            .par_iter()
            .map(|chromosome| Arc::new(init(chromosome)))
            .collect()
    } else {
        genome_query
            .chromosomes()
            .iter()
            .map(|chromosome| Arc::new(init(chromosome)))
            .collect()
    };

    GenomeMap {
        genome_query: genome_query.clone(),
        data: into_slots(values),
    }
}

/// Creates a new genome strand map from a given `init` function.
///
/// The key domain is the chromosome set of the query crossed with both
/// strands; see [`genome_map`] for the construction contract.
pub fn genome_strand_map<T, F>(
    genome_query: &GenomeQuery,
    parallel: bool,
    init: F,
) -> GenomeStrandMap<T>
where
    T: Send + Sync,
    F: Fn(&Chromosome, Strand) -> T + Send + Sync,
{
    let keys: Vec<(&Chromosome, Strand)> = genome_query
        .chromosomes()
        .iter()
        .flat_map(|chromosome| Strand::BOTH.map(|strand| (chromosome, strand)))
        .collect();

    let values = if parallel {
        keys.par_iter()
            .map(|&(chromosome, strand)| Arc::new(init(chromosome, strand)))
            .collect()
    } else {
        keys.iter()
            .map(|&(chromosome, strand)| Arc::new(init(chromosome, strand)))
            .collect()
    };

    GenomeStrandMap {
        genome_query: genome_query.clone(),
        data: into_slots(values),
    }
}

fn into_slots<T>(values: Vec<Arc<T>>) -> Vec<RwLock<Arc<T>>> {
    values.into_iter().map(RwLock::new).collect()
}

fn read_slot<T>(slot: &RwLock<Arc<T>>) -> Arc<T> {
    Arc::clone(&slot.read().unwrap_or_else(PoisonError::into_inner))
}

fn no_such_key(
    chromosome: &Chromosome,
    strand: Option<Strand>,
    genome_query: &GenomeQuery,
) -> NoSuchKey {
    NoSuchKey {
        chromosome: chromosome.name().to_string(),
        build: chromosome.build().to_string(),
        strand,
        domain: genome_query.build().to_string(),
    }
}

/// A map with a fixed key domain defined by a [`GenomeQuery`].
///
/// Backed by one slot per query chromosome; the query's dense id table
/// doubles as the presence check, so `get`/`set` are `O(1)` array
/// accesses after build-tag validation.
#[derive(Debug)]
pub struct GenomeMap<T> {
    genome_query: GenomeQuery,
    data: Vec<RwLock<Arc<T>>>,
}

impl<T> GenomeMap<T> {
    pub fn genome_query(&self) -> &GenomeQuery {
        &self.genome_query
    }

    /// Number of keys in the domain.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value for a chromosome.
    ///
    /// Fails with [`NoSuchKey`] for a chromosome outside the query, or
    /// one whose build tag does not match the map's build: a colliding
    /// id from an unrelated genome snapshot must not alias a slot.
    pub fn get(&self, chromosome: &Chromosome) -> Result<Arc<T>, NoSuchKey> {
        let position = self
            .genome_query
            .position_of(chromosome)
            .ok_or_else(|| no_such_key(chromosome, None, &self.genome_query))?;
        Ok(read_slot(&self.data[position]))
    }

    /// Replaces the value for a chromosome, last writer wins.
    pub fn set(&self, chromosome: &Chromosome, value: T) -> Result<(), NoSuchKey> {
        let position = self
            .genome_query
            .position_of(chromosome)
            .ok_or_else(|| no_such_key(chromosome, None, &self.genome_query))?;
        *self.data[position]
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(value);
        Ok(())
    }

    /// Produces a new map by applying `f` to a snapshot of every value,
    /// under the same construction contract as [`genome_map`].
    pub fn map<R, F>(&self, parallel: bool, f: F) -> GenomeMap<R>
    where
        T: Send + Sync,
        R: Send + Sync,
        F: Fn(&T) -> R + Send + Sync,
    {
        let snapshot: Vec<Arc<T>> = self.data.iter().map(read_slot).collect();
        let values = if parallel {
            snapshot.par_iter().map(|value| Arc::new(f(value))).collect()
        } else {
            snapshot.iter().map(|value| Arc::new(f(value))).collect()
        };

        GenomeMap {
            genome_query: self.genome_query.clone(),
            data: into_slots(values),
        }
    }
}

/// A [`GenomeMap`] where every chromosome holds a value per [`Strand`].
#[derive(Debug)]
pub struct GenomeStrandMap<T> {
    genome_query: GenomeQuery,
    /// Chromosome-major layout: `position * 2 + strand.ordinal()`.
    data: Vec<RwLock<Arc<T>>>,
}

impl<T> GenomeStrandMap<T> {
    pub fn genome_query(&self) -> &GenomeQuery {
        &self.genome_query
    }

    /// Number of keys in the domain (chromosomes × strands).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn slot_of(&self, chromosome: &Chromosome, strand: Strand) -> Result<usize, NoSuchKey> {
        let position = self
            .genome_query
            .position_of(chromosome)
            .ok_or_else(|| no_such_key(chromosome, Some(strand), &self.genome_query))?;
        Ok(position * 2 + strand.ordinal())
    }

    /// Returns the value for a `(chromosome, strand)` key; see
    /// [`GenomeMap::get`] for the validation rules.
    pub fn get(&self, chromosome: &Chromosome, strand: Strand) -> Result<Arc<T>, NoSuchKey> {
        let slot = self.slot_of(chromosome, strand)?;
        Ok(read_slot(&self.data[slot]))
    }

    /// Replaces the value for a `(chromosome, strand)` key, last writer
    /// wins.
    pub fn set(&self, chromosome: &Chromosome, strand: Strand, value: T) -> Result<(), NoSuchKey> {
        let slot = self.slot_of(chromosome, strand)?;
        *self.data[slot]
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(value);
        Ok(())
    }

    /// Builds a map from values laid out chromosome-major, `Plus` before
    /// `Minus`. The builder in `location_list` produces exactly this
    /// layout.
    pub(crate) fn from_values(genome_query: GenomeQuery, values: Vec<T>) -> GenomeStrandMap<T> {
        debug_assert_eq!(values.len(), genome_query.len() * 2);
        GenomeStrandMap {
            genome_query,
            data: into_slots(values.into_iter().map(Arc::new).collect()),
        }
    }

    /// Direct bucket access for keys already known to be in the domain.
    pub(crate) fn bucket(&self, position: usize, strand: Strand) -> Arc<T> {
        read_slot(&self.data[position * 2 + strand.ordinal()])
    }

    /// Combines two maps with identical key domains bucket-by-bucket.
    /// Callers check domain equality first.
    pub(crate) fn zip_with<R, F>(&self, other: &GenomeStrandMap<T>, f: F) -> GenomeStrandMap<R>
    where
        F: Fn(&T, &T) -> R,
    {
        debug_assert_eq!(self.genome_query, other.genome_query);
        let values = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| Arc::new(f(&read_slot(a), &read_slot(b))))
            .collect();

        GenomeStrandMap {
            genome_query: self.genome_query.clone(),
            data: into_slots(values),
        }
    }
}
