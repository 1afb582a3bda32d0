//! Error types for genome-loci
//!
//! Defines all error types used throughout the library. Every condition
//! here is local and fail-fast; nothing is retried inside this crate.

use crate::core::range::Strand;
use thiserror::Error;

/// Main error type for genome-loci operations
#[derive(Debug, Error)]
pub enum GenomeLociError {
    /// Map access outside the fixed key domain
    #[error("{0}")]
    NoSuchKey(#[from] NoSuchKey),

    /// Set algebra across different genome queries
    #[error("{0}")]
    MismatchedDomain(#[from] MismatchedDomain),

    /// Persisted location-list parsing errors
    #[error("loci parse error: {0}")]
    LociParse(#[from] LociParseError),

    /// Virtual coordinate index construction errors
    #[error("virtual index error: {0}")]
    VirtualIndex(#[from] VirtualIndexError),

    /// Unknown chromosome name in a genome query definition
    #[error("{0}")]
    UnknownChromosome(#[from] UnknownChromosome),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// `get`/`set` on a chromosome (or chromosome + strand) outside a map's
/// fixed key domain, or whose build tag does not match the map's build.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no value for chromosome '{chromosome}' of build '{build}' in a map over build '{domain}'")]
pub struct NoSuchKey {
    /// Chromosome name as requested.
    pub chromosome: String,
    /// Build tag of the requested chromosome.
    pub build: String,
    /// Strand of the request, when the map is strand-aware.
    pub strand: Option<Strand>,
    /// Build tag of the map's key domain.
    pub domain: String,
}

/// `union`/`intersect` across two location lists built from different
/// genome queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("mismatched genome queries: '{left}' vs '{right}'")]
pub struct MismatchedDomain {
    pub left: String,
    pub right: String,
}

/// Unknown chromosome name when defining a genome query subset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown chromosome '{name}' in build '{build}'")]
pub struct UnknownChromosome {
    pub name: String,
    pub build: String,
}

/// Errors that can occur while reading a persisted location list
#[derive(Debug, Error)]
pub enum LociParseError {
    /// Malformed record
    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Strand field must be '+' or '-'
    #[error("invalid strand '{strand}' at line {line}")]
    InvalidStrand { line: usize, strand: String },

    /// Header declares a format version this build cannot read
    #[error("unsupported loci format version '{found}', expected 'v1'")]
    UnsupportedVersion { found: String },

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while building a virtual coordinate index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VirtualIndexError {
    /// No loci to index
    #[error("cannot build a virtual coordinate index over zero loci")]
    EmptyInput,

    /// Zero-length loci would break the strictly increasing prefix sums
    #[error("zero-length locus {0} is not indexable")]
    EmptyLocus(String),
}

/// Result type alias for genome-loci operations
pub type Result<T> = std::result::Result<T, GenomeLociError>;

/// Result type alias for loci parsing operations
pub type LociResult<T> = std::result::Result<T, LociParseError>;
