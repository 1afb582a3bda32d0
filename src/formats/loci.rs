//! Tab-delimited location-list persistence.
//!
//! One record per location: `chromosome <TAB> start <TAB> end <TAB>
//! strand`, with extra trailing fields tolerated on read. The writer
//! emits a `#loci v1` header and records in ascending chromosome /
//! strand / start order; the reader accepts records in any order.
//! Records whose chromosome name the genome query cannot resolve are
//! dropped, not an error, so a list saved against a wider query loads
//! cleanly into a narrower one. Everything else malformed fails fast
//! with a line number.
//!
//! Files with a `.gz` or `.bz2` extension (or the matching magic bytes)
//! are transparently (de)compressed.

use crate::core::error::{GenomeLociError, LociParseError, LociResult, Result};
use crate::core::genome::GenomeQuery;
use crate::core::location_list::LocationList;
use crate::core::range::{Location, Strand};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Format tag written as the first line of every saved list.
const HEADER: &str = "#loci v1";

/// Compression format of a persisted location list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detects compression by file extension, falling back to magic bytes.
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

fn open_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;
    Ok(match format {
        CompressionFormat::Plain => Box::new(BufReader::new(file)),
        CompressionFormat::Gzip => Box::new(BufReader::new(flate2::read::GzDecoder::new(file))),
        CompressionFormat::Bzip2 => Box::new(BufReader::new(bzip2::read::BzDecoder::new(file))),
    })
}

fn open_writer(path: &Path) -> io::Result<Box<dyn Write>> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let file = File::create(path)?;
    Ok(match extension {
        "gz" => Box::new(BufWriter::new(flate2::write::GzEncoder::new(
            file,
            flate2::Compression::default(),
        ))),
        "bz2" => Box::new(BufWriter::new(bzip2::write::BzEncoder::new(
            file,
            bzip2::Compression::default(),
        ))),
        _ => Box::new(BufWriter::new(file)),
    })
}

/// Writes a location list to `path`.
pub fn save(list: &LocationList, path: &Path) -> Result<()> {
    let mut writer = open_writer(path).map_err(GenomeLociError::Io)?;
    let mut records = 0u64;
    writeln!(writer, "{}", HEADER).map_err(GenomeLociError::Io)?;
    for location in list.iter() {
        write_record(&mut writer, &location).map_err(GenomeLociError::Io)?;
        records += 1;
    }
    writer.flush().map_err(GenomeLociError::Io)?;

    info!("saved {} locations to {}", records, path.display());
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, location: &Location) -> io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}",
        location.chromosome.name(),
        location.start,
        location.end,
        location.strand
    )
}

/// Reads a location list from `path`, resolving chromosome names through
/// the query.
pub fn load(genome_query: &GenomeQuery, path: &Path) -> Result<LocationList> {
    let reader = open_reader(path).map_err(GenomeLociError::Io)?;
    let locations = read_locations(genome_query, reader)?;
    info!("loaded {} locations from {}", locations.len(), path.display());

    // Resolved chromosomes come from the query itself, so adding them
    // cannot fail.
    LocationList::new(genome_query, locations).map_err(GenomeLociError::NoSuchKey)
}

/// Parses records from any reader; see the module docs for the format.
pub fn read_locations<R: BufRead>(
    genome_query: &GenomeQuery,
    reader: R,
) -> LociResult<Vec<Location>> {
    let mut locations = Vec::new();
    let mut dropped = 0u64;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        // Lines are 1-based in error messages.
        let number = number + 1;

        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("#loci ") {
            if rest != "v1" {
                return Err(LociParseError::UnsupportedVersion {
                    found: rest.to_string(),
                });
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        match parse_record(genome_query, line, number)? {
            Some(location) => locations.push(location),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("dropped {} records with unresolvable chromosomes", dropped);
    }
    Ok(locations)
}

/// Parses one record; `Ok(None)` means the chromosome name did not
/// resolve and the record is dropped.
fn parse_record(
    genome_query: &GenomeQuery,
    line: &str,
    number: usize,
) -> LociResult<Option<Location>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 4 {
        return Err(LociParseError::InvalidRecord {
            line: number,
            message: format!("expected at least 4 tab-delimited fields, got {}", fields.len()),
        });
    }

    let start: u32 = fields[1].parse().map_err(|e| LociParseError::InvalidRecord {
        line: number,
        message: format!("bad start offset '{}': {}", fields[1], e),
    })?;
    let end: u32 = fields[2].parse().map_err(|e| LociParseError::InvalidRecord {
        line: number,
        message: format!("bad end offset '{}': {}", fields[2], e),
    })?;
    if start > end {
        return Err(LociParseError::InvalidRecord {
            line: number,
            message: format!("inverted range [{}, {})", start, end),
        });
    }

    let strand = match fields[3].chars().next() {
        Some(c) if fields[3].len() == 1 => Strand::from_char(c),
        _ => None,
    }
    .ok_or_else(|| LociParseError::InvalidStrand {
        line: number,
        strand: fields[3].to_string(),
    })?;

    Ok(genome_query
        .resolve(fields[0])
        .map(|chromosome| Location::new(start, end, chromosome.clone(), strand)))
}
