//! A lookup table reducing the search space for binary search over a
//! sorted array of `u32` keys.
//!
//! The table buckets elements by their top `bits` bits, so a query only
//! binary-searches the slice belonging to its own bucket. Results are
//! index-equivalent to an unrestricted binary search: identical insertion
//! points, and on duplicate values a found index referring to an equal
//! element.
//!
//! See <https://geidav.wordpress.com/2013/12/29/optimizing-binary-search>.

/// Bucket index over one fixed sorted array.
///
/// The array itself is not stored; callers pass the same data slice to
/// every query. Lookups are pure and need no synchronization.
///
/// ```
/// use genome_loci::BinaryLut;
///
/// let data = [1u32, 2, 4, 8, 16, 32];
/// let lut = BinaryLut::new(&data, 16);
/// assert_eq!(lut.binary_search(&data, 8), Ok(3));
/// assert_eq!(lut.binary_search(&data, 9), Err(4));
/// ```
#[derive(Debug, Clone)]
pub struct BinaryLut {
    /// `index[k]` = position of the first element whose bucket is `k`.
    index: Vec<usize>,
    /// The number of bits to use for LUT indexing.
    bits: u32,
    /// The last occupied bucket. Keys in later buckets search up to the
    /// total number of elements.
    end: usize,
}

impl BinaryLut {
    /// Builds the table in one forward pass, `O(n + 2^bits)`.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < bits < 32`.
    pub fn new(data: &[u32], bits: u32) -> BinaryLut {
        assert!(bits > 0 && bits < u32::BITS, "bits must be in 1..32");
        if data.is_empty() {
            return BinaryLut {
                index: Vec::new(),
                bits,
                end: 0,
            };
        }

        let bucket_of = |key: u32| (key >> (u32::BITS - bits)) as usize;

        // Invariant: index[bucket(x)] = i such that data[i - 1] < x's bucket
        // floor, i.e. the run of x's bucket starts at i.
        let mut index = vec![0usize; (1usize << bits) + 1];
        let mut bound = bucket_of(data[0]);
        let mut ptr = 0;
        for (i, &value) in data.iter().enumerate().skip(1) {
            let next_bound = bucket_of(value);
            index[bound] = ptr;

            if next_bound > bound {
                ptr = i;
                index[bound + 1..next_bound].fill(ptr);
            }

            bound = next_bound;
        }

        index[bound..].fill(ptr);
        BinaryLut { index, bits, end: bound }
    }

    /// Binary search restricted to the key's bucket.
    ///
    /// Returns `Ok(index)` of a matching element or `Err(insertion_point)`
    /// like [`slice::binary_search`]. `data` must be the slice the table
    /// was built from.
    pub fn binary_search(&self, data: &[u32], key: u32) -> Result<usize, usize> {
        if self.index.is_empty() {
            return Err(0);
        }

        let idx = (key >> (u32::BITS - self.bits)) as usize;
        let from = self.index[idx];
        let to = if idx + 1 > self.end {
            data.len()
        } else {
            self.index[idx + 1]
        };

        binary_search_range(data, from, to, key)
    }
}

/// Plain binary search over `data[from..to]` returning positions within
/// the full slice.
pub fn binary_search_range(
    data: &[u32],
    from: usize,
    to: usize,
    key: u32,
) -> Result<usize, usize> {
    match data[from..to].binary_search(&key) {
        Ok(i) => Ok(from + i),
        Err(i) => Err(from + i),
    }
}
