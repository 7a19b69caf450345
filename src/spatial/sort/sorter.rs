#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::network::{BitonicNetwork, BitonicPass};

/// Key for padding slots; sorts after every valid cell hash.
pub const PAD_KEY: u32 = u32::MAX;

/// Elements per rayon task; keeps the short-stride passes from splitting
/// into thousands of two-element jobs.
#[cfg(feature = "parallel")]
const PAR_GRAIN: usize = 4096;

/// Bitonic key/value sorter with reusable power-of-two scratch.
///
/// Inputs of any length are copied into the scratch, padded with
/// [`PAD_KEY`], sorted through the full network and truncated back. Equal
/// keys come out in no particular order.
pub struct BitonicSorter {
    keys: Vec<u32>,
    values: Vec<u32>,
}

impl BitonicSorter {
    pub fn new(capacity: usize) -> Self {
        let padded = capacity.max(1).next_power_of_two();
        BitonicSorter {
            keys: vec![PAD_KEY; padded],
            values: vec![PAD_KEY; padded],
        }
    }

    /// Current scratch length (always a power of two).
    pub fn padded_len(&self) -> usize {
        self.keys.len()
    }

    /// Sort `(hashes_in[i], indices_in[i])` ascending by hash into the output
    /// slices. All four slices must have the same length.
    pub fn sort(
        &mut self,
        hashes_out: &mut [u32],
        indices_out: &mut [u32],
        hashes_in: &[u32],
        indices_in: &[u32],
    ) {
        let n = hashes_in.len();
        assert_eq!(indices_in.len(), n, "sort: index input length mismatch");
        assert_eq!(hashes_out.len(), n, "sort: hash output length mismatch");
        assert_eq!(indices_out.len(), n, "sort: index output length mismatch");
        debug_assert!(
            hashes_in.iter().all(|&h| h != PAD_KEY),
            "sort: input contains the padding key"
        );

        if n == 0 {
            return;
        }

        let padded = n.next_power_of_two();
        if padded > self.keys.len() {
            log::warn!("bitonic scratch grown from {} to {}", self.keys.len(), padded);
            self.keys.resize(padded, PAD_KEY);
            self.values.resize(padded, PAD_KEY);
        }

        let keys = &mut self.keys[..padded];
        let values = &mut self.values[..padded];
        keys[..n].copy_from_slice(hashes_in);
        keys[n..].fill(PAD_KEY);
        values[..n].copy_from_slice(indices_in);
        values[n..].fill(PAD_KEY);

        for pass in BitonicNetwork::new(padded) {
            run_pass(keys, values, pass);
        }

        hashes_out.copy_from_slice(&keys[..n]);
        indices_out.copy_from_slice(&values[..n]);
    }
}

/// One network pass. The slice splits into independent `2 * distance` spans;
/// inside a span the lower half is compared against the upper half.
fn run_pass(keys: &mut [u32], values: &mut [u32], pass: BitonicPass) {
    let span = pass.distance * 2;

    #[cfg(feature = "parallel")]
    {
        keys.par_chunks_mut(span)
            .zip(values.par_chunks_mut(span))
            .enumerate()
            .with_min_len((PAR_GRAIN / span).max(1))
            .for_each(|(c, (k, v))| merge_span(k, v, c * span, pass));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (c, (k, v)) in keys.chunks_mut(span).zip(values.chunks_mut(span)).enumerate() {
            merge_span(k, v, c * span, pass);
        }
    }
}

#[inline(always)]
fn merge_span(keys: &mut [u32], values: &mut [u32], base: usize, pass: BitonicPass) {
    // block >= span, so the whole span shares one direction.
    let ascending = pass.ascending(base);
    let (k_lo, k_hi) = keys.split_at_mut(pass.distance);
    let (v_lo, v_hi) = values.split_at_mut(pass.distance);

    for t in 0..pass.distance {
        let out_of_order = if ascending {
            k_lo[t] > k_hi[t]
        } else {
            k_lo[t] < k_hi[t]
        };
        if out_of_order {
            std::mem::swap(&mut k_lo[t], &mut k_hi[t]);
            std::mem::swap(&mut v_lo[t], &mut v_hi[t]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_pairs(hashes: &[u32]) -> (Vec<u32>, Vec<u32>) {
        let indices: Vec<u32> = (0..hashes.len() as u32).collect();
        let mut out_h = vec![0u32; hashes.len()];
        let mut out_i = vec![0u32; hashes.len()];
        BitonicSorter::new(hashes.len()).sort(&mut out_h, &mut out_i, hashes, &indices);
        (out_h, out_i)
    }

    #[test]
    fn sorts_power_of_two_input() {
        let (h, i) = sort_pairs(&[7, 3, 5, 1, 6, 2, 4, 0]);
        assert_eq!(h, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(i, vec![7, 3, 5, 1, 6, 2, 4, 0]);
    }

    #[test]
    fn sorts_non_power_of_two_input() {
        let hashes = [40, 2, 19, 2, 77, 0, 19, 5, 3, 1, 8];
        let (h, i) = sort_pairs(&hashes);
        let mut expected = hashes.to_vec();
        expected.sort_unstable();
        assert_eq!(h, expected);
        for (p, &orig) in i.iter().enumerate() {
            assert_eq!(hashes[orig as usize], h[p]);
        }
    }

    #[test]
    fn keeps_duplicates_as_distinct_indices() {
        let (h, mut i) = sort_pairs(&[9, 9, 9, 1, 9]);
        assert_eq!(h, vec![1, 9, 9, 9, 9]);
        assert_eq!(i[0], 3);
        i.sort_unstable();
        assert_eq!(i, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_and_single_inputs() {
        assert_eq!(sort_pairs(&[]), (vec![], vec![]));
        assert_eq!(sort_pairs(&[12]), (vec![12], vec![0]));
    }

    #[test]
    fn scratch_is_reused_and_grown() {
        let mut sorter = BitonicSorter::new(4);
        assert_eq!(sorter.padded_len(), 4);

        let hashes: Vec<u32> = (0..6).rev().collect();
        let indices: Vec<u32> = (0..6).collect();
        let mut out_h = vec![0u32; 6];
        let mut out_i = vec![0u32; 6];
        sorter.sort(&mut out_h, &mut out_i, &hashes, &indices);
        assert_eq!(sorter.padded_len(), 8);
        assert_eq!(out_h, vec![0, 1, 2, 3, 4, 5]);

        // Shorter input after a longer one must not pick up stale keys.
        let mut out_h = vec![0u32; 3];
        let mut out_i = vec![0u32; 3];
        sorter.sort(&mut out_h, &mut out_i, &[2, 0, 1], &[0, 1, 2]);
        assert_eq!(out_h, vec![0, 1, 2]);
        assert_eq!(out_i, vec![1, 2, 0]);
    }
}
