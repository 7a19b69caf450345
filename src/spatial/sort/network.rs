/// One pass of the bitonic network.
///
/// Element `i` is paired with `i ^ distance`. The pair is put in ascending
/// order when `i & block == 0` and descending order otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitonicPass {
    /// Size of the bitonic sequences being merged in this stage.
    pub block: usize,
    /// Stride between compared elements.
    pub distance: usize,
}

impl BitonicPass {
    #[inline(always)]
    pub fn ascending(&self, i: usize) -> bool {
        i & self.block == 0
    }

    /// Partner of `i`, or `None` when `i` is the upper element of its pair.
    #[inline(always)]
    pub fn partner(&self, i: usize) -> Option<usize> {
        let j = i ^ self.distance;
        (j > i).then_some(j)
    }
}

/// Pass generator for a power-of-two length.
///
/// Yields `log2(n) * (log2(n) + 1) / 2` passes. Passes must run in order;
/// everything inside one pass may run concurrently.
#[derive(Clone, Debug)]
pub struct BitonicNetwork {
    len: usize,
    block: usize,
    distance: usize,
}

impl BitonicNetwork {
    pub fn new(len: usize) -> Self {
        assert!(len.is_power_of_two(), "bitonic network needs a power of two, got {}", len);
        BitonicNetwork {
            len,
            block: 2,
            distance: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn pass_count(&self) -> usize {
        let stages = self.len.trailing_zeros() as usize;
        stages * (stages + 1) / 2
    }
}

impl Iterator for BitonicNetwork {
    type Item = BitonicPass;

    fn next(&mut self) -> Option<BitonicPass> {
        if self.block > self.len {
            return None;
        }
        let pass = BitonicPass {
            block: self.block,
            distance: self.distance,
        };
        if self.distance > 1 {
            self.distance /= 2;
        } else {
            self.block *= 2;
            self.distance = self.block / 2;
        }
        Some(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_element_network_order() {
        let passes: Vec<(usize, usize)> = BitonicNetwork::new(8)
            .map(|p| (p.block, p.distance))
            .collect();
        assert_eq!(passes, vec![(2, 1), (4, 2), (4, 1), (8, 4), (8, 2), (8, 1)]);
    }

    #[test]
    fn pass_count_matches_iteration() {
        for shift in 0..12 {
            let net = BitonicNetwork::new(1 << shift);
            assert_eq!(net.pass_count(), net.clone().count());
        }
    }

    #[test]
    fn single_element_has_no_passes() {
        assert_eq!(BitonicNetwork::new(1).count(), 0);
    }

    #[test]
    fn every_element_is_in_exactly_one_pair_per_pass() {
        for pass in BitonicNetwork::new(16) {
            let mut seen = [0u8; 16];
            for i in 0..16 {
                if let Some(j) = pass.partner(i) {
                    seen[i] += 1;
                    seen[j] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "pass {:?}", pass);
        }
    }

    #[test]
    fn final_stage_is_all_ascending() {
        let last_block: Vec<BitonicPass> = BitonicNetwork::new(32).filter(|p| p.block == 32).collect();
        assert!(last_block.iter().all(|p| (0..32).all(|i| p.ascending(i))));
    }

    #[test]
    #[should_panic]
    fn rejects_non_power_of_two() {
        let _ = BitonicNetwork::new(12);
    }
}
