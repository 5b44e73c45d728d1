//! Term hash expansion.
//!
//! A term is hashed twice (`xorshift32` and `jenkins32`) and the `k` signature
//! columns are derived by double hashing: `column_i = (h1 + i * h2) & mask`.
//! The same pair of base hashes is used for the document level and for the
//! meta level, only the mask differs.

/// Marsaglia's three-shift xorshift mix (13, 17, 5).
#[inline]
pub fn xorshift32(mut y: u32) -> u32 {
    y ^= y << 13;
    y ^= y >> 17;
    y ^= y << 5;
    y
}

/// Robert Jenkins' six-step 32-bit integer hash.
#[inline]
pub fn jenkins32(mut a: u32) -> u32 {
    a = a.wrapping_add(0x7ed5_5d16).wrapping_add(a << 12);
    a = (a ^ 0xc761_c23c) ^ (a >> 19);
    a = a.wrapping_add(0x1656_67b1).wrapping_add(a << 5);
    a = a.wrapping_add(0xd3a2_646c) ^ (a << 9);
    a = a.wrapping_add(0xfd70_46c5).wrapping_add(a << 3);
    a = (a ^ 0xb55a_4f09) ^ (a >> 16);
    a
}

/// The two base hashes of a single term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermHash {
    pub h1: u32,
    pub h2: u32,
}

impl TermHash {
    #[inline]
    pub fn new(term: u32) -> TermHash {
        TermHash {
            h1: xorshift32(term),
            h2: jenkins32(term),
        }
    }

    /// Yields `count` column indices within the column space described by `mask`
    /// (`width - 1` for a power-of-two width).
    #[inline]
    pub fn positions(self, mask: u32, count: u32) -> impl Iterator<Item = u32> {
        (0..count).map(move |i| self.h1.wrapping_add(i.wrapping_mul(self.h2)) & mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift32_known_values() {
        assert_eq!(xorshift32(0), 0);
        assert_eq!(xorshift32(1), 0x0004_2021);
        assert_eq!(xorshift32(10), 0x0029_414a);
        assert_eq!(xorshift32(u32::MAX), 0x0003_e01f);
    }

    #[test]
    fn test_jenkins32_known_values() {
        assert_eq!(jenkins32(0), 0x6b4e_d927);
        assert_eq!(jenkins32(1), 0xb486_81b6);
        assert_eq!(jenkins32(10), 0x6617_03c4);
        assert_eq!(jenkins32(u32::MAX), 0xfe64_c182);
    }

    #[test]
    fn test_hashes_are_pure() {
        let mut rng = fastrand::Rng::with_seed(90210);
        for _ in 0..1000 {
            let term = rng.u32(..);
            assert_eq!(xorshift32(term), xorshift32(term));
            assert_eq!(jenkins32(term), jenkins32(term));
            assert_eq!(TermHash::new(term), TermHash::new(term));
        }
    }

    #[test]
    fn test_positions() {
        let hash = TermHash::new(10);
        assert_eq!(hash.positions(63, 4).collect::<Vec<_>>(), vec![10, 14, 18, 22]);
        assert_eq!(
            hash.positions(1023, 4).collect::<Vec<_>>(),
            vec![330, 270, 210, 150]
        );
        assert_eq!(
            TermHash::new(30).positions(63, 4).collect::<Vec<_>>(),
            vec![63, 61, 59, 57]
        );
        assert_eq!(hash.positions(63, 0).count(), 0);
    }

    #[test]
    fn test_positions_stay_within_width() {
        let mut rng = fastrand::Rng::with_seed(4417);
        for width in [1u32, 2, 64, 1024, 1 << 20] {
            for _ in 0..200 {
                let hash = TermHash::new(rng.u32(..));
                assert!(hash.positions(width - 1, 8).all(|c| c < width));
            }
        }
    }

    #[test]
    fn test_levels_share_base_hashes() {
        // The narrow level is the wide level's columns reduced by the narrower mask.
        let hash = TermHash::new(12345);
        let wide = hash.positions(1023, 4).collect::<Vec<_>>();
        let narrow = hash.positions(63, 4).collect::<Vec<_>>();
        assert_eq!(wide.iter().map(|c| c & 63).collect::<Vec<_>>(), narrow);
    }
}
