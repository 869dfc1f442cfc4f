//! Index arithmetic on the ring.  Light indices wrap modulo `LIGHT_COUNT`;
//! palette indices wrap modulo the colour count, which `Stage::colour` takes
//! care of.  Mixing the two up is the classic bug here, so the light side
//! lives in one place.

use crate::LIGHT_COUNT;

/// Wrap any index onto the ring
pub fn wrap_light(index: usize) -> usize {
    index % LIGHT_COUNT
}

/// `width` adjacent lights starting at `start`, wrapping past the end
pub fn window(start: usize, width: usize) -> impl Iterator<Item = usize> + Clone {
    (start..start + width).map(wrap_light)
}

/// `base, base+1, .., base+N-1`, each wrapped by `modulus`.  Used for both
/// rings: light neighbours with `LIGHT_COUNT` and colour companions with the
/// colour count.
pub fn consecutive<const N: usize>(base: usize, modulus: usize) -> [usize; N] {
    let modulus = modulus.max(1);
    std::array::from_fn(|offset| (base + offset) % modulus)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_windows_wrap() {
        assert_eq!(window(14, 4).collect::<Vec<_>>(), vec![14, 15, 0, 1]);
        assert_eq!(window(16, 3).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(window(3, 0).count(), 0);
    }

    #[test]
    fn test_consecutive() {
        assert_eq!(consecutive::<5>(15, LIGHT_COUNT), [15, 0, 1, 2, 3]);
        assert_eq!(consecutive::<5>(2, 3), [2, 0, 1, 2, 0]);
        assert_eq!(consecutive::<3>(4, 1), [0, 0, 0]);
        assert_eq!(consecutive::<2>(4, 0), [0, 0]);
    }
}
