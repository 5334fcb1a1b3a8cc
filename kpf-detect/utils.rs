/// Check whether a 16-bit circular mask holds at least `min_count` consecutive set bits
pub fn has_consecutive_bits(mask: u16, min_count: usize) -> bool {
    if min_count == 0 || min_count > 16 {
        return false;
    }
    if mask == u16::MAX {
        return true;
    }

    // AND of n rotations keeps a bit only where a run of n starts
    let mut test_mask = mask;
    for i in 1..min_count {
        test_mask &= mask.rotate_right(i as u32);
        if test_mask == 0 {
            return false;
        }
    }

    test_mask != 0
}
