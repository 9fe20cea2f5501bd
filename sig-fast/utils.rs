/// Bit mask of the set positions in a 16-pixel circle
#[inline]
pub(crate) fn circle_mask(pixels: &[bool; 16]) -> u16 {
    pixels
        .iter()
        .enumerate()
        .fold(0u16, |mask, (i, &set)| if set { mask | (1 << i) } else { mask })
}

/// True when at least `min_count` consecutive positions of the circular
/// 16-pixel ring are set.
pub fn has_consecutive_pixels(pixels: &[bool; 16], min_count: usize) -> bool {
    has_consecutive_bits(circle_mask(pixels), min_count)
}

/// Branch-free run test on a 16-bit ring: AND the mask with its rotations.
#[inline]
pub(crate) fn has_consecutive_bits(mask: u16, min_count: usize) -> bool {
    if min_count == 0 || min_count > 16 {
        return false;
    }
    let mut run = mask;
    for i in 1..min_count as u32 {
        run &= mask.rotate_left(i);
        if run == 0 {
            return false;
        }
    }
    run != 0
}
