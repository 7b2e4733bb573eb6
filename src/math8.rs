/// Blend two 8-bit values
///
/// `amount_of_b` of 0 returns `a`, 255 returns `b`.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Move `from` toward `to` by at least one step.
///
/// Plain `blend8` stalls when the remaining distance is small and the blend
/// amount rounds to zero, which would leave a fade hanging one unit short.
#[inline]
pub const fn approach8(from: u8, to: u8, amount: u8) -> u8 {
    let blended = blend8(from, to, amount);
    if blended != from || from == to {
        blended
    } else if to > from {
        from + 1
    } else {
        from - 1
    }
}
