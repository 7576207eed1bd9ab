//! Sample encoding and saturating arithmetic.

/*
Wire Format
===========

Every stream in this crate carries raw mono PCM: signed 16-bit integers,
little-endian, two bytes per sample, no header.

    [s0 lo] [s0 hi] [s1 lo] [s1 hi] [s2 lo] [s2 hi] ...

A sample is atomic. Readers that hand out an odd-length buffer get whole
samples only; the trailing byte is left as it was.


Saturating Addition
-------------------

Summing two full-scale voices overflows i16. Wrapping would turn a loud
positive peak into a loud negative one (an audible click), so sums clamp:

    add( 32767,      1) =  32767
    add(-32768,     -1) = -32768
    add(   100,    -50) =     50

Overflow is detected by sign analysis: two operands of the same sign whose
wrapped sum has the other sign have overflowed. Operands of opposite sign
can never overflow.
*/

/// Silence.
pub const EQUILIBRIUM: i16 = 0;

/// Peak amplitude of a full-scale wave, (2^16 - 1) / 2.
pub const MAX_AMPLITUDE: i16 = 32767;

/// Bytes per encoded sample.
pub const SAMPLE_BYTES: usize = 2;

#[inline]
pub fn encode(value: i16) -> [u8; 2] {
    value.to_le_bytes()
}

#[inline]
pub fn decode(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

/// Write `value` into the first two bytes of `out`.
#[inline]
pub fn write_sample(out: &mut [u8], value: i16) {
    out[..SAMPLE_BYTES].copy_from_slice(&encode(value));
}

/// Read the sample stored in the first two bytes of `bytes`.
#[inline]
pub fn read_sample(bytes: &[u8]) -> i16 {
    decode([bytes[0], bytes[1]])
}

/// Saturating i16 addition with sign-based overflow detection.
#[inline]
pub fn add(a: i16, b: i16) -> i16 {
    let v = a.wrapping_add(b);

    let neg_a = a < 0;
    let neg_b = b < 0;
    let neg_v = v < 0;

    // negative + negative = positive
    if neg_a && neg_b && !neg_v {
        return i16::MIN;
    }

    // positive + positive = negative
    if !neg_a && !neg_b && neg_v {
        return i16::MAX;
    }

    v
}

/// Decode every whole sample in `bytes`. A trailing odd byte is ignored.
pub fn decode_all(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(read_sample)
        .collect()
}

/// Encode `samples` back to back.
pub fn encode_all(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|&s| encode(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_value() {
        for v in i16::MIN..=i16::MAX {
            assert_eq!(decode(encode(v)), v, "round trip failed for {v}");
        }
    }

    #[test]
    fn encoding_is_little_endian() {
        assert_eq!(encode(0x1234), [0x34, 0x12]);
        assert_eq!(encode(-1), [0xff, 0xff]);
        assert_eq!(encode(i16::MIN), [0x00, 0x80]);
    }

    #[test]
    fn add_saturates() {
        assert_eq!(add(32767, 1), 32767);
        assert_eq!(add(-32768, -1), -32768);
        assert_eq!(add(100, -50), 50);
        assert_eq!(add(30000, 30000), i16::MAX);
        assert_eq!(add(-30000, -30000), i16::MIN);
        assert_eq!(add(32767, -32768), -1);
    }

    #[test]
    fn add_matches_std_saturating_add() {
        let values = [i16::MIN, -20000, -1, 0, 1, 12345, 20000, i16::MAX];
        for &a in &values {
            for &b in &values {
                assert_eq!(add(a, b), a.saturating_add(b), "add({a}, {b})");
            }
        }
    }

    #[test]
    fn decode_all_skips_trailing_byte() {
        let bytes = [0x01, 0x00, 0xff, 0xff, 0x7f];
        assert_eq!(decode_all(&bytes), vec![1, -1]);
    }

    #[test]
    fn encode_all_then_decode_all() {
        let samples = [0, 1, -1, i16::MAX, i16::MIN];
        assert_eq!(decode_all(&encode_all(&samples)), samples);
    }
}
