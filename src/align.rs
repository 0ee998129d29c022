//! Page alignment helpers shared by the packer and unpacker.

/// Largest page size the packer will write.
pub const MAX_PAGE_SIZE: usize = 16384;

/// Read-only source of padding bytes.
static ZERO_PAGE: [u8; MAX_PAGE_SIZE] = [0; MAX_PAGE_SIZE];

/// Bytes needed to round `item_size` up to a multiple of `page_size`.
///
/// `page_size` must be a non-zero power of two.
pub const fn pad_len(item_size: u32, page_size: u32) -> u32 {
    let mask = page_size - 1;
    if item_size & mask == 0 {
        0
    } else {
        page_size - (item_size & mask)
    }
}

/// `item_size` plus its padding, as a buffer length.
pub fn padded_len(item_size: u32, page_size: u32) -> usize {
    item_size as usize + pad_len(item_size, page_size) as usize
}

/// Append `count` zero bytes.
pub fn write_padding(out: &mut Vec<u8>, count: u32) {
    let count = count as usize;
    if count <= MAX_PAGE_SIZE {
        out.extend_from_slice(&ZERO_PAGE[..count]);
    } else {
        out.resize(out.len() + count, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_len_aligned_is_zero() {
        assert_eq!(pad_len(0, 2048), 0);
        assert_eq!(pad_len(2048, 2048), 0);
        assert_eq!(pad_len(16384 * 3, 16384), 0);
    }

    #[test]
    fn test_pad_len_rounds_up() {
        assert_eq!(pad_len(1, 2048), 2047);
        assert_eq!(pad_len(608, 2048), 1440);
        assert_eq!(pad_len(4097, 4096), 4095);
    }

    #[test]
    fn test_pad_len_properties() {
        for page in [2048u32, 4096, 8192, 16384, 65536] {
            for n in [0u32, 1, 2, 607, 608, 2047, 2048, 2049, 4095, 100_000, 1 << 20] {
                let pad = pad_len(n, page);
                assert!(pad < page, "pad {pad} >= page {page}");
                assert_eq!((n as u64 + pad as u64) % page as u64, 0);
            }
        }
    }

    #[test]
    fn test_write_padding_small_and_large() {
        let mut out = vec![1u8];
        write_padding(&mut out, 3);
        assert_eq!(out, [1, 0, 0, 0]);

        let mut big = Vec::new();
        write_padding(&mut big, (MAX_PAGE_SIZE + 5) as u32);
        assert_eq!(big.len(), MAX_PAGE_SIZE + 5);
        assert!(big.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(4, 2048), 2048);
        assert_eq!(padded_len(0, 2048), 0);
    }
}
