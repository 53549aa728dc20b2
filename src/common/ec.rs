use super::galois;

pub const MAX_BLOCK_SIZE: usize = 256;

/// One Reed-Solomon block: `dlen` data codewords followed by the ECC
/// codewords computed for them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    len: usize,
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ecc_len: usize) -> Self {
        let dlen = raw.len();
        let len = dlen + ecc_len;
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block exceeds max size: {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);

        let ecc = rs_encode(raw, ecc_len);
        data[dlen..len].copy_from_slice(&ecc);

        Self { data, len, dlen }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}

/// Computes the Reed-Solomon ECC codewords for `data` via synthetic
/// polynomial division against the degree-`ecc_len` generator polynomial
/// (ISO/IEC 18004 §6.6.1).
pub fn rs_encode(data: &[u8], ecc_len: usize) -> Vec<u8> {
    let generator = galois::generator_poly(ecc_len);

    let mut remainder = vec![0u8; data.len() + ecc_len];
    remainder[..data.len()].copy_from_slice(data);

    for i in 0..data.len() {
        let factor = remainder[i];
        if factor == 0 {
            continue;
        }
        for (j, &g) in generator.iter().enumerate() {
            remainder[i + j] = galois::add(remainder[i + j], galois::mul(g, factor));
        }
    }

    remainder.split_off(data.len())
}

#[cfg(test)]
mod ec_tests {
    use super::*;

    #[test]
    fn test_rs_encode_s3_vector() {
        let data = [40u8, 88, 12, 6, 46, 77, 36];
        let ecc = rs_encode(&data, 10);
        assert_eq!(ecc, vec![214, 246, 18, 193, 38, 69, 160, 197, 199, 15]);
    }

    #[test]
    fn test_rs_encode_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let ecc = rs_encode(msg, 10);
        assert_eq!(&*ecc, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_rs_encode_medium() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&";
        let ecc = rs_encode(msg, 18);
        assert_eq!(&*ecc, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_block_layout() {
        let block = Block::new(&[40, 88, 12, 6, 46, 77, 36], 10);
        assert_eq!(block.len(), 17);
        assert_eq!(block.data_len(), 7);
        assert_eq!(block.ec_len(), 10);
        assert_eq!(block.data(), [40, 88, 12, 6, 46, 77, 36]);
        assert_eq!(block.ecc(), [214, 246, 18, 193, 38, 69, 160, 197, 199, 15]);
    }
}
