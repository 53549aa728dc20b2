mod qr;

pub(crate) use qr::Module;
pub(crate) use qr::QR;

use crate::common::bit_utils::BitStream;
use crate::common::ec::Block;
use crate::common::encoder::{encode_auto, encode_with_version};
use crate::common::error::QRResult;
use crate::common::mask::{apply_best_mask, MaskPattern};
use crate::common::metadata::{ECLevel, Version};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    ver: Option<Version>,
    ecl: ECLevel,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, ver: None, ecl: ECLevel::M }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, ver: Version) -> &mut Self {
        self.ver = Some(ver);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.ver = None;
        self
    }

    pub fn ec_level(&mut self, ecl: ECLevel) -> &mut Self {
        self.ecl = ecl;
        self
    }

    pub fn metadata(&self) -> String {
        match self.ver {
            Some(v) => format!("{{ Version: {}, Ec level: {:?} }}", *v, self.ecl),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ecl),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&mut self) -> QRResult<QR> {
        println!("\nConstructing QR {}...", self.metadata());

        println!("Encoding data...");
        let (enc, ver) = match self.ver {
            Some(v) => (encode_with_version(self.data, v, self.ecl)?, v),
            None => {
                println!("Finding best version...");
                encode_auto(self.data, self.ecl)?
            }
        };

        let data_len = self.data.len();
        let tot_cwds = ver.total_codewords();
        let data_cap = ver.data_capacity(self.ecl);
        let ec_cap = Self::ec_capacity(ver, self.ecl);

        println!("Constructing payload with ecc & interleaving...");
        let mut pld = BitStream::new(tot_cwds << 3);
        let (b1s, b1c, b2s, b2c) = ver.data_codewords_per_block(self.ecl);
        let chan_data_cap = b1s * b1c + b2s * b2c;

        debug_assert!(
            enc.len() >> 3 == chan_data_cap,
            "Encoded data length {} doesn't match codeword capacity {chan_data_cap}",
            enc.len() >> 3
        );

        let blks = Self::blockify(enc.data(), ver, self.ecl);
        Self::interleave_into(&blks, &mut pld);

        println!("Constructing QR...");
        let mut qr = QR::new(ver, self.ecl);

        println!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        println!("Drawing encoding region...");
        qr.draw_encoding_region(pld);

        println!("Finding & applying best mask...");
        let mask = apply_best_mask(&mut qr);

        println!("\x1b[1;32mQR generated successfully!\n \x1b[0m");

        let tot_mods = ver.width() * ver.width();
        let dark_mods = qr.count_dark_modules();
        let lt_mods = tot_mods - dark_mods;

        println!("Report:");
        println!("{{ Version: {}, Ec level: {:?}, Mask: {:?} }}", *ver, self.ecl, mask);
        println!("Data capacity: {data_cap}, Error capacity: {ec_cap}");
        println!(
            "Data size: {data_len}, Encoded size: {}, Compression: {}%",
            enc.len() >> 3,
            (enc.len() >> 3) * 100 / data_len.max(1)
        );
        println!("Dark cells: {dark_mods}, Light cells: {lt_mods}, Balance: {}%\n", dark_mods * 100 / tot_mods);

        Ok(qr)
    }

    pub(crate) fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> [Option<Block>; 256] {
        // b1s = block1_size, b1c = block1_count
        let (b1s, b1c, b2s, b2c) = ver.data_codewords_per_block(ecl);
        let ec_len = ver.ecc_per_block(ecl);

        let b1_tot_sz = b1s * b1c;
        let tot_sz = b1_tot_sz + b2s * b2c;

        debug_assert!(
            tot_sz == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            tot_sz
        );

        let mut blks: [Option<Block>; 256] = [None; 256];
        data[..b1_tot_sz]
            .chunks(b1s)
            .enumerate()
            .for_each(|(i, d)| blks[i] = Some(Block::new(d, ec_len)));

        if b2s > 0 {
            data[b1_tot_sz..]
                .chunks(b2s)
                .enumerate()
                .for_each(|(i, d)| blks[i + b1c] = Some(Block::new(d, ec_len)));
        }

        blks
    }

    pub fn ec_capacity(ver: Version, ecl: ECLevel) -> usize {
        let p = match (*ver, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        let ec_bpb = ver.ecc_per_block(ecl);
        let (_, cnt1, _, cnt2) = ver.data_codewords_per_block(ecl);
        let ec_bytes = (cnt1 + cnt2) * ec_bpb;

        (ec_bytes - p) / 2
    }

    pub(crate) fn interleave_into(blks: &[Option<Block>], out: &mut BitStream) {
        // Interleaving data codewords
        let max_len = blks
            .iter()
            .filter_map(Option::as_ref)
            .map(Block::data_len)
            .max()
            .expect("Blocks is empty");
        for i in 0..max_len {
            for bl in blks.iter().filter_map(Option::as_ref) {
                if let Some(b) = bl.data().get(i) {
                    out.push_byte(*b)
                }
            }
        }

        // Interleaving ec codewords
        let ec_len = blks[0].unwrap().ec_len();
        for i in 0..ec_len {
            for bl in blks.iter().filter_map(Option::as_ref) {
                if let Some(b) = bl.ecc().get(i) {
                    out.push_byte(*b)
                }
            }
        }
    }
}

#[cfg(test)]
mod builder_tests {

    use test_case::test_case;

    use super::QRBuilder;
    use crate::common::ec::Block;
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};
    use crate::common::bit_utils::BitStream;

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let exp_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let blks = QRBuilder::blockify(msg, Version::new(1), ECLevel::M);
        assert_eq!(blks.iter().filter(|b| Option::is_some(b)).count(), exp_ecc.len());
        for (i, b) in blks.iter().filter_map(Option::as_ref).enumerate() {
            assert_eq!(b.ecc(), *exp_ecc[i]);
        }
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let exp_ecc = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let blks = QRBuilder::blockify(msg, Version::new(5), ECLevel::Q);
        assert_eq!(blks.iter().filter(|b| Option::is_some(b)).count(), exp_ecc.len());
        for (i, b) in blks.iter().filter_map(Option::as_ref).enumerate() {
            assert_eq!(b.ecc(), *exp_ecc[i]);
        }
    }

    #[test]
    fn test_interleave() {
        let data = [vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let mut blks: [Option<Block>; 256] = [None; 256];
        data.iter().enumerate().for_each(|(i, b)| blks[i] = Some(Block::new(b, 3)));
        let mut ilvd = BitStream::new(256);
        QRBuilder::interleave_into(&blks, &mut ilvd);
        let exp_ilvd = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(ilvd.data()[..10], exp_ilvd);
    }

    #[test_case("Hello, world!".to_string(), Version::new(1), ECLevel::L)]
    #[test_case("TEST".to_string(), Version::new(1), ECLevel::M)]
    #[test_case("12345".to_string(), Version::new(1), ECLevel::Q)]
    #[test_case("OK".to_string(), Version::new(1), ECLevel::H)]
    #[test_case("A11111111111111".repeat(11).to_string(), Version::new(7), ECLevel::M)]
    #[test_case("1234567890".repeat(15).to_string(), Version::new(7), ECLevel::H)]
    #[test_case("A11111111111111".repeat(20).to_string(), Version::new(10), ECLevel::M)]
    #[test_case("1234567890".repeat(28).to_string(), Version::new(10), ECLevel::H)]
    #[test_case("A111111111111111".repeat(100).to_string(), Version::new(27), ECLevel::M)]
    #[test_case("1234567890".repeat(145).to_string(), Version::new(27), ECLevel::H)]
    #[test_case("A111111111111111".repeat(97).to_string(), Version::new(40), ECLevel::M)]
    #[test_case("1234567890".repeat(305).to_string(), Version::new(40), ECLevel::H)]
    fn test_builder(data: String, ver: Version, ecl: ECLevel) {
        let qr = QRBuilder::new(data.as_bytes()).version(ver).ec_level(ecl).build().unwrap();
        assert_eq!(qr.version(), ver);
        assert_eq!(qr.ec_level(), ecl);
        assert!(qr.mask().is_some());
    }

    #[test]
    fn test_builder_data_overflow() {
        let data = "1234567890".repeat(306).to_string();

        let result = QRBuilder::new(data.as_bytes()).version(Version::new(40)).ec_level(ECLevel::H).build();
        assert!(matches!(result, Err(QRError::CapacityExceeded)));
    }

    #[test]
    fn test_builder_auto_version_too_large() {
        let data = vec![0u8; 100_000];
        let result = QRBuilder::new(&data).build();
        assert!(matches!(result, Err(QRError::InputTooLarge)));
    }
}
