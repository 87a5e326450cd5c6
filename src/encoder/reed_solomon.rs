/// Reed-Solomon error correction codeword generation for QR codes
use crate::encoder::gf256::Gf256;
use crate::encoder::polynomial::Polynomial;
use crate::error::Result;

/// Generator polynomial prod_{i=0}^{ec-1} (x - alpha^i)
pub fn generator_polynomial(ec_codewords: usize) -> Polynomial {
    (0..ec_codewords).fold(Polynomial::new(&[1]), |acc, i| {
        acc.multiply(&Polynomial::new(&[1, Gf256::exp(i as isize)]))
    })
}

/// Reed-Solomon encoder for one block size
pub struct ReedSolomonEncoder {
    num_ecc_codewords: usize,
    generator: Polynomial,
}

impl ReedSolomonEncoder {
    /// Encoder producing `num_ecc_codewords` EC codewords per block
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self {
            num_ecc_codewords,
            generator: generator_polynomial(num_ecc_codewords),
        }
    }

    /// EC codewords per block
    pub fn num_ecc_codewords(&self) -> usize {
        self.num_ecc_codewords
    }

    /// Error correction codewords for `data`, left-padded to the EC length
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let remainder = Polynomial::new(data)
            .shift(self.num_ecc_codewords)
            .modulo(&self.generator)?;
        let coefficients = remainder.coefficients();

        let mut ecc = vec![0u8; self.num_ecc_codewords];
        // A zero remainder is stored as the single coefficient [0].
        let take = coefficients.len().min(self.num_ecc_codewords);
        let offset = self.num_ecc_codewords - take;
        ecc[offset..].copy_from_slice(&coefficients[coefficients.len() - take..]);
        Ok(ecc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate a codeword polynomial (highest degree first) at alpha^i
    fn syndrome(codeword: &[u8], i: usize) -> u8 {
        let x = Gf256::exp(i as isize);
        codeword
            .iter()
            .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
    }

    #[test]
    fn test_generator_degree_7() {
        let generator = generator_polynomial(7);
        // Coefficients from the QR specification for 7 EC codewords
        assert_eq!(
            generator.coefficients(),
            &[1, 127, 122, 154, 164, 11, 68, 117]
        );
    }

    #[test]
    fn test_numeric_reference_block() {
        // "01234567", version 1-M
        let data = [
            16, 32, 12, 86, 97, 128, 236, 17, 236, 17, 236, 17, 236, 17, 236, 17,
        ];
        let ecc = ReedSolomonEncoder::new(10).encode(&data).unwrap();
        assert_eq!(ecc, vec![165, 36, 212, 193, 237, 54, 199, 135, 44, 85]);
    }

    #[test]
    fn test_alphanumeric_reference_block() {
        // "HELLO WORLD", version 1-M
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let ecc = ReedSolomonEncoder::new(10).encode(&data).unwrap();
        assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_codeword_has_zero_syndromes() {
        let data: Vec<u8> = (0..46u32).map(|i| (i * 91 + 7) as u8).collect();
        let encoder = ReedSolomonEncoder::new(22);
        let mut codeword = data.clone();
        codeword.extend(encoder.encode(&data).unwrap());
        for i in 0..22 {
            assert_eq!(syndrome(&codeword, i), 0, "syndrome {i}");
        }
    }

    #[test]
    fn test_zero_data_gives_zero_ecc() {
        let ecc = ReedSolomonEncoder::new(13).encode(&[0u8; 9]).unwrap();
        assert_eq!(ecc, vec![0u8; 13]);
    }
}
