/// Polynomials over GF(256), coefficients highest degree first
use crate::encoder::gf256::Gf256;
use crate::error::{QrError, Result};

/// Immutable polynomial; leading zero coefficients are trimmed except for
/// the single-term zero polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<u8>,
}

impl Polynomial {
    /// Build from coefficients (highest degree first)
    pub fn new(coefficients: &[u8]) -> Self {
        let start = coefficients
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(coefficients.len().saturating_sub(1));
        let mut trimmed = coefficients[start.min(coefficients.len())..].to_vec();
        if trimmed.is_empty() {
            trimmed.push(0);
        }
        Self {
            coefficients: trimmed,
        }
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// Degree of the highest term
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Whether this is the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coefficients == [0]
    }

    /// Multiply by x^n
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let mut coefficients = self.coefficients.clone();
        coefficients.resize(coefficients.len() + n, 0);
        Self { coefficients }
    }

    /// Product over GF(256)
    pub fn multiply(&self, other: &Polynomial) -> Self {
        let mut product = vec![0u8; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] ^= Gf256::mul(a, b);
            }
        }
        Self::new(&product)
    }

    /// Remainder of long division by `divisor`
    pub fn modulo(&self, divisor: &Polynomial) -> Result<Self> {
        if divisor.is_zero() {
            return Err(QrError::InvalidArgument(
                "polynomial division by zero".into(),
            ));
        }
        let divisor_log: Vec<Option<u8>> = divisor
            .coefficients
            .iter()
            .map(|&c| Gf256::log(c).ok())
            .collect();
        let lead_log = Gf256::log(divisor.coefficients[0])? as isize;

        let mut remainder = self.clone();
        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let ratio = Gf256::log(remainder.coefficients[0])? as isize - lead_log;
            let mut next = remainder.coefficients;
            for (slot, log) in next.iter_mut().zip(&divisor_log) {
                if let Some(log) = log {
                    *slot ^= Gf256::exp(*log as isize + ratio);
                }
            }
            // The leading term always cancels, so the degree strictly drops.
            remainder = Self::new(&next);
        }
        Ok(remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::generator_polynomial;

    #[test]
    fn test_trim_leading_zeros() {
        let p = Polynomial::new(&[0, 0, 3, 0, 1]);
        assert_eq!(p.coefficients(), &[3, 0, 1]);
        assert_eq!(p.degree(), 2);

        let zero = Polynomial::new(&[0, 0, 0]);
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), 0);
        assert!(Polynomial::new(&[]).is_zero());
    }

    #[test]
    fn test_shift() {
        let p = Polynomial::new(&[5, 7]).shift(3);
        assert_eq!(p.coefficients(), &[5, 7, 0, 0, 0]);
        assert!(Polynomial::new(&[0]).shift(4).is_zero());
    }

    #[test]
    fn test_multiply() {
        // (x + 1)(x + 1) = x^2 + 1 in characteristic 2
        let p = Polynomial::new(&[1, 1]);
        assert_eq!(p.multiply(&p).coefficients(), &[1, 0, 1]);

        let zero = Polynomial::new(&[0]);
        assert!(p.multiply(&zero).is_zero());
    }

    #[test]
    fn test_modulo_of_multiple_is_zero() {
        let a = Polynomial::new(&[3, 9, 27]);
        let b = Polynomial::new(&[1, 200, 14]);
        let product = a.multiply(&b);
        assert!(product.modulo(&b).unwrap().is_zero());
        assert!(product.modulo(&a).unwrap().is_zero());
    }

    #[test]
    fn test_modulo_smaller_degree_is_identity() {
        let a = Polynomial::new(&[4, 5]);
        let b = Polynomial::new(&[1, 2, 3]);
        assert_eq!(a.modulo(&b).unwrap(), a);
    }

    #[test]
    fn test_modulo_degree_below_generator() {
        for ec in [7usize, 10, 13, 22, 30] {
            let generator = generator_polynomial(ec);
            let data: Vec<u8> = (0..40u32).map(|i| (i * 37 + 11) as u8).collect();
            let remainder = Polynomial::new(&data).shift(ec).modulo(&generator).unwrap();
            assert!(remainder.degree() < ec);
        }
    }

    #[test]
    fn test_modulo_by_zero_fails() {
        let a = Polynomial::new(&[1, 2]);
        assert!(matches!(
            a.modulo(&Polynomial::new(&[0])),
            Err(QrError::InvalidArgument(_))
        ));
    }
}
