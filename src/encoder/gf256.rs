/// GF(256) arithmetic for QR Reed-Solomon codes
/// QR codes use the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use std::sync::OnceLock;

use crate::error::{QrError, Result};

const PRIMITIVE_POLY: u16 = 0x11D;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for (i, slot) in exp.iter_mut().take(255).enumerate() {
            *slot = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x > 0xFF {
                x ^= PRIMITIVE_POLY;
            }
        }
        // alpha^255 = alpha^0
        exp[255] = exp[0];
        Tables { exp, log }
    })
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// alpha^e; the exponent is reduced modulo 255 (negative values allowed)
    pub fn exp(e: isize) -> u8 {
        tables().exp[e.rem_euclid(255) as usize]
    }

    /// Discrete log of a nonzero element
    pub fn log(x: u8) -> Result<u8> {
        if x == 0 {
            return Err(QrError::InvalidArgument("log(0) is undefined in GF(256)".into()));
        }
        Ok(tables().log[x as usize])
    }

    /// Field product via the log tables
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        let log_b = t.log[b as usize] as usize;
        t.exp[(log_a + log_b) % 255]
    }
}
