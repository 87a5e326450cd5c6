/// Bit matrix and the tri-state layout grid
pub mod matrix;
/// Version, EC level, mask pattern and the finished symbol
pub mod qr_code;

pub use matrix::{BitMatrix, Module, ModuleGrid};
pub use qr_code::{CellData, ECLevel, MaskPattern, QRCode, Version};
