/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        (self.data[byte_index] >> bit_index) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        self.data[byte_index] ^= 1 << bit_index;
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        // Padding bits past width * height are never set.
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Module state while a symbol is being laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not written yet (also marks reserved metadata cells before they are filled)
    #[default]
    Unset,
    /// Dark module
    Dark,
    /// Light module
    Light,
}

impl Module {
    /// Module for a boolean colour (true = dark)
    pub fn from_dark(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// Whether this module is dark; unset counts as light
    pub fn is_dark(&self) -> bool {
        matches!(self, Module::Dark)
    }
}

/// Square tri-state grid plus a map of function (non-data) modules
#[derive(Debug, Clone)]
pub struct ModuleGrid {
    size: usize,
    cells: Vec<Module>,
    function: BitMatrix,
}

impl ModuleGrid {
    /// Create an all-unset grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Module::Unset; size * size],
            function: BitMatrix::new(size, size),
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (x, y); out of range reads as unset
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.size || y >= self.size {
            return Module::Unset;
        }
        self.cells[y * self.size + x]
    }

    /// Write a data module; function modules are left untouched
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.size || y >= self.size || self.function.get(x, y) {
            return;
        }
        self.cells[y * self.size + x] = Module::from_dark(dark);
    }

    /// Write a function module and mark it reserved
    pub fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        self.cells[y * self.size + x] = Module::from_dark(dark);
        self.function.set(x, y, true);
    }

    /// Reserve a cell for metadata without giving it a colour yet
    pub fn reserve(&mut self, x: usize, y: usize) {
        self.function.set(x, y, true);
    }

    /// Whether (x, y) belongs to a function pattern or metadata area
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Flip a data module; unset and function modules are left alone
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size || self.function.get(x, y) {
            return;
        }
        let cell = &mut self.cells[y * self.size + x];
        *cell = match *cell {
            Module::Dark => Module::Light,
            Module::Light => Module::Dark,
            Module::Unset => Module::Unset,
        };
    }

    /// Number of cells that are still unset
    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|m| **m == Module::Unset).count()
    }

    /// Collapse to a boolean matrix (unset cells become light)
    pub fn to_bit_matrix(&self) -> BitMatrix {
        let mut matrix = BitMatrix::new(self.size, self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.cells[y * self.size + x].is_dark() {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }
}
