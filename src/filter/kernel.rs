use crate::error::BitmapError;

/// 3x3 box blur: uniform 1/9 weights.
pub const BOX_BLUR: [[f32; 3]; 3] = [[1.0 / 9.0; 3]; 3];

/// 3x3 Gaussian approximation, weights summing to 1.
pub const GAUSSIAN_BLUR: [[f32; 3]; 3] = [
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
];

/// Laplacian edge detector.
pub const OUTLINE: [[f32; 3]; 3] = [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]];

pub const EMBOSS: [[f32; 3]; 3] = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];

pub const SHARPEN: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Square convolution matrix with an odd side length.
///
/// Weights are stored row-major; `weight(row, col)` with `(radius, radius)`
/// at the center. A kernel never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Box<[f32]>,
}

impl Kernel {
    /// Build a `size x size` kernel from row-major weights.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, BitmapError> {
        if size == 0 || size % 2 == 0 || size.checked_mul(size) != Some(weights.len()) {
            return Err(BitmapError::InvalidKernel {
                size,
                weights: weights.len(),
            });
        }
        Ok(Self {
            size,
            weights: weights.into_boxed_slice(),
        })
    }

    /// Build from a fixed-size matrix.
    pub fn from_rows<const K: usize>(rows: [[f32; K]; K]) -> Result<Self, BitmapError> {
        Self::new(K, rows.iter().flatten().copied().collect())
    }

    /// Kernel that leaves every pixel unchanged.
    pub fn identity(size: usize) -> Result<Self, BitmapError> {
        let taps = size
            .checked_mul(size)
            .filter(|_| size % 2 == 1)
            .ok_or(BitmapError::InvalidKernel { size, weights: 0 })?;
        let mut weights = vec![0.0; taps];
        weights[taps / 2] = 1.0;
        Self::new(size, weights)
    }

    fn preset(rows: [[f32; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn box_blur() -> Self {
        Self::preset(BOX_BLUR)
    }

    pub fn gaussian_blur() -> Self {
        Self::preset(GAUSSIAN_BLUR)
    }

    pub fn outline() -> Self {
        Self::preset(OUTLINE)
    }

    pub fn emboss() -> Self {
        Self::preset(EMBOSS)
    }

    pub fn sharpen() -> Self {
        Self::preset(SHARPEN)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Taps on each side of the center: `size / 2`.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn weight(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.weights.chunks_exact(self.size)
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_and_empty() {
        assert!(matches!(
            Kernel::new(2, vec![0.0; 4]),
            Err(BitmapError::InvalidKernel { size: 2, weights: 4 })
        ));
        assert!(matches!(
            Kernel::new(0, Vec::new()),
            Err(BitmapError::InvalidKernel { size: 0, .. })
        ));
        assert!(Kernel::from_rows([[1.0, 0.0], [0.0, 0.0]]).is_err());
        assert!(Kernel::identity(4).is_err());
    }

    #[test]
    fn rejects_wrong_weight_count() {
        assert!(matches!(
            Kernel::new(3, vec![1.0; 8]),
            Err(BitmapError::InvalidKernel { size: 3, weights: 8 })
        ));
    }

    #[test]
    fn identity_has_single_center_tap() {
        let k = Kernel::identity(5).unwrap();
        assert_eq!(k.size(), 5);
        assert_eq!(k.radius(), 2);
        assert_eq!(k.weight(2, 2), 1.0);
        assert_eq!(k.sum(), 1.0);
        assert_eq!(Kernel::identity(1).unwrap().weight(0, 0), 1.0);
    }

    #[test]
    fn presets_match_their_matrices() {
        assert_eq!(Kernel::sharpen(), Kernel::from_rows(SHARPEN).unwrap());
        assert_eq!(Kernel::outline().weight(1, 1), 8.0);
        assert_eq!(Kernel::outline().sum(), 0.0);
        assert_eq!(Kernel::emboss().weight(0, 0), -2.0);
        assert!((Kernel::box_blur().sum() - 1.0).abs() < 1e-6);
        assert!((Kernel::gaussian_blur().sum() - 1.0).abs() < 1e-6);
        assert_eq!(Kernel::gaussian_blur().weight(1, 1), 0.25);
    }

    #[test]
    fn rows_are_row_major() {
        let k = Kernel::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        let rows: Vec<&[f32]> = k.rows().collect();
        assert_eq!(rows[1], &[4.0, 5.0, 6.0]);
        assert_eq!(k.weight(2, 0), 7.0);
    }
}
