//! Second-order tensor types.
//!
//! `DiffusionTensor3` stores the 6 independent entries of a symmetric 3×3
//! tensor (the diffusion-tensor form); `SymmetricTensor` stores a general
//! symmetric D×D tensor densely. Both are value types, copied on every
//! transform call.

use super::Vector;
use nalgebra::SMatrix;

/// A symmetric second-order 3-D tensor stored as its upper-triangular
/// entries, in the order `xx, xy, xz, yy, yz, zz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionTensor3(pub [f64; 6]);

impl DiffusionTensor3 {
    /// Create a tensor from its 6 upper-triangular components.
    pub fn new(components: [f64; 6]) -> Self {
        Self(components)
    }

    /// Build a tensor from the upper triangle of a 3×3 matrix.
    pub fn from_matrix(matrix: &SMatrix<f64, 3, 3>) -> Self {
        Self([
            matrix[(0, 0)],
            matrix[(0, 1)],
            matrix[(0, 2)],
            matrix[(1, 1)],
            matrix[(1, 2)],
            matrix[(2, 2)],
        ])
    }

    /// Expand the stored entries into the full symmetric 3×3 matrix.
    pub fn matrix(&self) -> SMatrix<f64, 3, 3> {
        SMatrix::<f64, 3, 3>::new(
            self.0[0], self.0[1], self.0[2], //
            self.0[1], self.0[3], self.0[4], //
            self.0[2], self.0[4], self.0[5],
        )
    }

    /// The 6 stored components.
    pub fn components(&self) -> &[f64; 6] {
        &self.0
    }

    /// Eigen-decomposition with eigenvalues in ascending order.
    ///
    /// Returns `(eigenvalues, eigenvectors)` where `eigenvectors[k]` is the
    /// unit eigenvector of `eigenvalues[k]`; the primary diffusion direction
    /// is therefore `eigenvectors[2]`.
    pub fn eigen_system(&self) -> ([f64; 3], [Vector<3>; 3]) {
        let eigen = self.matrix().symmetric_eigen();

        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let mut eigenvalues = [0.0; 3];
        let mut eigenvectors = [Vector::zeros(); 3];
        for (slot, &index) in order.iter().enumerate() {
            eigenvalues[slot] = eigen.eigenvalues[index];
            eigenvectors[slot] = Vector(eigen.eigenvectors.column(index).into_owned());
        }
        (eigenvalues, eigenvectors)
    }
}

impl std::ops::Index<usize> for DiffusionTensor3 {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// A general symmetric second-rank tensor in D dimensions, stored densely.
///
/// Symmetry is the caller's contract; the transform machinery neither
/// enforces nor restores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricTensor<const D: usize>(pub SMatrix<f64, D, D>);

impl<const D: usize> SymmetricTensor<D> {
    /// Wrap a dense matrix as a tensor.
    pub fn from_matrix(matrix: SMatrix<f64, D, D>) -> Self {
        Self(matrix)
    }

    /// Create a zero tensor.
    pub fn zeros() -> Self {
        Self(SMatrix::zeros())
    }

    /// The dense matrix form.
    pub fn matrix(&self) -> SMatrix<f64, D, D> {
        self.0
    }
}

impl<const D: usize> std::ops::Index<(usize, usize)> for SymmetricTensor<D> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl<const D: usize> std::ops::IndexMut<(usize, usize)> for SymmetricTensor<D> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_matrix_roundtrip() {
        let t = DiffusionTensor3::new([3.0, 0.1, 0.2, 2.0, 0.3, 1.0]);
        let m = t.matrix();
        assert_eq!(m[(0, 1)], m[(1, 0)]);
        assert_eq!(m[(1, 2)], m[(2, 1)]);
        assert_eq!(DiffusionTensor3::from_matrix(&m), t);
    }

    #[test]
    fn test_eigen_system_ascending() {
        // Diagonal tensor: eigenvalues are the diagonal entries.
        let t = DiffusionTensor3::new([3.0, 0.0, 0.0, 1.0, 0.0, 2.0]);
        let (values, vectors) = t.eigen_system();

        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!((values[1] - 2.0).abs() < 1e-12);
        assert!((values[2] - 3.0).abs() < 1e-12);

        // Primary direction is the x axis (up to sign).
        assert!((vectors[2][0].abs() - 1.0).abs() < 1e-12);
        assert!(vectors[2][1].abs() < 1e-12);
        assert!(vectors[2][2].abs() < 1e-12);
    }

    #[test]
    fn test_eigen_vectors_unit_length() {
        let t = DiffusionTensor3::new([2.0, 0.5, 0.1, 1.5, 0.2, 1.0]);
        let (_, vectors) = t.eigen_system();
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_symmetric_tensor_index() {
        let mut t = SymmetricTensor::<2>::zeros();
        t[(0, 1)] = 0.5;
        t[(1, 0)] = 0.5;
        assert_eq!(t[(0, 1)], 0.5);
        assert_eq!(t.matrix()[(1, 0)], 0.5);
    }
}
