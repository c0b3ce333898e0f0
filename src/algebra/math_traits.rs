use super::FloatT;

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Euclidean distance between two vectors
    fn dist(&self, y: &Self) -> Self::T;

    /// Sum of elements
    fn sum(&self) -> Self::T;
}

/// Matrix operations for matrices of [`FloatT`](crate::algebra::FloatT)

pub trait MatrixMath<T: FloatT> {
    /// BLAS-like general matrix-vector multiply.  Produces `y = a*M*x + b*y`
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T);
}
