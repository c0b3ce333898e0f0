use crate::algebra::{CscMatrix, FloatT, MatrixMath};

impl<T> MatrixMath<T> for CscMatrix<T>
where
    T: FloatT,
{
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);

        y.iter_mut().for_each(|v| *v *= b);

        for (j, &xj) in x.iter().enumerate() {
            for ptr in self.colptr[j]..self.colptr[j + 1] {
                y[self.rowval[ptr]] += a * self.nzval[ptr] * xj;
            }
        }
    }
}
