use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub, SubAssign};

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Error, Result};
use super::element::Element;

/// Dense matrix whose dimensions are part of its type.
/// Values are stored row-major, one array per row.
/// Every operation that changes the shape returns a new matrix of the matching type.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Matrix<const R: usize, const C: usize, T = f32> {
    values: [[T; C]; R],
}

/// A single column matrix.
pub type Vector<const N: usize, T = f32> = Matrix<N, 1, T>;

/// Exposes the compile-time shape and scalar type of matrix-like values.
pub trait Shaped {
    type Scalar: Element;
    const ROWS: usize;
    const COLUMNS: usize;
}

impl<const R: usize, const C: usize, T: Element> Shaped for Matrix<R, C, T> {
    type Scalar = T;
    const ROWS: usize = R;
    const COLUMNS: usize = C;
}

impl<const R: usize, const C: usize, T: Element> Matrix<R, C, T> {
    /// Returns a new Matrix from its rows.
    pub const fn new(values: [[T; C]; R]) -> Self {
        Self { values }
    }

    /// Builds a matrix by evaluating `f(row, column)` for every cell.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self {
            values: std::array::from_fn(|r| std::array::from_fn(|c| f(r, c))),
        }
    }

    /// Creates a matrix from exactly R * C values listed row by row.
    /// # Arguments
    /// # Returns
    pub fn from_flat<const N: usize>(values: [T; N]) -> Self {
        const { assert!(N == R * C, "wrong number of values for this matrix shape") };

        Self::from_fn(|r, c| values[r * C + c])
    }

    /// Creates a matrix with every element set to zero.
    pub fn zeroed() -> Self {
        Self { values: [[T::ZERO; C]; R] }
    }

    /// Creates a matrix with every element set to `value`.
    pub fn filled(value: T) -> Self {
        Self { values: [[value; C]; R] }
    }

    /// Returns number of rows this matrix has.
    pub const fn row_count(&self) -> usize { R }

    /// Returns number of columns this matrix has.
    pub const fn column_count(&self) -> usize { C }

    /// Returns number of elements.
    pub const fn len(&self) -> usize { R * C }

    pub const fn is_empty(&self) -> bool { R * C == 0 }

    pub const fn shape(&self) -> (usize, usize) { (R, C) }

    /// Element at `row`, `col`. Panics when either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.values[row][col]
    }

    /// Mutable element at `row`, `col`. Panics when either index is out of range.
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.values[row][col]
    }

    pub fn rows(&self) -> &[[T; C]; R] {
        &self.values
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter().flatten()
    }

    /// Applies `f` to every element.
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self::from_fn(|r, c| f(self.values[r][c]))
    }

    /// Combines two same-shaped matrices element by element.
    pub fn zip_map(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        Self::from_fn(|r, c| f(self.values[r][c], rhs.values[r][c]))
    }

    pub fn mul_element_wise(&self, rhs: &Self) -> Self {
        self.zip_map(rhs, |x, y| x * y)
    }

    /// Scales matrix by scalar.
    pub fn scale(&self, scalar: T) -> Self {
        self.map(|x| x * scalar)
    }

    /// Standard dense product, accumulating each output cell from zero.
    pub fn matmul<const K: usize>(&self, rhs: &Matrix<C, K, T>) -> Matrix<R, K, T> {
        Matrix::from_fn(|r, k| {
            let mut accumulator = T::ZERO;
            for i in 0..C {
                accumulator += self.values[r][i] * rhs.values[i][k];
            }
            accumulator
        })
    }

    /// Returns transpose of matrix.
    pub fn transpose(&self) -> Matrix<C, R, T> {
        Matrix::from_fn(|r, c| self.values[c][r])
    }

    /// Total of all elements.
    pub fn sum(&self) -> T {
        self.iter().fold(T::ZERO, |acc, &x| acc + x)
    }

    /// Adds a smaller matrix to every tile of this one, wrapping its indices.
    /// A column vector is added to every column, a row vector to every row.
    /// The smaller operand's dimensions must divide this matrix's dimensions, checked at compile time.
    ///
    /// ```compile_fail
    /// use fixednn::Matrix;
    ///
    /// let m = Matrix::<3, 3, i32>::zeroed();
    /// let _ = m.add_wrapped(&Matrix::<2, 1, i32>::zeroed());
    /// ```
    pub fn add_wrapped<const R2: usize, const C2: usize>(&self, rhs: &Matrix<R2, C2, T>) -> Self {
        const {
            assert!(
                R2 > 0 && C2 > 0 && R % R2 == 0 && C % C2 == 0,
                "wrapped operand dimensions must divide the target dimensions"
            )
        };

        Self::from_fn(|r, c| self.values[r][c] + rhs.values[r % R2][c % C2])
    }

    /// Horizontal concatenation. `CO` must equal `C + C2`.
    ///
    /// ```compile_fail
    /// use fixednn::Matrix;
    ///
    /// let m = Matrix::<1, 2, i32>::zeroed();
    /// let _ = m.column_cat::<2, 4>(&Matrix::<1, 2, i32>::zeroed());
    /// ```
    pub fn column_cat<const C2: usize, const CO: usize>(&self, rhs: &Matrix<R, C2, T>) -> Matrix<R, CO, T> {
        const { assert!(C + C2 == CO, "concatenated column count must be the sum of both operands") };

        Matrix::from_fn(|r, c| if c < C { self.values[r][c] } else { rhs.values[r][c - C] })
    }

    /// Splits off the first `K` columns. Requires `K < C` and `K + CR == C`.
    ///
    /// ```compile_fail
    /// use fixednn::Matrix;
    ///
    /// let m = Matrix::<1, 3, i32>::from_flat([1, 2, 3]);
    /// let (_left, _right) = m.column_split::<3, 0>();
    /// ```
    pub fn column_split<const K: usize, const CR: usize>(&self) -> (Matrix<R, K, T>, Matrix<R, CR, T>) {
        const { assert!(K < C && K + CR == C, "split point must fall inside the matrix") };

        let left = Matrix::from_fn(|r, c| self.values[r][c]);
        let right = Matrix::from_fn(|r, c| self.values[r][K + c]);
        (left, right)
    }

    /// Reinterprets the row-major elements under a new shape of the same size.
    pub fn reshape<const R2: usize, const C2: usize>(&self) -> Matrix<R2, C2, T> {
        const { assert!(R2 * C2 == R * C, "reshape must preserve the element count") };

        Matrix::from_fn(|r, c| {
            let index = r * C2 + c;
            self.values[index / C][index % C]
        })
    }

    /// Reshapes into a column vector, keeping element order.
    pub fn flatten<const N: usize>(&self) -> Vector<N, T> {
        self.reshape::<N, 1>()
    }

    /// Sets all elements to a constant.
    pub fn fill(&mut self, value: T) -> &mut Self {
        self.values.iter_mut().flatten().for_each(|x| *x = value);
        self
    }

    /// Fills with draws from a zero-mean Gaussian with variance 1 / (R + C).
    pub fn randomize(&mut self) -> &mut Self {
        self.randomize_with(&mut rand::thread_rng())
    }

    /// Same as `randomize` but draws from the supplied generator.
    pub fn randomize_with<G: Rng + ?Sized>(&mut self, rng: &mut G) -> &mut Self {
        let std_dev = (1.0 / (R + C) as f64).sqrt();
        for x in self.values.iter_mut().flatten() {
            let z: f64 = StandardNormal.sample(rng);
            *x = T::from_f64(z * std_dev);
        }
        self
    }

    /// Returns a R x C matrix filled from the thread generator.
    pub fn new_randomized() -> Self {
        let mut matrix = Self::zeroed();
        matrix.randomize();
        matrix
    }
}

impl<const N: usize, T: Element> Matrix<N, N, T> {
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::ONE } else { T::ZERO })
    }
}

impl<const N: usize, T: Element> Matrix<N, 1, T> {
    pub fn column_vector(values: [T; N]) -> Self {
        Self::from_fn(|r, _| values[r])
    }
}

impl<const N: usize, T: Element> Matrix<1, N, T> {
    pub fn row_vector(values: [T; N]) -> Self {
        Self::new([values])
    }
}

impl<const R: usize, const C: usize, T: Element> Default for Matrix<R, C, T> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const R: usize, const C: usize, T: Element> From<[[T; C]; R]> for Matrix<R, C, T> {
    fn from(values: [[T; C]; R]) -> Self {
        Self::new(values)
    }
}

impl<const R: usize, const C: usize, T: Element> TryFrom<&[T]> for Matrix<R, C, T> {
    type Error = Error;

    /// Row-major fill from runtime data, which must hold exactly R * C values.
    fn try_from(values: &[T]) -> Result<Self> {
        if values.len() != R * C {
            return Err(Error::ShapeMismatch { rows: R, columns: C, found: values.len() });
        }

        Ok(Self::from_fn(|r, c| values[r * C + c]))
    }
}

impl<const R: usize, const C: usize, T: Element> Index<(usize, usize)> for Matrix<R, C, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.values[row][col]
    }
}

impl<const R: usize, const C: usize, T: Element> IndexMut<(usize, usize)> for Matrix<R, C, T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.values[row][col]
    }
}

impl<const R: usize, const C: usize, T: Element> Add for Matrix<R, C, T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |x, y| x + y)
    }
}

impl<const R: usize, const C: usize, T: Element> Sub for Matrix<R, C, T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |x, y| x - y)
    }
}

impl<const R: usize, const C: usize, T: Element> AddAssign for Matrix<R, C, T> {
    fn add_assign(&mut self, rhs: Self) {
        for (x, &y) in self.values.iter_mut().flatten().zip(rhs.iter()) {
            *x += y;
        }
    }
}

impl<const R: usize, const C: usize, T: Element> SubAssign for Matrix<R, C, T> {
    fn sub_assign(&mut self, rhs: Self) {
        for (x, &y) in self.values.iter_mut().flatten().zip(rhs.iter()) {
            *x -= y;
        }
    }
}

impl<const R: usize, const C: usize, const K: usize, T: Element> Mul<Matrix<C, K, T>> for Matrix<R, C, T> {
    type Output = Matrix<R, K, T>;

    fn mul(self, rhs: Matrix<C, K, T>) -> Self::Output {
        self.matmul(&rhs)
    }
}

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl<const R: usize, const C: usize> Mul<$t> for Matrix<R, C, $t> {
                type Output = Self;

                fn mul(self, rhs: $t) -> Self {
                    self.scale(rhs)
                }
            }
        )*
    };
}

impl_scalar_mul!(i32, i64, f32, f64);

impl<const R: usize, const C: usize, T: Element> fmt::Display for Matrix<R, C, T> {
    /// One `|a, b, c|` line per row. Formatting flags apply to each element.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.iter() {
            write!(f, "|")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                fmt::Display::fmt(value, f)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn zero_sized_matrix() {
        let m = Matrix::<0, 0, f32>::zeroed();
        assert_eq!(m.len(), 0);
        assert_eq!(m.sum(), 0.0);
        assert_eq!(m.to_string(), "");
    }

    #[test]
    fn single_element_matrix() {
        let a = Matrix::<1, 1, f32>::filled(5.0);
        let b = a;
        let c = b;
        assert_eq!(*c.at(0, 0), 5.0);
        assert_eq!(a, c);
    }

    #[test]
    fn from_flat_is_row_major() {
        let m = Matrix::<2, 3, i32>::from_flat([1, 2, 3, 4, 5, 6]);
        assert_eq!(*m.at(0, 2), 3);
        assert_eq!(*m.at(1, 0), 4);
        assert_eq!(m[(1, 2)], 6);
        assert_eq!(m.shape(), (2, 3));
    }

    #[test]
    fn matrix_index_mut() {
        let mut m = Matrix::<2, 2, i32>::zeroed();
        *m.at_mut(0, 1) = 7;
        m[(1, 0)] = -7;
        assert_eq!(m, Matrix::new([[0, 7], [-7, 0]]));
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let m = Matrix::<2, 2, i32>::zeroed();
        let _ = m.at(2, 0);
    }

    #[test]
    fn add_then_subtract_restores_lhs() {
        let a = Matrix::<3, 2, i32>::from_flat([1, -2, 3, 4, 50, -6]);
        let b = Matrix::<3, 2, i32>::from_flat([9, 8, -7, 6, 5, 4]);
        assert_eq!(a + b - b, a);

        let mut rng = StdRng::seed_from_u64(3);
        let mut x = Matrix::<4, 3, f64>::zeroed();
        let mut y = Matrix::<4, 3, f64>::zeroed();
        x.randomize_with(&mut rng);
        y.randomize_with(&mut rng);
        let restored = x + y - y;
        for (actual, expected) in restored.iter().zip(x.iter()) {
            assert_relative_eq!(*actual, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn compound_assignment_ops() {
        let mut m = Matrix::<2, 2, i32>::new([[1, 2], [3, 4]]);
        m += Matrix::filled(10);
        assert_eq!(m, Matrix::new([[11, 12], [13, 14]]));
        m -= Matrix::filled(1);
        assert_eq!(m, Matrix::new([[10, 11], [12, 13]]));
    }

    #[test]
    fn scalar_multiply() {
        let m = Matrix::<2, 2, i32>::new([[1, 2], [3, 4]]);
        assert_eq!(m * 3, Matrix::new([[3, 6], [9, 12]]));
        assert_eq!(m.scale(-1), Matrix::new([[-1, -2], [-3, -4]]));
    }

    #[test]
    fn map_and_zip_map() {
        let m = Matrix::<1, 3, i32>::row_vector([1, 2, 3]);
        assert_eq!(m.map(|x| x * x), Matrix::row_vector([1, 4, 9]));
        assert_eq!(m.zip_map(&m, |x, y| x - y), Matrix::zeroed());
        assert_eq!(m.mul_element_wise(&m), Matrix::row_vector([1, 4, 9]));
    }

    #[test]
    fn transpose_test() {
        let m = Matrix::<5, 4, i32>::from_fn(|r, c| (r * 4 + c) as i32);
        let expected = Matrix::<4, 5, i32>::from_flat([
            0, 4, 8, 12, 16,
            1, 5, 9, 13, 17,
            2, 6, 10, 14, 18,
            3, 7, 11, 15, 19,
        ]);

        assert_eq!(m.transpose(), expected);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn identity_3() {
        let expected = Matrix::<3, 3, f64>::from_flat([
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ]);
        assert_eq!(Matrix::identity(), expected);
    }

    #[test]
    fn matrix_mul() {
        let lhs = Matrix::<4, 3, i32>::from_flat([
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
            10, 11, 12,
        ]);
        let rhs = Matrix::<3, 5, i32>::from_flat([
            1, 2, 3, 4, 5,
            6, 7, 8, 9, 10,
            11, 12, 13, 14, 15,
        ]);

        // Resultant matrix has as many rows as lhs, and as many columns as rhs.
        let expected = Matrix::<4, 5, i32>::from_flat([
            46, 52, 58, 64, 70,
            100, 115, 130, 145, 160,
            154, 178, 202, 226, 250,
            208, 241, 274, 307, 340,
        ]);

        assert_eq!(lhs * rhs, expected);
        assert_eq!(lhs * Matrix::identity(), lhs);
        assert_eq!(Matrix::<4, 4, i32>::identity() * lhs, lhs);
    }

    #[test]
    fn sum_of_elements() {
        let m = Matrix::<2, 3, i32>::from_flat([1, 2, 3, 4, 5, 6]);
        assert_eq!(m.sum(), 21);
    }

    #[test]
    fn add_wrapped_column_vector() {
        let lhs = Matrix::<3, 3, i32>::from_flat([
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ]);
        let rhs = Matrix::column_vector([10, 20, 30]);
        let expected = Matrix::<3, 3, i32>::from_flat([
            11, 12, 13,
            24, 25, 26,
            37, 38, 39,
        ]);

        assert_eq!(lhs.add_wrapped(&rhs), expected);
    }

    #[test]
    fn add_wrapped_row_vector() {
        let lhs = Matrix::<2, 3, i32>::zeroed();
        let rhs = Matrix::row_vector([1, 2, 3]);
        assert_eq!(lhs.add_wrapped(&rhs), Matrix::from_flat([1, 2, 3, 1, 2, 3]));
    }

    #[test]
    fn add_wrapped_tile() {
        let lhs = Matrix::<2, 4, i32>::zeroed();
        let tile = Matrix::<1, 2, i32>::row_vector([1, -1]);
        assert_eq!(lhs.add_wrapped(&tile), Matrix::from_flat([1, -1, 1, -1, 1, -1, 1, -1]));
    }

    #[test]
    fn column_catenation() {
        let m1 = Matrix::<2, 3, i32>::from_flat([
            1, 2, 3,
            4, 5, 6,
        ]);
        let m2 = Matrix::<2, 2, i32>::from_flat([
            -1, -2,
            -3, -4,
        ]);
        let expected = Matrix::<2, 5, i32>::from_flat([
            1, 2, 3, -1, -2,
            4, 5, 6, -3, -4,
        ]);

        let result: Matrix<2, 5, i32> = m1.column_cat(&m2);
        assert_eq!(result, expected);
    }

    #[test]
    fn column_split() {
        let m1 = Matrix::<1, 3, i32>::from_flat([1, 2, 3]);
        let (left, right) = m1.column_split::<2, 1>();

        assert_eq!(left, Matrix::row_vector([1, 2]));
        assert_eq!(right, Matrix::row_vector([3]));
    }

    #[test]
    fn split_undoes_cat() {
        let left = Matrix::<3, 2, i32>::from_fn(|r, c| (r * 10 + c) as i32);
        let right = Matrix::<3, 4, i32>::from_fn(|r, c| -((r * 10 + c) as i32));
        let joined = left.column_cat::<4, 6>(&right);

        assert_eq!(joined.column_split::<2, 4>(), (left, right));
    }

    #[test]
    fn flatten_and_reshape() {
        let m = Matrix::<2, 3, i32>::from_flat([1, 2, 3, 4, 5, 6]);
        assert_eq!(m.flatten::<6>(), Matrix::column_vector([1, 2, 3, 4, 5, 6]));
        assert_eq!(m.reshape::<3, 2>(), Matrix::from_flat([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut m = Matrix::<3, 2, f32>::new_randomized();
        m.fill(0.25);
        assert!(m.iter().all(|&x| x == 0.25));
    }

    #[test]
    fn randomize_is_reproducible_with_seed() {
        let mut a = Matrix::<8, 8, f64>::zeroed();
        let mut b = Matrix::<8, 8, f64>::zeroed();
        a.randomize_with(&mut StdRng::seed_from_u64(42));
        b.randomize_with(&mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
        assert_ne!(a, Matrix::zeroed());
    }

    #[test]
    fn randomize_variance_follows_shape() {
        let mut m = Matrix::<100, 100, f64>::zeroed();
        m.randomize_with(&mut StdRng::seed_from_u64(7));

        let n = m.len() as f64;
        let mean = m.sum() / n;
        let variance = m.map(|x| (x - mean) * (x - mean)).sum() / n;

        assert!(mean.abs() < 0.01);
        assert_relative_eq!(variance, 1.0 / 200.0, max_relative = 0.1);
    }

    #[test]
    fn randomize_scales_standard_normal_draws() {
        let mut m = Matrix::<1, 3, f64>::zeroed();
        m.randomize_with(&mut StdRng::seed_from_u64(11));

        let mut rng = StdRng::seed_from_u64(11);
        let expected = Matrix::<1, 3, f64>::from_fn(|_, _| {
            let z: f64 = StandardNormal.sample(&mut rng);
            z * 0.5
        });

        for (x, y) in m.iter().zip(expected.iter()) {
            assert_relative_eq!(*x, *y, max_relative = 1e-12);
        }
    }

    #[test]
    fn try_from_slice() {
        let values = vec![1, 2, 3, 4];
        let m = Matrix::<2, 2, i32>::try_from(values.as_slice());
        assert_eq!(m, Ok(Matrix::new([[1, 2], [3, 4]])));

        let short = Matrix::<3, 2, i32>::try_from(&values[..3]);
        assert_eq!(short, Err(Error::ShapeMismatch { rows: 3, columns: 2, found: 3 }));
    }

    #[test]
    fn display_rows() {
        let m = Matrix::<2, 2, i32>::new([[1, 2], [3, 4]]);
        assert_eq!(m.to_string(), "|1, 2|\n|3, 4|\n");

        let v = Matrix::<1, 2, f32>::row_vector([0.5, 1.0]);
        assert_eq!(format!("{v:.2}"), "|0.50, 1.00|\n");
    }
}
