//! A small matrix type holding up to 3x3 cells, containing just the
//! operations and trait implementations drills need.

use arrayvec::ArrayVec;
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, Index, IndexMut, Mul, Sub},
};

/// The largest number of rows or columns a [`Matrix`] may have.
pub const MAX_ORDER: usize = 3;

type Cells<T> = ArrayVec<[T; MAX_ORDER * MAX_ORDER]>;

/// A RxC matrix laid out sequentially (row-major) in memory.
///
/// Matrices are values. Every operation returns a new matrix and leaves its
/// inputs untouched.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    cells: Cells<T>,
    rows: usize,
    columns: usize,
}

impl<T> Matrix<T> {
    /// Create a new [`Matrix`] by invoking some `fn(row, column) -> T`
    /// function for each cell.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or larger than [`MAX_ORDER`].
    pub fn init<F>(rows: usize, columns: usize, mut get_cell: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        use std::convert::Infallible;

        Matrix::try_init::<_, Infallible>(rows, columns, |row, column| {
            Ok(get_cell(row, column))
        })
        .expect(
            "This can never fail, all error checking should be optimised away",
        )
    }

    /// A version of [`Matrix::init()`] which lets you initialize a matrix using
    /// a function which may fail.
    pub fn try_init<F, E>(
        rows: usize,
        columns: usize,
        mut get_cell: F,
    ) -> Result<Self, E>
    where
        F: FnMut(usize, usize) -> Result<T, E>,
    {
        assert_dimensions(rows, columns);
        let mut cells = Cells::new();

        for row in 0..rows {
            for column in 0..columns {
                cells.push(get_cell(row, column)?);
            }
        }

        Ok(Matrix {
            cells,
            rows,
            columns,
        })
    }

    /// Build a matrix from a sequence of rows.
    ///
    /// # Panics
    ///
    /// If the rows have different lengths or the result would be larger than
    /// `MAX_ORDER x MAX_ORDER`.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Cells::new();
        let mut row_count = 0;
        let mut columns = None;

        for row in rows {
            let before = cells.len();

            for cell in row {
                assert!(
                    cells.try_push(cell).is_ok(),
                    "A matrix can't have more than {} cells",
                    MAX_ORDER * MAX_ORDER
                );
            }

            let width = cells.len() - before;
            match columns {
                None => columns = Some(width),
                Some(expected) => assert_eq!(
                    expected, width,
                    "Every row must have the same number of columns"
                ),
            }
            row_count += 1;
        }

        let columns = columns.unwrap_or(0);
        assert_dimensions(row_count, columns);

        Matrix {
            cells,
            rows: row_count,
            columns,
        }
    }

    pub fn row_count(&self) -> usize { self.rows }

    pub fn column_count(&self) -> usize { self.columns }

    /// The `(rows, columns)` of this matrix.
    pub fn dimensions(&self) -> (usize, usize) { (self.rows, self.columns) }

    pub fn is_square(&self) -> bool { self.rows == self.columns }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks_exact(self.columns)
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.columns;
            Some(&self.cells[start..start + self.columns])
        } else {
            None
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            self.cells.get(self.index(row, column))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.rows && column < self.columns {
            let index = self.index(row, column);
            self.cells.get_mut(index)
        } else {
            None
        }
    }

    /// Iterate over every `(row, column, &cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns;

        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / columns, i % columns, cell))
    }

    pub fn map<F, Q>(&self, mut func: F) -> Matrix<Q>
    where
        F: FnMut(&T) -> Q,
    {
        Matrix::init(self.rows, self.columns, |row, column| {
            func(&self[(row, column)])
        })
    }

    /// Combine two matrices of the same shape cell by cell.
    ///
    /// # Panics
    ///
    /// If the matrices have different dimensions.
    pub fn zip_with<F, U, Q>(&self, other: &Matrix<U>, mut func: F) -> Matrix<Q>
    where
        F: FnMut(&T, &U) -> Q,
    {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "Element-wise operations need matrices of the same shape"
        );

        Matrix::init(self.rows, self.columns, |row, column| {
            func(&self[(row, column)], &other[(row, column)])
        })
    }

    pub fn transposed(&self) -> Self
    where
        T: Clone,
    {
        Matrix::init(self.columns, self.rows, |row, column| {
            self[(column, row)].clone()
        })
    }

    /// The matrix left over after deleting one row and one column.
    ///
    /// # Panics
    ///
    /// If the matrix only has one row or one column.
    pub fn minor(&self, row: usize, column: usize) -> Self
    where
        T: Clone,
    {
        assert!(
            self.rows > 1 && self.columns > 1,
            "A {}x{} matrix has no minors",
            self.rows,
            self.columns
        );
        let skip = |index: usize, removed: usize| {
            if index >= removed {
                index + 1
            } else {
                index
            }
        };

        Matrix::init(self.rows - 1, self.columns - 1, |r, c| {
            self[(skip(r, row), skip(c, column))].clone()
        })
    }

    /// Multiply every cell by some scalar.
    pub fn scaled(&self, factor: T) -> Self
    where
        T: Copy + Mul<Output = T>,
    {
        self.map(|&value| factor * value)
    }

    /// The pairs `(A[row][k], B[k][column])` which are multiplied and summed
    /// to get one cell of `A * B`.
    pub fn dot_terms(
        &self,
        other: &Matrix<T>,
        row: usize,
        column: usize,
    ) -> ArrayVec<[(T, T); MAX_ORDER]>
    where
        T: Copy,
    {
        assert_eq!(self.columns, other.rows, "Incompatible dimensions");

        (0..self.columns)
            .map(|k| (self[(row, k)], other[(k, column)]))
            .collect()
    }
}

impl<T> Matrix<T>
where
    T: From<i64>,
{
    pub fn identity(order: usize) -> Self {
        Matrix::init(order, order, |row, column| {
            T::from(if row == column { 1 } else { 0 })
        })
    }

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Matrix::init(rows, columns, |_, _| T::from(0))
    }
}

impl<T> Matrix<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    /// Calculate the determinant of a 1x1, 2x2 or 3x3 matrix.
    ///
    /// The 3x3 case uses the rule of Sarrus,
    /// `aei + bfg + cdh - ceg - bdi - afh`.
    ///
    /// # Panics
    ///
    /// If the matrix isn't square.
    pub fn determinant(&self) -> T {
        assert!(
            self.is_square(),
            "Only square matrices have a determinant, found {}x{}",
            self.rows,
            self.columns
        );
        let m = |row: usize, column: usize| self[(row, column)];

        match self.rows {
            1 => m(0, 0),
            2 => m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0),
            3 => {
                let (a, b, c) = (m(0, 0), m(0, 1), m(0, 2));
                let (d, e, f) = (m(1, 0), m(1, 1), m(1, 2));
                let (g, h, i) = (m(2, 0), m(2, 1), m(2, 2));

                a * e * i + b * f * g + c * d * h
                    - c * e * g
                    - b * d * i
                    - a * f * h
            },
            other => unreachable!("Matrices are never {0}x{0}", other),
        }
    }
}

fn assert_dimensions(rows: usize, columns: usize) {
    assert!(
        (1..=MAX_ORDER).contains(&rows),
        "A matrix must have between 1 and {} rows, found {}",
        MAX_ORDER,
        rows
    );
    assert!(
        (1..=MAX_ORDER).contains(&columns),
        "A matrix must have between 1 and {} columns, found {}",
        MAX_ORDER,
        columns
    );
}

impl<T: Debug> Debug for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;

            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", cell)?;
            }

            write!(f, "]")?;
        }

        write!(f, "]")
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows, "Row index out of bounds");
        assert!(column < self.columns, "Column index out of bounds");

        self.get(row, column)
            .expect("We've already done bounds checks")
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(
        &mut self,
        (row, column): (usize, usize),
    ) -> &mut Self::Output {
        assert!(row < self.rows, "Row index out of bounds");
        assert!(column < self.columns, "Column index out of bounds");

        self.get_mut(row, column)
            .expect("We've already done bounds checks")
    }
}

impl<T: Copy + Add<Output = T>> Add for Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Matrix<T>) -> Self::Output {
        self.zip_with(&rhs, |&left, &right| left + right)
    }
}

impl<T: Copy + Sub<Output = T>> Sub for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Matrix<T>) -> Self::Output {
        self.zip_with(&rhs, |&left, &right| left - right)
    }
}

impl<T> Mul for Matrix<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T> + Default,
{
    type Output = Matrix<T>;

    /// The matrix product, `(RxN) * (NxC) = RxC`.
    ///
    /// # Panics
    ///
    /// If the number of columns on the left doesn't match the number of rows
    /// on the right.
    fn mul(self, other: Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.columns, other.rows,
            "Can't multiply a {}x{} matrix by a {}x{} matrix",
            self.rows, self.columns, other.rows, other.columns
        );

        Matrix::init(self.rows, other.columns, |row, column| {
            let mut sum = T::default();

            for i in 0..self.columns {
                sum = sum + self[(row, i)] * other[(i, column)];
            }

            sum
        })
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(other: [[T; C]; R]) -> Self { Matrix::from_rows(other) }
}

impl<T: PartialEq, const R: usize, const C: usize> PartialEq<[[T; C]; R]>
    for Matrix<T>
{
    fn eq(&self, other: &[[T; C]; R]) -> bool {
        self.rows == R
            && self.columns == C
            && self
                .cells()
                .all(|(row, column, value)| *value == other[row][column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn matrix_representation() {
        let matrix = Matrix::init(2, 3, |row, column| column + row);
        let should_be = "[[0, 1, 2], [1, 2, 3]]";

        let got = format!("{:?}", matrix);

        assert_eq!(got, should_be);
        assert_eq!(matrix.to_string(), should_be);
    }

    #[test]
    fn wide_matrix_from_array() {
        let array = [[1, 2, 3], [4, 5, 6]];

        let got = Matrix::from(array);

        assert_eq!(got.dimensions(), (2, 3));
        assert_eq!(got, array);
    }

    #[test]
    fn tall_matrix_from_array() {
        let array = [[1, 2], [3, 4], [5, 6]];

        let got = Matrix::from(array);

        assert_eq!(got.dimensions(), (3, 2));
        assert_eq!(got, array);
    }

    #[test]
    fn from_rows_accepts_vectors() {
        let got = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]);

        assert_eq!(got, [[1, 2], [3, 4]]);
    }

    #[test]
    #[should_panic]
    fn ragged_rows_are_rejected() {
        let _ = Matrix::from_rows(vec![vec![1, 2], vec![3]]);
    }

    #[test]
    #[should_panic]
    fn four_rows_is_too_many() {
        let _ = Matrix::from([[1], [2], [3], [4]]);
    }

    #[test]
    fn out_of_bounds_lookups_return_none() {
        let matrix = Matrix::from([[1, 2], [3, 4]]);

        assert_eq!(matrix.get(1, 1), Some(&4));
        assert_eq!(matrix.get(0, 2), None);
        assert_eq!(matrix.get(2, 0), None);
    }

    #[test]
    fn element_wise_operations() {
        let a = Matrix::from([[1, 2], [3, 4]]);
        let b = Matrix::from([[5, 6], [7, 8]]);

        assert_eq!(a.clone() + b.clone(), [[6, 8], [10, 12]]);
        assert_eq!(a.clone() - b, [[-4, -4], [-4, -4]]);
        assert_eq!(a.scaled(-3), [[-3, -6], [-9, -12]]);
        // the operands are untouched
        assert_eq!(a, [[1, 2], [3, 4]]);
    }

    #[test]
    fn scaling_by_one_and_zero() {
        let a: Matrix<i64> = Matrix::from([[1, -2, 3], [4, 0, -6]]);

        assert_eq!(a.scaled(1), a);
        assert_eq!(a.scaled(0), Matrix::zeros(2, 3));
    }

    #[test]
    #[should_panic]
    fn adding_different_shapes_is_a_bug() {
        let _ = Matrix::from([[1, 2]]) + Matrix::from([[1], [2]]);
    }

    #[test]
    fn square_matrix_multiply() {
        let matrix = Matrix::from([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let vector = Matrix::from([[9], [10], [11]]);

        let got = matrix * vector;

        assert_eq!(got, [[32], [122], [212]]);
    }

    #[test]
    fn row_vector_times_column_vector() {
        let row = Matrix::from([[1, 2, 3]]);
        let column = Matrix::from([[4], [5], [6]]);

        assert_eq!(row.clone() * column.clone(), [[32]]);
        assert_eq!(
            column * row,
            [[4, 8, 12], [5, 10, 15], [6, 12, 18]]
        );
    }

    #[test]
    fn dot_terms_for_one_cell() {
        let a = Matrix::from([[1, 2], [3, 4]]);
        let b = Matrix::from([[5, 6], [7, 8]]);

        let got = a.dot_terms(&b, 1, 0);

        assert_eq!(got.as_slice(), &[(3, 5), (4, 7)]);
    }

    #[test]
    fn determinants_of_each_order() {
        assert_eq!(Matrix::from([[-7]]).determinant(), -7);
        assert_eq!(Matrix::from([[3, 1], [2, 4]]).determinant(), 10);
        assert_eq!(
            Matrix::from([[2, -3, 1], [2, 0, -1], [1, 4, 5]]).determinant(),
            49
        );
        assert_eq!(Matrix::<i64>::identity(3).determinant(), 1);
    }

    #[test]
    fn rational_determinant() {
        let half = Rational::new(1, 2);
        let one = Rational::ONE;
        let matrix = Matrix::from([[half, one], [one, half]]);

        assert_eq!(matrix.determinant(), Rational::new(-3, 4));
    }

    #[test]
    fn determinant_agrees_with_lu_decomposition() {
        let matrix = Matrix::from([[2, -3, 1], [4, 0, -5], [7, 2, 6]]);
        let values: Vec<f64> =
            matrix.cells().map(|(_, _, &value)| value as f64).collect();
        let dense = nalgebra::DMatrix::from_row_slice(3, 3, &values);

        approx::assert_relative_eq!(
            dense.determinant(),
            matrix.determinant() as f64,
            epsilon = 1e-9
        );
    }

    #[test]
    fn minors_skip_a_row_and_column() {
        let matrix = Matrix::from([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);

        assert_eq!(matrix.minor(0, 0), [[5, 6], [8, 9]]);
        assert_eq!(matrix.minor(1, 2), [[1, 2], [7, 8]]);
        assert_eq!(matrix.minor(2, 1), [[1, 3], [4, 6]]);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let matrix = Matrix::from([[1, 2, 3], [4, 5, 6]]);

        assert_eq!(matrix.transposed(), [[1, 4], [2, 5], [3, 6]]);
    }
}
