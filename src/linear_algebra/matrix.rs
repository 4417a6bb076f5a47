use thiserror::Error;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum MatrixError {
    #[error("Matrix size is:{matrix_size:?},but index at {accessed_index:?} was accessed")]
    IndexOutOfBounds{matrix_size:(usize,usize),accessed_index:(usize,usize)},
    #[error("Matrix have {row_count} rows ,but row at {accessed_row} was accessed")]
    RowOutOfBounds{row_count:usize,accessed_row:usize},
    #[error("Matrix have {col_count} cols ,but col at {accessed_col} was accessed")]
    ColOutOfBounds{col_count:usize,accessed_col:usize},
    #[error("attempted to create {row}*{col} matrix from vector/iterator with length {len}")]
    SizeMisMatch{row:usize,col:usize,len:usize},
}

type Result<T> = std::result::Result<T,MatrixError>;

// A double precision matrix, row major order
// which means rows are stored continuously
#[derive(Clone,Debug,PartialEq)]
pub struct Matrix {
    row_count:usize,
    col_count:usize,
    //row*col must equal elements.len()
    // otherwise invariants are broken, panics allowed
    elements:Vec<f64>
}

use std::fmt::Display;
impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"[")?;
        for (i,elem) in self.elements.iter().enumerate() {
            write!(f,"{elem:.4}")?;
            if i+1 == self.elements.len() {
                write!(f,"]")?;
            }else if (i+1)%self.col_count == 0 {
                write!(f,",\n")?;
            }else{
                write!(f,", ")?;
            }
        }
        if self.elements.is_empty() {
            write!(f,"]")?;
        }
        Ok(())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            row_count:0,
            col_count:0,
            elements:vec![]
        }
    }
}

//public implementations
impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_vec(v:Vec<f64>,row:usize,col:usize) -> Result<Self> {
        if row*col > v.len() {
            return Err(MatrixError::SizeMisMatch { row, col,len: v.len() })
        }
        if row*col == 0 {
            return Ok(Self::default())
        }
        let mut v = v;
        v.truncate(row*col);
        debug_assert_eq!(row*col,v.len());
        Ok(Self { row_count: row, col_count: col, elements: v })
    }
    fn out_of_bounds(&self,row:usize,col:usize) -> MatrixError {
        MatrixError::IndexOutOfBounds {
            matrix_size:(self.row_count,self.col_count),
            accessed_index:(row,col)
        }
    }
    pub fn get(&self,row:usize,col:usize) -> Result<f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        if row >= self.row_count || col >= self.col_count {
            return Err(self.out_of_bounds(row, col))
        }
        self.elements.get(row*self.col_count + col).copied().ok_or_else(|| self.out_of_bounds(row, col))
    }
    pub fn get_mut(&mut self,row:usize,col:usize) -> Result<&mut f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = self.out_of_bounds(row, col);
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get_mut(row*self.col_count + col).ok_or(out_of_bounds)
    }
    pub fn set(&mut self,row:usize,col:usize,value:f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }
    pub fn zeros(row:usize,col:usize) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        Self {
            row_count:row,
            col_count:col,
            elements:vec![0.0;row*col]
        }
    }

    pub fn is_empty(&self) -> bool {
        self.col_count == 0 || self.row_count == 0 || self.elements.is_empty()
    }

    pub fn dimension(&self) -> (usize,usize) {
        if self.is_empty() {return (0,0)}
        (self.row_count,self.col_count)
    }

    pub fn row(&self,row:usize) -> Result<&[f64]> {
        if row >= self.row_count {
            return Err(MatrixError::RowOutOfBounds { row_count: self.row_count, accessed_row: row })
        }
        let start = row*self.col_count;
        Ok(&self.elements[start..start + self.col_count])
    }

    pub fn row_sum(&self,row:usize) -> Result<f64> {
        Ok(self.row(row)?.iter().sum())
    }

    pub fn col_sum(&self,col:usize) -> Result<f64> {
        if col >= self.col_count {
            return Err(MatrixError::ColOutOfBounds { col_count: self.col_count, accessed_col: col })
        }
        Ok(self.elements.iter().skip(col).step_by(self.col_count).sum())
    }

    // every element with its (row,col), row major
    pub fn indexed(&self) -> impl Iterator<Item = ((usize,usize),f64)> + '_ {
        let col_count = self.col_count;
        self.elements.iter().enumerate().map(move |(index,elem)| ((index/col_count,index%col_count),*elem))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{Matrix, MatrixError};

    #[test]
    fn test_sums() {
        let m = Matrix::new_with_vec(vec![1.0,2.0,3.0,4.0,5.0,6.0], 2, 3).unwrap();
        assert_eq!(m.row_sum(0).unwrap(),6.0);
        assert_eq!(m.row_sum(1).unwrap(),15.0);
        assert_eq!(m.col_sum(2).unwrap(),9.0);
        assert_eq!(m.col_sum(3).unwrap_err(),MatrixError::ColOutOfBounds { col_count: 3, accessed_col: 3 });
        assert!(m.get(2, 0).is_err());
    }
    #[test]
    fn test_random_sums() {
        let mut rng = rand::rng();
        let rows:usize = rng.random_range(2..30);
        let cols:usize = rng.random_range(3..40);
        let v:Vec<f64> = (0..rows*cols).map(|_| rng.random_range(0.0..=1.0)).collect();
        let m = Matrix::new_with_vec(v.clone(), rows, cols).unwrap();
        assert_eq!(m.dimension(),(rows,cols));
        for i in 0..rows {
            let expected:f64 = v[i*cols..(i+1)*cols].iter().sum();
            assert!((m.row_sum(i).unwrap() - expected).abs() < 1e-9,"row {i}");
        }
        for j in 0..cols {
            let expected:f64 = (0..rows).map(|i| v[i*cols + j]).sum();
            assert!((m.col_sum(j).unwrap() - expected).abs() < 1e-9,"col {j}");
        }
        let total:f64 = m.indexed().map(|(_,elem)| elem).sum();
        assert!((total - v.iter().sum::<f64>()).abs() < 1e-9);
        assert!(m.row_sum(rows).is_err());
    }
    #[test]
    fn test_set_and_display() {
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 1, 0.5).unwrap();
        assert_eq!(format!("{m}"),"[0.0000, 0.5000,\n0.0000, 0.0000]");
        assert_eq!(format!("{}",Matrix::new()),"[]");
        assert!(Matrix::new_with_vec(vec![1.0], 2, 2).is_err());
    }
}
