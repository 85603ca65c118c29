// Classification: severity bands, the assignments list view, and the
// pairwise comparison matrix.

pub mod bands;
pub mod matrix;
pub mod records;
