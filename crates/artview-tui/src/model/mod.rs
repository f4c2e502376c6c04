pub mod bulk;
pub mod sort;
pub mod status;
