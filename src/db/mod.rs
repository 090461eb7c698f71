pub mod dblists;
