pub mod example_crud;
pub mod maintenance;
pub mod seed_ops;
pub mod vector_search;
