pub mod use_crud;
pub mod use_lookup;
