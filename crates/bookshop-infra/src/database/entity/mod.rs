//! SeaORM entities for the bookshop tables.

pub mod account;
pub mod book;
pub mod order;
