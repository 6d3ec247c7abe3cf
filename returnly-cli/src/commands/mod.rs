pub mod records;
pub mod remind;
pub mod transactions;
