pub mod export;
pub mod st;
