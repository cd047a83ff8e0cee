pub mod history;
pub mod product;
pub mod record;
