pub mod catalog;
pub mod search;
pub mod load;
pub mod links;
