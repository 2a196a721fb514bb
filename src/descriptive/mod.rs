//! The descriptive analysis page: a statistical summary of the loaded table
//! and the distributions of income and expenses.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_descriptive_page;
