//! The exploratory analysis page: filters, KPIs, trend charts and a
//! comparison of two periods.

mod cards;
mod charts;
mod filter_form;
mod handlers;
mod tables;

pub use handlers::get_exploratory_page;
