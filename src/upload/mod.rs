//! The home page, where a spreadsheet of transactions is uploaded, and the
//! endpoints that replace or drop the loaded table.

mod clear_endpoint;
mod home_page;
mod upload_endpoint;

pub use clear_endpoint::clear_session_endpoint;
pub use home_page::get_home_page;
pub use upload_endpoint::upload_endpoint;
