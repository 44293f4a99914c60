pub mod form_fields;
pub mod handlers;
pub mod header;
pub mod results;
pub mod selected_files;
pub mod toast;
pub mod upload_section;
pub mod utils;
