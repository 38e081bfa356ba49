pub mod api_utils;
pub mod date_utils;
pub mod icons;
pub mod page_frame;
pub mod text_format;
