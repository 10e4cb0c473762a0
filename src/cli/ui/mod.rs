pub mod detail_view;
pub mod interaction;
pub mod script;
