pub mod contact;
pub mod form;
pub mod hello;
pub mod json;
pub mod listing;
