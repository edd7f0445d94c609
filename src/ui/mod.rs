//! UI widgets for the Book Finder window

pub mod card;
pub mod details;
pub mod form;
pub mod theme;
