/// UI module exports
pub mod components;
pub mod links;
pub mod popup;
pub mod topics;
