//! Markup tree module
//!
//! A small owned element tree over quick-xml: enough to re-parse page
//! fragments, lift their record elements into one document and write the
//! result back out.

mod element;

pub use element::XmlElement;
