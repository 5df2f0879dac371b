//! HTML rendering for gateway pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod identity;
pub mod invited;
pub mod message;
