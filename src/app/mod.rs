// Application layer: console front-ends and web routers over the core tools.

pub mod prompt;
#[cfg(feature = "cli")]
pub mod tools;
#[cfg(feature = "web")]
pub mod web;
