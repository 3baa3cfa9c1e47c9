pub mod barcode;
pub mod captcha;
pub mod chatbot;
pub mod chem;
pub mod finance;
pub mod mandelbrot;
pub mod password;
pub mod pomoban;
pub mod port_watch;
pub mod resume;
pub mod todo;
pub mod words;

pub use crate::domain::ports::{Prober, Storage};
pub use crate::utils::error::Result;
