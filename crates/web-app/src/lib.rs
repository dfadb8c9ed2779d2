#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod avatar;
pub mod log;
pub mod settings;
pub mod tracker;

pub use avatar::Avatar;
pub use settings::{Settings, SettingsError};
pub use tracker::{Chip, Error, Model, Msg, update};
