mod alarm;
mod notification;
mod reminder;
mod session;
mod settings;
mod status;

pub mod dtos {
    pub use crate::alarm::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::settings::dtos::*;
}

pub use crate::alarm::api::*;
pub use crate::notification::api::*;
pub use crate::reminder::api::*;
pub use crate::session::api::*;
pub use crate::settings::api::*;
pub use crate::status::api::*;
