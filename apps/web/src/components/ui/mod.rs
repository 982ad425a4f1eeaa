mod alert;
mod button;
mod spinner;

pub(crate) use alert::{Alert, AlertKind, ErrorAlert};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use spinner::Spinner;
