//! Flight lookup and search. The booking form loads its flight through here.

pub(crate) mod client;
pub(crate) mod types;
