pub(crate) mod field;
pub(crate) mod integrate;
pub(crate) mod layout;
pub(crate) mod recompute;
