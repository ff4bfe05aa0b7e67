pub(crate) mod config;
pub(crate) mod destination;
pub(crate) mod formatter;
pub(crate) mod generator;
pub(crate) mod header;
pub(crate) mod record;
