pub(crate) mod csv;
pub(crate) mod svg;
