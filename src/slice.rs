pub(crate) mod scan;
pub(crate) mod slicer;
pub(crate) mod spec;
