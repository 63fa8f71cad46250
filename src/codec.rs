pub(crate) mod still;
