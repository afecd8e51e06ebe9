pub(crate) mod ease;
pub(crate) mod interp;
pub(crate) mod ops;
pub(crate) mod preset;
pub(crate) mod spring;
