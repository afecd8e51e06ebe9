pub(crate) mod collision;
