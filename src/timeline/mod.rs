pub(crate) mod beats;
pub(crate) mod composer;
pub(crate) mod transitions;
