pub(crate) mod duration;
pub(crate) mod lenient;
pub(crate) mod maybe_split_once;
