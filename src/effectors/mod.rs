pub(crate) mod cutters;
pub(crate) mod effector;
pub(crate) mod effects;
pub(crate) mod filters;
pub(crate) mod manipulations;
pub(crate) mod parse;
