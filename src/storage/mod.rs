pub(crate) mod buffer;
pub(crate) mod guarded;
pub(crate) mod mask;
