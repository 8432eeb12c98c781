pub(crate) mod color;
pub(crate) mod loader;
pub(crate) mod model;
