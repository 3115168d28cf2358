mod model;

pub use model::FormValues;
