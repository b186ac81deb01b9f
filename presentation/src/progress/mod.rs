//! Progress reporting while a flow waits on the model

pub mod reporter;
