pub mod cascade;
pub mod cli;
pub mod ctx;
pub mod error;
pub mod input;
pub mod io;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod vectorize;
