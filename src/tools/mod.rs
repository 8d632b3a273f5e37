pub mod brainstorm;
pub mod dispatcher;
pub mod pair;
pub mod registry;
pub mod review;
