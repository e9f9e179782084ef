pub mod selection;
pub mod session;
pub mod tech_stack;
