use super::*;

mod arguments;
mod targets;
