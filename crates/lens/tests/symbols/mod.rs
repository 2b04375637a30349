use super::*;

mod facts;
mod hierarchy;
mod identity;
mod members;
