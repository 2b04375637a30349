use super::*;

mod declarations;
mod nullable;
mod resolution;
