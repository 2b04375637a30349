use super::*;

mod display;
mod identity;
mod locations;
